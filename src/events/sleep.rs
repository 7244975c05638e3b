//! Body sleep transitions.
//!
//! A [`Body`](crate::components::body::Body) moves through
//! `Awake -> Sleepy -> Sleeping` as its speed stays under the sleep limit,
//! and back to `Awake` when woken. Each transition is announced on the body's
//! own dispatcher:
//!
//! - [`SleepyEvent`] – the body slowed down below its sleep speed limit
//! - [`SleepEvent`] – the body stayed sleepy long enough and went to sleep
//! - [`WakeUpEvent`] – a sleeping body was woken up
//!
//! The payloads carry no data; the target tells which body changed state.

use crate::events::TargetId;

/// The body fell asleep.
#[derive(Debug, Clone, Default)]
pub struct SleepEvent {
    pub(crate) target: Option<TargetId>,
}

impl SleepEvent {
    pub fn new() -> Self {
        Self::default()
    }
}

/// The body became sleepy.
#[derive(Debug, Clone, Default)]
pub struct SleepyEvent {
    pub(crate) target: Option<TargetId>,
}

impl SleepyEvent {
    pub fn new() -> Self {
        Self::default()
    }
}

/// The body woke up from sleep.
#[derive(Debug, Clone, Default)]
pub struct WakeUpEvent {
    pub(crate) target: Option<TargetId>,
}

impl WakeUpEvent {
    pub fn new() -> Self {
        Self::default()
    }
}
