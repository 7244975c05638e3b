//! Step boundary events.
//!
//! The world dispatches [`PreStepEvent`] before it processes contacts and
//! [`PostStepEvent`] once the clock has advanced, on every call to
//! [`World::step`](crate::world::World::step). Neither carries data beyond
//! the back-reference; listeners read the world state they care about
//! directly.

use crate::events::TargetId;

/// The world is about to process a step.
#[derive(Debug, Clone, Default)]
pub struct PreStepEvent {
    pub(crate) target: Option<TargetId>,
}

impl PreStepEvent {
    pub fn new() -> Self {
        Self::default()
    }
}

/// The world has finished a step.
#[derive(Debug, Clone, Default)]
pub struct PostStepEvent {
    pub(crate) target: Option<TargetId>,
}

impl PostStepEvent {
    pub fn new() -> Self {
        Self::default()
    }
}
