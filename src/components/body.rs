//! Rigid body with a sleep state machine.
//!
//! The [`Body`] stores its velocity, the shapes attached to it and the
//! bookkeeping needed to decide when it may stop being simulated. Bodies are
//! shared between the world, contact equations and event payloads through
//! `Rc<Body>`, so everything that changes after construction lives in a
//! `Cell`.
//!
//! # Sleeping
//!
//! With `allow_sleep` set, [`Body::sleep_tick`] drives the state machine:
//!
//! ```text
//! Awake --(speed < limit)--> Sleepy --(time_limit elapsed)--> Sleeping
//!   ^                          |                                 |
//!   +-------(speed > limit)----+------------ wake_up() ----------+
//! ```
//!
//! Every transition is announced on the body's own dispatcher (`sleepy`,
//! `sleep`, `wakeup`). Waking a body that is only sleepy is silent.
//!
//! # Example
//! ```
//! use std::rc::Rc;
//! use simevents::components::body::Body;
//! use simevents::components::shape::Shape;
//! use glam::Vec3;
//!
//! let body = Rc::new(
//!     Body::new()
//!         .with_shape(Shape::sphere(0.5))
//!         .with_velocity(Vec3::new(1.0, 0.0, 0.0))
//!         .with_sleep_limits(0.1, 1.0),
//! );
//! body.sleep_tick(0.0);
//! assert!(body.is_awake());
//! ```

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use glam::Vec3;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::components::shape::Shape;
use crate::events::dispatcher::{EventDispatcher, EventTarget};
use crate::events::sleep::{SleepEvent, SleepyEvent, WakeUpEvent};

const DEFAULT_SLEEP_SPEED_LIMIT: f32 = 0.1;
const DEFAULT_SLEEP_TIME_LIMIT: f32 = 1.0;

thread_local! {
    static NEXT_BODY_ID: Cell<u32> = const { Cell::new(0) };
}

/// Body identifier, unique within the thread that created the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u32);

impl BodyId {
    fn next() -> Self {
        NEXT_BODY_ID.with(|next| {
            let id = next.get();
            next.set(id + 1);
            BodyId(id)
        })
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "body{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepState {
    Awake,
    Sleepy,
    Sleeping,
}

/// A simulated body.
#[derive(Debug)]
pub struct Body {
    id: BodyId,
    events: EventDispatcher,
    shapes: Vec<Rc<Shape>>,
    velocity: Cell<Vec3>,
    /// Whether [`Body::sleep_tick`] may put this body to sleep.
    pub allow_sleep: bool,
    /// Speed under which the body counts as resting.
    pub sleep_speed_limit: f32,
    /// Seconds the body must stay sleepy before it falls asleep.
    pub sleep_time_limit: f32,
    sleep_state: Cell<SleepState>,
    time_last_sleepy: Cell<f32>,
}

impl Default for Body {
    fn default() -> Self {
        Self::new()
    }
}

impl Body {
    /// Create an awake body at rest, with no shapes and default sleep limits.
    pub fn new() -> Self {
        Self {
            id: BodyId::next(),
            events: EventDispatcher::new(),
            shapes: Vec::new(),
            velocity: Cell::new(Vec3::ZERO),
            allow_sleep: true,
            sleep_speed_limit: DEFAULT_SLEEP_SPEED_LIMIT,
            sleep_time_limit: DEFAULT_SLEEP_TIME_LIMIT,
            sleep_state: Cell::new(SleepState::Awake),
            time_last_sleepy: Cell::new(0.0),
        }
    }

    /// Attach a shape.
    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shapes.push(Rc::new(shape));
        self
    }

    pub fn with_velocity(self, velocity: Vec3) -> Self {
        self.velocity.set(velocity);
        self
    }

    pub fn with_allow_sleep(mut self, allow_sleep: bool) -> Self {
        self.allow_sleep = allow_sleep;
        self
    }

    /// Set the speed and time limits used by [`Body::sleep_tick`].
    pub fn with_sleep_limits(mut self, speed_limit: f32, time_limit: f32) -> Self {
        self.sleep_speed_limit = speed_limit;
        self.sleep_time_limit = time_limit;
        self
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn shapes(&self) -> &[Rc<Shape>] {
        &self.shapes
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity.get()
    }

    /// Set the velocity. The sleep state is left untouched.
    pub fn set_velocity(&self, velocity: Vec3) {
        self.velocity.set(velocity);
    }

    pub fn sleep_state(&self) -> SleepState {
        self.sleep_state.get()
    }

    pub fn is_awake(&self) -> bool {
        self.sleep_state.get() == SleepState::Awake
    }

    pub fn is_sleeping(&self) -> bool {
        self.sleep_state.get() == SleepState::Sleeping
    }

    /// Advance the sleep state machine to simulation time `time`.
    ///
    /// Does nothing when sleeping is not allowed or the body is already
    /// asleep.
    pub fn sleep_tick(&self, time: f32) {
        if !self.allow_sleep {
            return;
        }
        let speed_sq = self.velocity.get().length_squared();
        let limit_sq = self.sleep_speed_limit * self.sleep_speed_limit;
        match self.sleep_state.get() {
            SleepState::Awake if speed_sq < limit_sq => {
                self.sleep_state.set(SleepState::Sleepy);
                self.time_last_sleepy.set(time);
                debug!("{} is sleepy at t={}", self.id, time);
                self.events.dispatch_event(&mut SleepyEvent::new());
            }
            SleepState::Sleepy if speed_sq > limit_sq => self.wake_up(),
            SleepState::Sleepy if time - self.time_last_sleepy.get() > self.sleep_time_limit => {
                self.sleep();
            }
            _ => {}
        }
    }

    /// Put the body to sleep and stop it. Announces `sleep` only if it was
    /// not already sleeping.
    pub fn sleep(&self) {
        if self.is_sleeping() {
            return;
        }
        self.sleep_state.set(SleepState::Sleeping);
        self.velocity.set(Vec3::ZERO);
        debug!("{} fell asleep", self.id);
        self.events.dispatch_event(&mut SleepEvent::new());
    }

    /// Wake the body. Announces `wakeup` only if it was sleeping.
    pub fn wake_up(&self) {
        let previous = self.sleep_state.replace(SleepState::Awake);
        if previous == SleepState::Sleeping {
            debug!("{} woke up", self.id);
            self.events.dispatch_event(&mut WakeUpEvent::new());
        }
    }
}

impl EventTarget for Body {
    fn events(&self) -> &EventDispatcher {
        &self.events
    }
}
