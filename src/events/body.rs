//! World membership events.
//!
//! [`World::add_body`](crate::world::World::add_body) dispatches
//! [`AddBodyEvent`] after the body has been inserted, and
//! [`World::remove_body`](crate::world::World::remove_body) dispatches
//! [`RemoveBodyEvent`] after it has been taken out. Both are sent through
//! the world's dispatcher.

use std::rc::Rc;

use crate::components::body::Body;
use crate::events::TargetId;

/// A body has been added to the world.
#[derive(Debug, Clone, Default)]
pub struct AddBodyEvent {
    /// The body that was added.
    pub body: Option<Rc<Body>>,
    pub(crate) target: Option<TargetId>,
}

impl AddBodyEvent {
    pub fn new(body: Option<Rc<Body>>) -> Self {
        Self { body, target: None }
    }
}

/// A body has been removed from the world.
#[derive(Debug, Clone, Default)]
pub struct RemoveBodyEvent {
    /// The body that was removed.
    pub body: Option<Rc<Body>>,
    pub(crate) target: Option<TargetId>,
}

impl RemoveBodyEvent {
    pub fn new(body: Option<Rc<Body>>) -> Self {
        Self { body, target: None }
    }
}
