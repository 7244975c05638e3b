//! Contact and collision events.
//!
//! Emitted by [`World::step`](crate::world::World::step) from the contact
//! equations reported during the step:
//!
//! - [`CollideEvent`] is dispatched on *each* body of a contact, with the
//!   other body and the equation, every step the contact is reported.
//! - [`BeginContactEvent`] / [`EndContactEvent`] are dispatched on the world
//!   when a pair of bodies starts or stops touching between two steps.
//! - [`BeginShapeContactEvent`] / [`EndShapeContactEvent`] are the same
//!   transitions per shape pair. They go to the world and to both shapes.
//!
//! No ordering between `a` and `b` is guaranteed beyond the pair being
//! reported with the lower id first.

use std::rc::Rc;

use crate::components::body::Body;
use crate::components::contactequation::ContactEquation;
use crate::components::shape::Shape;
use crate::events::TargetId;

/// Two bodies started touching.
#[derive(Debug, Clone, Default)]
pub struct BeginContactEvent {
    pub body_a: Option<Rc<Body>>,
    pub body_b: Option<Rc<Body>>,
    pub(crate) target: Option<TargetId>,
}

impl BeginContactEvent {
    pub fn new(body_a: Option<Rc<Body>>, body_b: Option<Rc<Body>>) -> Self {
        Self {
            body_a,
            body_b,
            target: None,
        }
    }
}

/// Two bodies stopped touching.
#[derive(Debug, Clone, Default)]
pub struct EndContactEvent {
    pub body_a: Option<Rc<Body>>,
    pub body_b: Option<Rc<Body>>,
    pub(crate) target: Option<TargetId>,
}

impl EndContactEvent {
    pub fn new(body_a: Option<Rc<Body>>, body_b: Option<Rc<Body>>) -> Self {
        Self {
            body_a,
            body_b,
            target: None,
        }
    }
}

/// Two shapes started touching.
#[derive(Debug, Clone, Default)]
pub struct BeginShapeContactEvent {
    pub body_a: Option<Rc<Body>>,
    pub body_b: Option<Rc<Body>>,
    pub shape_a: Option<Rc<Shape>>,
    pub shape_b: Option<Rc<Shape>>,
    pub(crate) target: Option<TargetId>,
}

impl BeginShapeContactEvent {
    pub fn new(
        body_a: Option<Rc<Body>>,
        body_b: Option<Rc<Body>>,
        shape_a: Option<Rc<Shape>>,
        shape_b: Option<Rc<Shape>>,
    ) -> Self {
        Self {
            body_a,
            body_b,
            shape_a,
            shape_b,
            target: None,
        }
    }
}

/// Two shapes stopped touching.
#[derive(Debug, Clone, Default)]
pub struct EndShapeContactEvent {
    pub body_a: Option<Rc<Body>>,
    pub body_b: Option<Rc<Body>>,
    pub shape_a: Option<Rc<Shape>>,
    pub shape_b: Option<Rc<Shape>>,
    pub(crate) target: Option<TargetId>,
}

impl EndShapeContactEvent {
    pub fn new(
        body_a: Option<Rc<Body>>,
        body_b: Option<Rc<Body>>,
        shape_a: Option<Rc<Shape>>,
        shape_b: Option<Rc<Shape>>,
    ) -> Self {
        Self {
            body_a,
            body_b,
            shape_a,
            shape_b,
            target: None,
        }
    }
}

/// The receiving body collided with `body` this step.
#[derive(Debug, Clone, Default)]
pub struct CollideEvent {
    /// The other body of the contact.
    pub body: Option<Rc<Body>>,
    /// The contact equation produced for the pair.
    pub contact: Option<Rc<ContactEquation>>,
    pub(crate) target: Option<TargetId>,
}

impl CollideEvent {
    pub fn new(body: Option<Rc<Body>>, contact: Option<Rc<ContactEquation>>) -> Self {
        Self {
            body,
            contact,
            target: None,
        }
    }
}
