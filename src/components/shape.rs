//! Collision shapes attached to bodies.
//!
//! A [`Shape`] only describes geometry; contact generation happens outside
//! this crate. Each shape has its own dispatcher so code interested in a
//! single shape can subscribe to its `beginShapeContact` and
//! `endShapeContact` events instead of filtering the world's.

use std::cell::Cell;
use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::events::dispatcher::{EventDispatcher, EventTarget};

thread_local! {
    static NEXT_SHAPE_ID: Cell<u32> = const { Cell::new(0) };
}

/// Shape identifier, unique within the thread that created the shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShapeId(pub u32);

impl ShapeId {
    fn next() -> Self {
        NEXT_SHAPE_ID.with(|next| {
            let id = next.get();
            next.set(id + 1);
            ShapeId(id)
        })
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shape{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeKind {
    Sphere { radius: f32 },
    Box { half_extents: Vec3 },
    Plane,
}

#[derive(Debug)]
pub struct Shape {
    id: ShapeId,
    kind: ShapeKind,
    events: EventDispatcher,
}

impl Shape {
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            id: ShapeId::next(),
            kind,
            events: EventDispatcher::new(),
        }
    }

    pub fn sphere(radius: f32) -> Self {
        Self::new(ShapeKind::Sphere { radius })
    }

    pub fn cuboid(half_extents: Vec3) -> Self {
        Self::new(ShapeKind::Box { half_extents })
    }

    pub fn plane() -> Self {
        Self::new(ShapeKind::Plane)
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }
}

impl EventTarget for Shape {
    fn events(&self) -> &EventDispatcher {
        &self.events
    }
}
