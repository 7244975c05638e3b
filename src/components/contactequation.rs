//! Contact equation between two bodies.
//!
//! A [`ContactEquation`] is what a narrowphase produces for every touching
//! pair. This crate does not solve it; the world only uses it to announce
//! `collide` and to track which pairs are in contact from step to step.

use std::rc::Rc;

use glam::Vec3;

use crate::components::body::Body;
use crate::components::shape::Shape;

#[derive(Debug, Clone)]
pub struct ContactEquation {
    pub body_a: Rc<Body>,
    pub body_b: Rc<Body>,
    /// Shape of `body_a` involved, if known.
    pub shape_a: Option<Rc<Shape>>,
    /// Shape of `body_b` involved, if known.
    pub shape_b: Option<Rc<Shape>>,
    /// Contact normal, pointing from `body_a` towards `body_b`.
    pub normal: Vec3,
    /// Penetration depth. Positive when the shapes overlap.
    pub depth: f32,
}

impl ContactEquation {
    pub fn new(body_a: Rc<Body>, body_b: Rc<Body>) -> Self {
        Self {
            body_a,
            body_b,
            shape_a: None,
            shape_b: None,
            normal: Vec3::ZERO,
            depth: 0.0,
        }
    }

    /// Contact between the first shapes of both bodies.
    pub fn between_first_shapes(body_a: Rc<Body>, body_b: Rc<Body>) -> Self {
        let shape_a = body_a.shapes().first().cloned();
        let shape_b = body_b.shapes().first().cloned();
        Self::new(body_a, body_b).with_shapes(shape_a, shape_b)
    }

    pub fn with_shapes(mut self, shape_a: Option<Rc<Shape>>, shape_b: Option<Rc<Shape>>) -> Self {
        self.shape_a = shape_a;
        self.shape_b = shape_b;
        self
    }

    pub fn with_normal(mut self, normal: Vec3, depth: f32) -> Self {
        self.normal = normal;
        self.depth = depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_between_first_shapes() {
        let a = Rc::new(Body::new().with_shape(Shape::sphere(1.0)));
        let b = Rc::new(Body::new());
        let eq = ContactEquation::between_first_shapes(Rc::clone(&a), Rc::clone(&b));
        assert_eq!(eq.shape_a.as_ref().map(|s| s.id()), Some(a.shapes()[0].id()));
        assert!(eq.shape_b.is_none());
    }

    #[test]
    fn test_with_normal() {
        let a = Rc::new(Body::new());
        let b = Rc::new(Body::new());
        let eq = ContactEquation::new(Rc::clone(&a), Rc::clone(&b))
            .with_normal(Vec3::new(0.0, 1.0, 0.0), 0.01);
        assert_eq!(eq.normal, Vec3::Y);
        assert_eq!(eq.depth, 0.01);
    }
}
