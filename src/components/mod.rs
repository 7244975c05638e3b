//! Simulation objects that produce events.
//!
//! Submodules overview:
//! - [`body`] – rigid body with velocity, shapes and a sleep state machine
//! - [`contactequation`] – contact between two bodies reported by a narrowphase
//! - [`shape`] – collision geometry attached to a body

pub mod body;
pub mod contactequation;
pub mod shape;
