//! Typed event dispatch for a rigid-body simulation.
//!
//! The heart of the crate is [`events::dispatcher::EventDispatcher`]: a
//! per-object registry of listeners keyed by a closed set of event names,
//! where each name has its own payload type. Bodies, shapes and the world
//! each hold one and expose it through [`events::dispatcher::EventTarget`].
//!
//! - [`components`] – bodies, shapes, contact equations
//! - [`events`] – event names, payloads and the dispatcher
//! - [`resources`] – clock, contact-pair bookkeeping, configuration
//! - [`scenario`] – seeded demo simulation producing an event trace
//! - [`world`] – the world that owns bodies and announces step events

pub mod components;
pub mod events;
pub mod resources;
pub mod scenario;
pub mod world;
