//! Long-lived data owned by the world or the application.
//!
//! Overview
//! - `overlapkeeper` – touching pairs of the current and previous step
//! - `simconfig` – INI-backed settings for the demo scenario
//! - `worldtime` – simulation time, delta and step count
pub mod overlapkeeper;
pub mod simconfig;
pub mod worldtime;
