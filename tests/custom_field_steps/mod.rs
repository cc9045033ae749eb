//! Step definitions for custom field behaviour scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
