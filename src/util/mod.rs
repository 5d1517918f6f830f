//! Shared utilities.
//!
//! Easing curves used by camera transitions.

pub mod easing;
