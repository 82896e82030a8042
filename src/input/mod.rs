//! Keyboard input mapping

pub mod router;

pub use router::{InputRouter, KeyAction, RouteOutcome};
