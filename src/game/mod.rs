//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The terminal loop drives it through intents and ticks; the renderer only reads it.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, Intent};
pub use config::{GameConfig, MAX_GRID_SIDE, MIN_GRID_SIDE};
pub use engine::{GameEngine, TickOutcome};
pub use state::{CollisionKind, GameState, Phase, Position, Snake};
