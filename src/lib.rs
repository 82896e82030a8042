//! Snake Arcade - the classic snake game in the terminal
//!
//! This library provides:
//! - Core game logic: phases, ticks, food placement (game module)
//! - Keyboard intent routing (input module)
//! - TUI rendering and terminal lifetime (render module)
//! - In-process session statistics (metrics module)
//! - The interactive game loop (modes module)

pub mod error;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;

pub use error::{SnakeError, SnakeResult};
