//! Terminal presentation: ratatui drawing and terminal lifetime

pub mod renderer;
pub mod terminal;

pub use renderer::Renderer;
pub use terminal::{SnakeTerminal, TerminalSession};
