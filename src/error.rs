//! Error types for the terminal session.
//!
//! The simulation itself never fails: collisions and ignored intents are
//! ordinary state transitions. Everything here comes from acquiring or
//! driving the terminal, or from a grid that cannot host a game.

use derive_more::{Display, Error};

/// Failure raised while setting up, running, or tearing down a game session.
#[derive(Debug, Display, Error)]
pub enum SnakeError {
    /// Raw mode, the alternate screen, or the ratatui terminal could not be acquired.
    #[display("failed to set up terminal: {source}")]
    TerminalSetup {
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The terminal could not be returned to its original state.
    #[display("failed to restore terminal: {source}")]
    TerminalRestore {
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// A frame could not be drawn.
    #[display("failed to draw frame: {source}")]
    Draw {
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The terminal event stream reported an error.
    #[display("failed to read terminal input: {source}")]
    Input {
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The grid is too small to place food away from the border, or too
    /// large to address and draw.
    #[display("grid {width}x{height} is out of range, each side must be {min} to {max} cells")]
    InvalidGrid {
        /// Requested width in cells.
        width: usize,
        /// Requested height in cells.
        height: usize,
        /// Smallest accepted side length.
        min: usize,
        /// Largest accepted side length.
        max: usize,
    },
    /// The terminal cannot show the whole grid.
    #[display("terminal is {columns}x{rows}, need {needed_columns}x{needed_rows}")]
    TerminalTooSmall {
        /// Terminal width in columns.
        columns: u16,
        /// Terminal height in rows.
        rows: u16,
        /// Columns needed to draw the grid and HUD.
        needed_columns: u16,
        /// Rows needed to draw the grid and HUD.
        needed_rows: u16,
    },
}

/// Convenience alias for results carrying a [`SnakeError`].
pub type SnakeResult<T> = Result<T, SnakeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_invalid_grid_message() {
        let err = SnakeError::InvalidGrid {
            width: 2,
            height: 8,
            min: 3,
            max: 1024,
        };
        assert_eq!(
            err.to_string(),
            "grid 2x8 is out of range, each side must be 3 to 1024 cells"
        );
        assert!(err.source().is_none());
    }

    #[test]
    fn test_io_source_is_kept() {
        let err = SnakeError::TerminalSetup {
            source: std::io::Error::other("no tty"),
        };
        assert_eq!(err.to_string(), "failed to set up terminal: no tty");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_terminal_too_small_message() {
        let err = SnakeError::TerminalTooSmall {
            columns: 40,
            rows: 12,
            needed_columns: 54,
            needed_rows: 24,
        };
        assert_eq!(err.to_string(), "terminal is 40x12, need 54x24");
    }
}
