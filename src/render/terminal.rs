use std::io::{Stderr, stderr};

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, instrument, warn};

use crate::error::{SnakeError, SnakeResult};

pub type SnakeTerminal = Terminal<CrosstermBackend<Stderr>>;

/// Raw-mode alternate-screen terminal held for the whole session.
///
/// Restored by [`TerminalSession::restore`], or by `Drop` on any early
/// return or unwinding panic.
pub struct TerminalSession {
    terminal: SnakeTerminal,
    active: bool,
}

impl TerminalSession {
    #[instrument]
    pub fn enter() -> SnakeResult<Self> {
        enable_raw_mode().map_err(|source| SnakeError::TerminalSetup { source })?;

        let mut stderr = stderr();
        if let Err(source) = execute!(stderr, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(SnakeError::TerminalSetup { source });
        }

        let backend = CrosstermBackend::new(stderr);
        let terminal = match Terminal::new(backend) {
            Ok(terminal) => terminal,
            Err(source) => {
                let _ = execute!(std::io::stderr(), LeaveAlternateScreen);
                let _ = disable_raw_mode();
                return Err(SnakeError::TerminalSetup { source });
            }
        };

        // From here on Drop undoes everything
        let mut session = Self {
            terminal,
            active: true,
        };
        session
            .terminal
            .hide_cursor()
            .map_err(|source| SnakeError::TerminalSetup { source })?;
        session
            .terminal
            .clear()
            .map_err(|source| SnakeError::TerminalSetup { source })?;

        debug!("Terminal acquired");
        Ok(session)
    }

    pub fn terminal_mut(&mut self) -> &mut SnakeTerminal {
        &mut self.terminal
    }

    /// Leave raw mode and the alternate screen. Safe to call more than once.
    #[instrument(skip(self))]
    pub fn restore(&mut self) -> SnakeResult<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        disable_raw_mode().map_err(|source| SnakeError::TerminalRestore { source })?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)
            .map_err(|source| SnakeError::TerminalRestore { source })?;
        self.terminal
            .show_cursor()
            .map_err(|source| SnakeError::TerminalRestore { source })?;

        debug!("Terminal restored");
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            warn!(error = %err, "Terminal left in a dirty state");
        }
    }
}
