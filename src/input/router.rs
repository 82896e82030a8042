use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::Rng;
use tracing::trace;

use crate::game::{Direction, GameEngine, GameState, Intent};

/// What a key means, before any phase rules are checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Intent(Intent),
    Quit,
    None,
}

/// What happened after a key was routed into the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// The intent was legal and changed the game
    Applied(Intent),
    /// The intent was not legal in the current phase
    Ignored(Intent),
    /// The player asked to leave
    Quit,
    /// The key has no binding, or was a release/repeat event
    Unbound,
}

/// Maps key events to intents and applies them to the game
pub struct InputRouter;

impl InputRouter {
    pub fn new() -> Self {
        Self
    }

    pub fn map_key(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Intent(Intent::Turn(Direction::Up)),
            KeyCode::Down => KeyAction::Intent(Intent::Turn(Direction::Down)),
            KeyCode::Left => KeyAction::Intent(Intent::Turn(Direction::Left)),
            KeyCode::Right => KeyAction::Intent(Intent::Turn(Direction::Right)),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => {
                KeyAction::Intent(Intent::Turn(Direction::Up))
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                KeyAction::Intent(Intent::Turn(Direction::Down))
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                KeyAction::Intent(Intent::Turn(Direction::Left))
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                KeyAction::Intent(Intent::Turn(Direction::Right))
            }

            // Controls
            KeyCode::Char(' ') | KeyCode::Enter => KeyAction::Intent(Intent::Start),
            KeyCode::Char('p') | KeyCode::Char('P') => KeyAction::Intent(Intent::Pause),
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Intent(Intent::Restart),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }

    /// Map a key and, if it carries an intent, apply it to the game
    pub fn route<R: Rng>(
        &self,
        key: KeyEvent,
        engine: &mut GameEngine<R>,
        state: &mut GameState,
    ) -> RouteOutcome {
        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return RouteOutcome::Unbound;
        }

        match self.map_key(key) {
            KeyAction::Intent(intent) => {
                if engine.apply(state, intent) {
                    RouteOutcome::Applied(intent)
                } else {
                    trace!(?intent, phase = ?state.phase(), "Intent ignored");
                    RouteOutcome::Ignored(intent)
                }
            }
            KeyAction::Quit => RouteOutcome::Quit,
            KeyAction::None => RouteOutcome::Unbound,
        }
    }
}

impl Default for InputRouter {
    fn default() -> Self {
        Self::new()
    }
}
