use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use rand::Rng;
use std::time::Duration;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, instrument};

use crate::error::{SnakeError, SnakeResult};
use crate::game::{GameConfig, GameEngine, GameState, Intent, TickOutcome};
use crate::input::{InputRouter, RouteOutcome};
use crate::metrics::GameMetrics;
use crate::render::{Renderer, SnakeTerminal, TerminalSession};
use ratatui::layout::Size;

/// Keyboard-driven game in the terminal
pub struct HumanMode<R = rand::rngs::ThreadRng> {
    engine: GameEngine<R>,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    router: InputRouter,
    should_quit: bool,
}

impl HumanMode<rand::rngs::ThreadRng> {
    pub fn new(config: GameConfig) -> Self {
        Self::with_engine(GameEngine::new(config))
    }
}

impl<R: Rng> HumanMode<R> {
    pub fn with_engine(mut engine: GameEngine<R>) -> Self {
        let state = engine.new_game();

        Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            router: InputRouter::new(),
            should_quit: false,
        }
    }

    /// Take over the terminal and play until the player quits
    #[instrument(skip_all)]
    pub async fn run(&mut self) -> SnakeResult<()> {
        let mut session = TerminalSession::enter()?;
        let size = session
            .terminal_mut()
            .size()
            .map_err(|source| SnakeError::TerminalSetup { source })?;
        // Dropping the session restores the terminal
        ensure_fits(size, &self.state)?;
        info!(
            width = self.state.grid_width(),
            height = self.state.grid_height(),
            "Session started"
        );

        let result = self.run_game_loop(session.terminal_mut()).await;
        let restored = session.restore();

        info!(
            games_played = self.metrics.games_played,
            high_score = self.metrics.high_score,
            "Session ended"
        );

        // The loop's error wins over a failed restore
        result.and(restored)
    }

    async fn run_game_loop(&mut self, terminal: &mut SnakeTerminal) -> SnakeResult<()> {
        let mut event_stream = EventStream::new();
        let mut next_tick = Instant::now() + self.state.tick_duration();

        self.draw(terminal)?;

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(source)) => return Err(SnakeError::Input { source }),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick, re-armed from the current speed
                _ = sleep_until(next_tick) => {
                    self.update_game();
                    let tick = self.state.tick_duration();
                    next_tick = schedule_next(next_tick, tick, Instant::now());
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }

            self.draw(terminal)?;
        }

        Ok(())
    }

    fn draw(&self, terminal: &mut SnakeTerminal) -> SnakeResult<()> {
        terminal
            .draw(|frame| self.renderer.render(frame, &self.state, &self.metrics))
            .map_err(|source| SnakeError::Draw { source })?;
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };

        match self.router.route(key, &mut self.engine, &mut self.state) {
            RouteOutcome::Applied(Intent::Restart) => self.metrics.on_game_start(),
            RouteOutcome::Applied(intent) => debug!(?intent, "Intent applied"),
            RouteOutcome::Quit => self.should_quit = true,
            RouteOutcome::Ignored(_) | RouteOutcome::Unbound => {}
        }
    }

    fn update_game(&mut self) {
        let tick = self.state.tick_duration();

        match self.engine.tick(&mut self.state) {
            TickOutcome::Idle => {}
            TickOutcome::Moved | TickOutcome::Ate { .. } => self.metrics.on_tick(tick),
            TickOutcome::Collided(_) | TickOutcome::BoardFilled => {
                self.metrics.on_game_over(self.state.score());
            }
        }
    }
}

/// Next tick deadline; a loop that fell behind restarts from `now`
fn schedule_next(previous: Instant, tick: Duration, now: Instant) -> Instant {
    let next = previous + tick;
    if next <= now { now + tick } else { next }
}

/// Refuse a terminal that would clip the grid
fn ensure_fits(size: Size, state: &GameState) -> SnakeResult<()> {
    let (needed_columns, needed_rows) =
        Renderer::required_size(state.grid_width(), state.grid_height());
    if size.width < needed_columns || size.height < needed_rows {
        return Err(SnakeError::TerminalTooSmall {
            columns: size.width,
            rows: size.height,
            needed_columns,
            needed_rows,
        });
    }
    Ok(())
}
