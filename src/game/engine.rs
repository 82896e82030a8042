use super::{
    action::{Direction, Intent},
    config::GameConfig,
    state::{CollisionKind, GameState, Phase, Position, Snake},
};
use rand::Rng;
use rand::seq::IteratorRandom;
use tracing::{debug, info};

/// What a single tick did to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game was not running, nothing changed
    Idle,
    /// The snake moved without eating
    Moved,
    /// The snake ate food and grew by one segment
    Ate {
        /// Score after eating
        score: u32,
        /// Speed after eating (possibly bumped)
        speed: u32,
    },
    /// The snake hit something and the game is over
    Collided(CollisionKind),
    /// The snake covers every cell, so no food can be placed and the game is over
    BoardFilled,
}

/// The game engine that handles all game logic
pub struct GameEngine<R = rand::rngs::ThreadRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<rand::rngs::ThreadRng> {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create a game engine drawing food positions from `rng`
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build a fresh game waiting for its first start intent
    pub fn new_game(&mut self) -> GameState {
        let center = Position::new(
            (self.config.grid_width / 2) as i32,
            (self.config.grid_height / 2) as i32,
        );
        let snake = Snake::new(center, Direction::Right);

        let mut state = GameState::from_parts(
            snake,
            None,
            self.config.grid_width,
            self.config.grid_height,
            self.config.base_speed,
            Phase::NotStarted,
        );
        state.food = self.spawn_food(&state);
        state
    }

    /// Apply an intent, returning whether it changed anything
    pub fn apply(&mut self, state: &mut GameState, intent: Intent) -> bool {
        match intent {
            Intent::Start => self.start(state),
            Intent::Pause => self.pause(state),
            Intent::Turn(direction) => self.turn(state, direction),
            Intent::Restart => self.restart(state),
        }
    }

    /// Start a new game or resume a paused one
    pub fn start(&mut self, state: &mut GameState) -> bool {
        match state.phase {
            Phase::NotStarted => {
                info!("Game started");
                state.phase = Phase::Running;
                true
            }
            Phase::Paused => {
                debug!("Game resumed");
                state.phase = Phase::Running;
                true
            }
            Phase::Running | Phase::GameOver => false,
        }
    }

    /// Pause a running game
    pub fn pause(&mut self, state: &mut GameState) -> bool {
        if state.phase != Phase::Running {
            return false;
        }
        debug!(score = state.score, "Game paused");
        state.phase = Phase::Paused;
        true
    }

    /// Queue a direction for the next tick (prevent 180° turns)
    pub fn turn(&mut self, state: &mut GameState, direction: Direction) -> bool {
        if state.phase != Phase::Running || state.direction().is_opposite(direction) {
            return false;
        }
        state.pending_direction = direction;
        true
    }

    /// Replace a finished game with a fresh one that is already running
    pub fn restart(&mut self, state: &mut GameState) -> bool {
        if state.phase != Phase::GameOver {
            return false;
        }
        *state = self.new_game();
        state.phase = Phase::Running;
        info!("Game restarted");
        true
    }

    /// Execute one step of the game
    pub fn tick(&mut self, state: &mut GameState) -> TickOutcome {
        if state.phase != Phase::Running {
            return TickOutcome::Idle;
        }

        state.snake.set_direction(state.pending_direction);
        let new_head = state.head().moved_in_direction(state.direction());

        if let Some(kind) = Self::check_collision(state, new_head) {
            state.phase = Phase::GameOver;
            info!(score = state.score, cause = ?kind, "Game over");
            return TickOutcome::Collided(kind);
        }

        let ate_food = state.food == Some(new_head);
        state.snake.advance(new_head, ate_food);
        state.ticks += 1;

        if !ate_food {
            return TickOutcome::Moved;
        }

        state.score += self.config.food_reward;
        state.food = self.spawn_food(state);
        if self.config.speed_up_every > 0
            && state.score % self.config.speed_up_every == 0
            && state.speed < self.config.max_speed
        {
            state.speed += 1;
            debug!(speed = state.speed, "Speed increased");
        }
        debug!(score = state.score, length = state.snake.len(), "Food eaten");

        if state.food.is_none() {
            state.phase = Phase::GameOver;
            info!(score = state.score, "Board filled");
            return TickOutcome::BoardFilled;
        }

        TickOutcome::Ate {
            score: state.score,
            speed: state.speed,
        }
    }

    /// Check if the new head position causes a collision
    fn check_collision(state: &GameState, pos: Position) -> Option<CollisionKind> {
        if !state.is_in_bounds(pos) {
            return Some(CollisionKind::Wall);
        }

        // The tail has not moved yet, so stepping onto it is fatal too
        if state.is_occupied_by_snake(pos) {
            return Some(CollisionKind::SelfCollision);
        }

        None
    }

    /// Pick a free cell for food.
    ///
    /// Rejection sampling inside the inset rectangle first, then a uniform
    /// pick over its enumerated free cells, then over any free cell of the
    /// grid. `None` means the snake covers the whole grid.
    fn spawn_food(&mut self, state: &GameState) -> Option<Position> {
        let inset = self.config.food_inset;
        let (x_range, y_range) = (
            inset..state.grid_width.saturating_sub(inset),
            inset..state.grid_height.saturating_sub(inset),
        );

        if !x_range.is_empty() && !y_range.is_empty() {
            for _ in 0..self.config.food_placement_attempts {
                let pos = Position::new(
                    self.rng.gen_range(x_range.clone()) as i32,
                    self.rng.gen_range(y_range.clone()) as i32,
                );
                if !state.is_occupied_by_snake(pos) {
                    return Some(pos);
                }
            }

            let free_inset = Self::free_cells(state, x_range.clone(), y_range.clone());
            if let Some(pos) = free_inset.choose(&mut self.rng) {
                debug!("Food placed by enumerating the inset rectangle");
                return Some(pos);
            }
        }

        let free_anywhere = Self::free_cells(state, 0..state.grid_width, 0..state.grid_height);
        free_anywhere.choose(&mut self.rng)
    }

    fn free_cells(
        state: &GameState,
        xs: std::ops::Range<usize>,
        ys: std::ops::Range<usize>,
    ) -> impl Iterator<Item = Position> + '_ {
        ys.flat_map(move |y| xs.clone().map(move |x| Position::new(x as i32, y as i32)))
            .filter(move |pos| !state.is_occupied_by_snake(*pos))
    }
}
