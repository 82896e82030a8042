use std::collections::VecDeque;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::action::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at the front
    body: VecDeque<Position>,
    /// Direction applied on the most recent tick
    direction: Direction,
}

impl Snake {
    /// Create a single-cell snake
    pub fn new(head: Position, direction: Direction) -> Self {
        Self {
            body: VecDeque::from([head]),
            direction,
        }
    }

    /// Create a snake from explicit segments, head first.
    ///
    /// Returns `None` for an empty body.
    pub fn from_segments(
        segments: impl IntoIterator<Item = Position>,
        direction: Direction,
    ) -> Option<Self> {
        let body: VecDeque<Position> = segments.into_iter().collect();
        if body.is_empty() {
            return None;
        }
        Some(Self { body, direction })
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// All segments, head first
    pub fn segments(&self) -> impl ExactSizeIterator<Item = &Position> + '_ {
        self.body.iter()
    }

    /// Check if any segment, head included, sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake has no segments (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub(crate) fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Push a new head; drop the tail unless growing
    pub(crate) fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
    }
}

/// High-level mode of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the first start intent
    #[default]
    NotStarted,
    /// Ticks advance the snake
    Running,
    /// Ticks are ignored until a start intent resumes play
    Paused,
    /// Terminal until restart
    GameOver,
}

/// Complete game state.
///
/// Fields are only mutated through [`GameEngine`](super::GameEngine); the
/// accessors form the read-only snapshot handed to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub(crate) snake: Snake,
    pub(crate) pending_direction: Direction,
    pub(crate) food: Option<Position>,
    pub(crate) grid_width: usize,
    pub(crate) grid_height: usize,
    pub(crate) score: u32,
    pub(crate) speed: u32,
    pub(crate) ticks: u64,
    pub(crate) phase: Phase,
}

impl GameState {
    /// Assemble a state from its parts.
    ///
    /// The pending direction starts equal to the snake's direction and the
    /// score at zero. Used for fresh games and for setting up scenarios.
    pub fn from_parts(
        snake: Snake,
        food: Option<Position>,
        grid_width: usize,
        grid_height: usize,
        speed: u32,
        phase: Phase,
    ) -> Self {
        Self {
            pending_direction: snake.direction(),
            snake,
            food,
            grid_width,
            grid_height,
            score: 0,
            speed,
            ticks: 0,
            phase,
        }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn head(&self) -> Position {
        self.snake.head()
    }

    /// Direction applied on the most recent tick
    pub fn direction(&self) -> Direction {
        self.snake.direction()
    }

    /// Direction that the next tick will apply
    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    /// `None` only once the snake fills the whole grid
    pub fn food(&self) -> Option<Position> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Ticks per second
    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn grid_width(&self) -> usize {
        self.grid_width
    }

    pub fn grid_height(&self) -> usize {
        self.grid_height
    }

    /// Number of ticks that moved the snake
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Wall-clock time between ticks at the current speed
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.speed.max(1)))
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.grid_width as i32
            && pos.y >= 0
            && pos.y < self.grid_height as i32
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running(snake: Snake) -> GameState {
        GameState::from_parts(snake, Some(Position::new(10, 10)), 20, 20, 12, Phase::Running)
    }

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_by(0, 1), Position::new(5, 6));
        assert_eq!(pos.moved_by(0, -1), Position::new(5, 4));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right);
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Position::new(5, 5));
        assert_eq!(snake.tail(), Position::new(5, 5));

        assert!(Snake::from_segments(Vec::<Position>::new(), Direction::Up).is_none());
    }

    #[test]
    fn test_snake_advance() {
        let mut snake = Snake::from_segments(
            [Position::new(5, 5), Position::new(4, 5), Position::new(3, 5)],
            Direction::Right,
        )
        .unwrap();

        snake.advance(Position::new(6, 5), false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(6, 5));
        assert_eq!(snake.tail(), Position::new(4, 5));

        snake.advance(Position::new(7, 5), true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Position::new(7, 5));
        assert_eq!(snake.tail(), Position::new(4, 5));
    }

    #[test]
    fn test_occupancy_includes_head() {
        let state = running(
            Snake::from_segments([Position::new(5, 5), Position::new(4, 5)], Direction::Right)
                .unwrap(),
        );
        assert!(state.is_occupied_by_snake(Position::new(5, 5)));
        assert!(state.is_occupied_by_snake(Position::new(4, 5)));
        assert!(!state.is_occupied_by_snake(Position::new(10, 10)));
    }

    #[test]
    fn test_bounds_checking() {
        let state = running(Snake::new(Position::new(5, 5), Direction::Right));

        assert!(state.is_in_bounds(Position::new(0, 0)));
        assert!(state.is_in_bounds(Position::new(19, 19)));
        assert!(!state.is_in_bounds(Position::new(-1, 0)));
        assert!(!state.is_in_bounds(Position::new(20, 0)));
        assert!(!state.is_in_bounds(Position::new(0, 20)));
    }

    #[test]
    fn test_tick_duration_follows_speed() {
        let mut state = running(Snake::new(Position::new(5, 5), Direction::Right));
        state.speed = 20;
        assert_eq!(state.tick_duration(), Duration::from_millis(50));
        state.speed = 10;
        assert_eq!(state.tick_duration(), Duration::from_millis(100));
    }

    #[test]
    fn test_from_parts_defaults() {
        let state = GameState::from_parts(
            Snake::new(Position::new(1, 1), Direction::Down),
            None,
            4,
            4,
            12,
            Phase::NotStarted,
        );
        assert_eq!(state.pending_direction(), Direction::Down);
        assert_eq!(state.score(), 0);
        assert_eq!(state.ticks(), 0);
        assert_eq!(state.phase(), Phase::NotStarted);
    }
}
