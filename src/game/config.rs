use serde::{Deserialize, Serialize};

use crate::error::{SnakeError, SnakeResult};

/// Smallest grid side that still leaves room for food inside the border
pub const MIN_GRID_SIDE: usize = 3;

/// Largest grid side; keeps cell coordinates in `i32` and the drawn grid in
/// `u16` terminal geometry
pub const MAX_GRID_SIDE: usize = 1024;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,

    /// Ticks per second at the start of every game
    pub base_speed: u32,
    /// Speed never rises above this
    pub max_speed: u32,
    /// Points awarded per food eaten
    pub food_reward: u32,
    /// Speed goes up by one each time the score reaches a multiple of this
    pub speed_up_every: u32,

    /// Cells left free of food along each edge of the grid
    pub food_inset: usize,
    /// Random draws tried before falling back to enumerating free cells
    pub food_placement_attempts: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 26,
            grid_height: 20,
            base_speed: 12,
            max_speed: 20,
            food_reward: 10,
            speed_up_every: 50,
            food_inset: 1,
            food_placement_attempts: 64,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Reject grids that cannot host a game
    pub fn validate(&self) -> SnakeResult<()> {
        let sides = MIN_GRID_SIDE..=MAX_GRID_SIDE;
        if !sides.contains(&self.grid_width) || !sides.contains(&self.grid_height) {
            return Err(SnakeError::InvalidGrid {
                width: self.grid_width,
                height: self.grid_height,
                min: MIN_GRID_SIDE,
                max: MAX_GRID_SIDE,
            });
        }
        Ok(())
    }
}
