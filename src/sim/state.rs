//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in [`GameState`]. The rule flags
//! that distinguish the game variants live in [`Rules`] and never change
//! during a game.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;

/// Variant flags for the simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    /// Clearing the board ends the game and freezes the simulation
    pub has_game_over: bool,
    /// Score deducted each time the ball falls past the paddle
    pub miss_penalty: i32,
    /// Top boundary of the playfield (height of the score bar)
    pub top_offset: f32,
}

impl Rules {
    /// Score bar, miss penalty and a terminal state when the board is cleared
    pub const CLASSIC: Rules = Rules {
        has_game_over: true,
        miss_penalty: MISS_PENALTY,
        top_offset: SCORE_BAR_HEIGHT,
    };

    /// No score bar, no penalty, play never ends
    pub const ENDLESS: Rules = Rules {
        has_game_over: false,
        miss_penalty: 0,
        top_offset: 0.0,
    };
}

impl Default for Rules {
    fn default() -> Self {
        Self::CLASSIC
    }
}

/// The ball, positioned by its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Per-tick velocity
    pub vel: Vec2,
}

impl Ball {
    /// Ball at the start of a game, centred in the playfield below the top boundary
    pub fn serve(rules: &Rules) -> Self {
        Self {
            pos: Vec2::new(
                ((FIELD_WIDTH - BALL_SIZE) / 2.0).floor(),
                ((FIELD_HEIGHT + rules.top_offset - BALL_SIZE) / 2.0).floor(),
            ),
            vel: Self::start_velocity(),
        }
    }

    /// Ball after a miss. The respawn point ignores the score bar.
    pub fn respawn() -> Self {
        Self {
            pos: Self::respawn_point(),
            vel: Self::start_velocity(),
        }
    }

    pub fn respawn_point() -> Vec2 {
        Vec2::new(
            ((FIELD_WIDTH + BALL_SIZE) / 2.0).floor(),
            ((FIELD_HEIGHT + BALL_SIZE) / 2.0).floor(),
        )
    }

    #[inline]
    pub fn start_velocity() -> Vec2 {
        Vec2::new(BALL_START_VX, BALL_START_VY)
    }

    /// Bounding box at the current position
    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(BALL_SIZE))
    }

    /// Bottom edge (y grows downward)
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + BALL_SIZE
    }
}

/// The player's paddle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            x: (FIELD_WIDTH - PADDLE_WIDTH) / 2.0,
        }
    }
}

impl Paddle {
    /// Top edge, fixed at the bottom of the field
    pub const TOP: f32 = FIELD_HEIGHT - PADDLE_HEIGHT;

    /// Move by `dx` and clamp so the paddle stays fully inside the field
    pub fn shift(&mut self, dx: f32) {
        self.x = (self.x + dx).clamp(0.0, FIELD_WIDTH - PADDLE_WIDTH);
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(
            Vec2::new(self.x, Self::TOP),
            Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
        )
    }
}

/// Fixed grid of bricks, indexed `[column][row]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrickGrid {
    cells: [[bool; BRICK_ROWS]; BRICK_COLUMNS],
}

impl Default for BrickGrid {
    fn default() -> Self {
        Self::full()
    }
}

impl BrickGrid {
    /// Every cell present
    pub fn full() -> Self {
        Self {
            cells: [[true; BRICK_ROWS]; BRICK_COLUMNS],
        }
    }

    /// Every cell cleared
    pub fn empty() -> Self {
        Self {
            cells: [[false; BRICK_ROWS]; BRICK_COLUMNS],
        }
    }

    /// Whether the brick at `(col, row)` is still standing. Out of range is empty.
    pub fn is_present(&self, col: usize, row: usize) -> bool {
        self.cells
            .get(col)
            .and_then(|c| c.get(row))
            .copied()
            .unwrap_or(false)
    }

    /// Remove a brick. Returns true if it was standing.
    pub fn clear(&mut self, col: usize, row: usize) -> bool {
        match self.cells.get_mut(col).and_then(|c| c.get_mut(row)) {
            Some(cell) if *cell => {
                *cell = false;
                true
            }
            _ => false,
        }
    }

    /// Number of bricks still standing
    pub fn remaining(&self) -> usize {
        self.cells.iter().flatten().filter(|&&b| b).count()
    }

    pub fn is_cleared(&self) -> bool {
        self.cells.iter().flatten().all(|&b| !b)
    }

    /// Standing bricks in column-then-row order
    pub fn present(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells.iter().enumerate().flat_map(|(col, rows)| {
            rows.iter()
                .enumerate()
                .filter(|(_, present)| **present)
                .map(move |(row, _)| (col, row))
        })
    }

    /// Rectangle of the cell at `(col, row)` for the given top boundary
    pub fn cell_bounds(col: usize, row: usize, top_offset: f32) -> Aabb {
        Aabb::new(
            Vec2::new(
                col as f32 * (BRICK_WIDTH + BRICK_GAP),
                row as f32 * (BRICK_HEIGHT + BRICK_GAP) + top_offset,
            ),
            Vec2::new(BRICK_WIDTH, BRICK_HEIGHT),
        )
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub paddle: Paddle,
    pub ball: Ball,
    pub bricks: BrickGrid,
    /// Can go negative under a miss penalty
    pub score: i32,
    /// Terminal flag; set once the board is cleared under rules with a game over
    pub game_over: bool,
}

impl GameState {
    /// Fresh game: paddle centred, ball served, full grid
    pub fn new(rules: &Rules) -> Self {
        Self {
            paddle: Paddle::default(),
            ball: Ball::serve(rules),
            bricks: BrickGrid::full(),
            score: 0,
            game_over: false,
        }
    }
}
