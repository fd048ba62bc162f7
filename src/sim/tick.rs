//! Fixed timestep simulation tick
//!
//! One call advances the game by exactly one frame. There is no delta-time
//! scaling: velocities are in field units per tick.

use serde::{Deserialize, Serialize};

use super::collision::{
    ball_brick_contact, ball_paddle_contact, crosses_ceiling, crosses_side_wall, falls_out,
    flip_x, flip_y,
};
use super::state::{Ball, BrickGrid, GameState, Paddle, Rules};
use crate::consts::*;

/// Input snapshot for a single tick (which movement keys are held)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
}

impl TickInput {
    pub const NONE: TickInput = TickInput {
        left: false,
        right: false,
    };
    pub const LEFT: TickInput = TickInput {
        left: true,
        right: false,
    };
    pub const RIGHT: TickInput = TickInput {
        left: false,
        right: true,
    };

    /// Net paddle displacement for this tick. Both keys cancel out.
    pub fn paddle_delta(&self) -> f32 {
        let mut dx = 0.0;
        if self.left {
            dx -= PADDLE_SPEED;
        }
        if self.right {
            dx += PADDLE_SPEED;
        }
        dx
    }
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput, rules: &Rules) {
    if state.game_over {
        return;
    }

    // Board-clear is checked before anything moves
    if rules.has_game_over && state.bricks.is_cleared() {
        state.game_over = true;
        log::info!("Board cleared, game over with score {}", state.score);
        return;
    }

    state.paddle.shift(input.paddle_delta());

    let ball = &mut state.ball;
    ball.pos += ball.vel;

    // Walls only reflect; the ball is not pushed back inside
    let bounds = ball.bounds();
    if crosses_side_wall(&bounds, FIELD_WIDTH) {
        ball.vel = flip_x(ball.vel);
    }
    if crosses_ceiling(&bounds, rules.top_offset) {
        ball.vel = flip_y(ball.vel);
    }

    if falls_out(&bounds, FIELD_HEIGHT) {
        *ball = Ball::respawn();
        state.score -= rules.miss_penalty;
        log::debug!("Miss, score now {}", state.score);
    }

    if ball_paddle_contact(&ball.bounds(), &state.paddle.bounds()) {
        ball.vel = flip_y(ball.vel);
        ball.pos.y = Paddle::TOP - BALL_SIZE;
    }

    // Full scan, no early exit: each hit flips vy again
    let ball_bounds = ball.bounds();
    let mut hits = 0;
    for col in 0..BRICK_COLUMNS {
        for row in 0..BRICK_ROWS {
            if !state.bricks.is_present(col, row) {
                continue;
            }
            let brick = BrickGrid::cell_bounds(col, row, rules.top_offset);
            if ball_brick_contact(&ball_bounds, &brick) {
                state.bricks.clear(col, row);
                state.score += 1;
                ball.vel = flip_y(ball.vel);
                hits += 1;
                log::trace!("Brick ({}, {}) destroyed", col, row);
            }
        }
    }
    if hits > 1 {
        log::debug!("{} bricks destroyed in one tick", hits);
    }
}
