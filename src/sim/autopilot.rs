//! Demo-mode paddle control
//!
//! Steers the paddle under the ball so the game can play itself (attract
//! screen in the browser, headless sessions on native).

use super::state::GameState;
use super::tick::TickInput;
use crate::consts::*;

/// Don't chase the ball closer than this; avoids jittering left/right every tick
const DEADZONE: f32 = PADDLE_SPEED;

/// Pick the keys that bring the paddle centre toward the ball centre
pub fn steer(state: &GameState) -> TickInput {
    if state.game_over {
        return TickInput::NONE;
    }

    // Lead the target while the ball is falling
    let ball = &state.ball;
    let lead = if ball.vel.y > 0.0 {
        let ticks_to_paddle = ((FIELD_HEIGHT - PADDLE_HEIGHT - ball.bottom()) / ball.vel.y).max(0.0);
        ball.vel.x * ticks_to_paddle.min(30.0)
    } else {
        0.0
    };
    let target = (ball.pos.x + BALL_SIZE / 2.0 + lead).clamp(0.0, FIELD_WIDTH);
    let paddle_center = state.paddle.x + PADDLE_WIDTH / 2.0;

    let offset = target - paddle_center;
    if offset < -DEADZONE {
        TickInput::LEFT
    } else if offset > DEADZONE {
        TickInput::RIGHT
    } else {
        TickInput::NONE
    }
}
