//! Arkanoid - a single-screen brick breaker
//!
//! Core modules:
//! - `sim`: Deterministic simulation (paddle, ball, bricks, game state)
//! - `draw`: Projection of the game state into draw primitives
//! - `settings`: Rule variants and run-time configuration
//! - `platform`: Input/draw collaborators and the host game loop
//! - `renderer`: WebGPU rasterizer for the draw primitives

pub mod draw;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use draw::{Color, DrawCommand, DrawList, Font, Rect, project};
pub use settings::{Settings, Variant};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Window title
    pub const WINDOW_TITLE: &str = "Arkanoid";

    /// Playfield dimensions (also the window size)
    pub const FIELD_WIDTH: f32 = 340.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Paddle rides along the bottom edge
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    /// Horizontal paddle travel per tick while a key is held
    pub const PADDLE_SPEED: f32 = 5.0;

    /// Ball is a square, positioned by its top-left corner
    pub const BALL_SIZE: f32 = 15.0;
    /// Launch and respawn velocity (per tick)
    pub const BALL_START_VX: f32 = 3.0;
    pub const BALL_START_VY: f32 = 3.0;

    /// Brick grid
    pub const BRICK_WIDTH: f32 = 60.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_GAP: f32 = 10.0;
    pub const BRICK_COLUMNS: usize = 5;
    pub const BRICK_ROWS: usize = 10;
    pub const BRICK_COUNT: usize = BRICK_COLUMNS * BRICK_ROWS;

    /// Height of the score bar above the bricks (classic rules)
    pub const SCORE_BAR_HEIGHT: f32 = 20.0;
    /// Score lost per miss (classic rules)
    pub const MISS_PENALTY: i32 = 10;
}
