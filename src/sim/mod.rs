//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call to `tick` per frame)
//! - Stable iteration order (column-major over the brick grid)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod state;
pub mod tick;

pub use autopilot::steer;
pub use collision::Aabb;
pub use state::{Ball, BrickGrid, GameState, Paddle, Rules};
pub use tick::{TickInput, tick};
