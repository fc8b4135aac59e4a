//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (row-major brick scan)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Aabb, CollisionResult, circle_aabb_collision};
pub use state::{Ball, Brick, BrickGrid, GameEvent, GamePhase, GameState, Hud, Paddle};
pub use tick::{TickInput, tick};
