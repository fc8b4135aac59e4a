//! Barkanoid - a single-screen brick-breaker arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//!
//! The crate does no rendering, audio, or input capture of its own. An
//! external driver samples a pointer position, calls `sim::tick` once
//! per logical frame, and reads back entity positions and HUD text.

pub mod sim;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz logical frames)
    pub const TICK_DT: f32 = 1.0 / 60.0;

    /// Arena dimensions - left/right/top walls are solid, bottom is open
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    /// Vertical offset of an attached ball above the paddle center
    pub const BALL_ATTACH_OFFSET: f32 = 16.0;
    /// Launch velocity on release (px/s)
    pub const BALL_LAUNCH_VX: f32 = -75.0;
    pub const BALL_LAUNCH_VY: f32 = -300.0;

    /// Paddle defaults - fixed row near the bottom of the arena
    pub const PADDLE_Y: f32 = 500.0;
    pub const PADDLE_HALF_WIDTH: f32 = 24.0;
    pub const PADDLE_HALF_HEIGHT: f32 = 8.0;
    /// Horizontal deflection per pixel of offset from the paddle center (/s)
    pub const PADDLE_DEFLECT_FACTOR: f32 = 10.0;
    /// Dead-center hits get vx = JITTER_BASE + random * JITTER_SPAN
    pub const PADDLE_JITTER_BASE: f32 = 2.0;
    pub const PADDLE_JITTER_SPAN: f32 = 8.0;

    /// Brick grid layout
    pub const BRICK_COLS: usize = 15;
    pub const BRICK_ROWS: usize = 4;
    pub const BRICK_COUNT: usize = BRICK_COLS * BRICK_ROWS;
    pub const BRICK_ORIGIN_X: f32 = 120.0;
    pub const BRICK_ORIGIN_Y: f32 = 100.0;
    pub const BRICK_STEP_X: f32 = 36.0;
    pub const BRICK_STEP_Y: f32 = 52.0;
    pub const BRICK_WIDTH: f32 = 36.0;
    pub const BRICK_HEIGHT: f32 = 20.0;

    /// Scoring
    pub const BRICK_SCORE: u64 = 10;
    pub const LEVEL_CLEAR_BONUS: u64 = 1000;

    /// Starting lives
    pub const START_LIVES: u8 = 3;
}
