//! Game state and core simulation types
//!
//! All state that must be observed by a renderer or persisted for
//! determinism lives here, along with the game state machine that
//! consumes simulation events.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball attached to paddle, waiting for a release trigger
    WaitingOnPaddle,
    /// Active gameplay
    InPlay,
    /// Transient: board cleared, bonus awarded, bricks being revived
    LevelClear,
    /// Run ended (terminal)
    GameOver,
}

/// The ball
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// While attached the ball tracks the paddle and carries no velocity
    pub attached: bool,
}

impl Ball {
    fn new(paddle: &Paddle) -> Self {
        let mut ball = Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
            attached: true,
        };
        ball.update_attached(paddle);
        ball
    }

    /// Advance by one timestep worth of velocity
    pub fn move_by(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    /// Update attached ball position to ride the paddle
    pub fn update_attached(&mut self, paddle: &Paddle) {
        if self.attached {
            self.pos = Vec2::new(paddle.x, PADDLE_Y - BALL_ATTACH_OFFSET);
        }
    }
}

/// The player's paddle
///
/// Moves only horizontally along a fixed row; the raw pointer signal is
/// stored as `target_x` and clamped into the arena every tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Paddle {
    /// Current (clamped) center x
    pub x: f32,
    /// Raw input signal, may be outside the arena
    pub target_x: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        let x = ARENA_WIDTH / 2.0;
        Self { x, target_x: x }
    }
}

impl Paddle {
    pub fn set_target_x(&mut self, x: f32) {
        self.target_x = x;
    }

    /// Target x clamped to the collidable range inside the arena
    pub fn clamped_x(&self) -> f32 {
        self.target_x
            .clamp(PADDLE_HALF_WIDTH, ARENA_WIDTH - PADDLE_HALF_WIDTH)
    }

    /// Move to the (clamped) target. Called once per tick, before the ball.
    pub fn update(&mut self) {
        self.x = self.clamped_x();
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, PADDLE_Y)
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_half_extents(
            self.center(),
            Vec2::new(PADDLE_HALF_WIDTH, PADDLE_HALF_HEIGHT),
        )
    }
}

/// A single brick slot in the grid
///
/// Bricks are never deallocated: a destroyed brick is soft-deleted via
/// `alive` and revived in bulk on level clear.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Brick {
    pub aabb: Aabb,
    pub alive: bool,
}

impl Brick {
    pub fn kill(&mut self) {
        self.alive = false;
    }

    pub fn revive(&mut self) {
        self.alive = true;
    }
}

/// Fixed 15x4 grid of bricks, row-major
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrickGrid {
    bricks: Vec<Brick>,
}

impl Default for BrickGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl BrickGrid {
    pub fn new() -> Self {
        let mut bricks = Vec::with_capacity(BRICK_COUNT);
        for row in 0..BRICK_ROWS {
            for col in 0..BRICK_COLS {
                let min = Vec2::new(
                    BRICK_ORIGIN_X + col as f32 * BRICK_STEP_X,
                    BRICK_ORIGIN_Y + row as f32 * BRICK_STEP_Y,
                );
                bricks.push(Brick {
                    aabb: Aabb::from_min_size(min, Vec2::new(BRICK_WIDTH, BRICK_HEIGHT)),
                    alive: true,
                });
            }
        }
        Self { bricks }
    }

    /// Row-major iteration over all slots (the deterministic scan order
    /// used for collision tie-breaking)
    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter()
    }

    pub fn get(&self, row: usize, col: usize) -> &Brick {
        &self.bricks[row * BRICK_COLS + col]
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> &mut Brick {
        &mut self.bricks[row * BRICK_COLS + col]
    }

    pub fn count_living(&self) -> usize {
        self.bricks.iter().filter(|b| b.alive).count()
    }

    /// Bulk revive on level clear
    pub fn revive_all(&mut self) {
        for brick in &mut self.bricks {
            brick.revive();
        }
    }

    /// First live brick overlapped by the circle, in row-major order
    pub fn first_hit(&self, center: Vec2, radius: f32) -> Option<(usize, usize)> {
        for row in 0..BRICK_ROWS {
            for col in 0..BRICK_COLS {
                let brick = self.get(row, col);
                if brick.alive
                    && super::collision::circle_aabb_collision(center, radius, &brick.aabb).hit
                {
                    return Some((row, col));
                }
            }
        }
        None
    }
}

/// Events produced by one simulation tick, consumed by the state machine
/// in order. Explicit values instead of callbacks keep transition order
/// deterministic and testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A live brick was struck and killed
    BrickDestroyed { row: usize, col: usize },
    /// The last live brick died this tick
    LevelCleared,
    /// The ball left the arena through the open bottom edge
    BallLost,
}

/// Text fields produced for the renderer, updated only on change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hud {
    pub score_text: String,
    pub lives_text: String,
    /// Center-screen status line; `None` means hidden
    pub status: Option<String>,
}

impl Hud {
    fn new() -> Self {
        Self {
            score_text: format!("score: {}", 0),
            lives_text: format!("lives: {}", START_LIVES),
            status: Some("- click to start -".to_string()),
        }
    }

    fn set_score(&mut self, score: u64) {
        self.score_text = format!("score: {score}");
    }

    fn set_lives(&mut self, lives: u8) {
        self.lives_text = format!("lives: {lives}");
    }

    fn set_status(&mut self, text: &str) {
        self.status = Some(text.to_string());
    }

    fn hide_status(&mut self) {
        self.status = None;
    }
}

/// RNG state wrapper for serialization
///
/// The seed is rolled forward after every draw so that draws stay
/// deterministic across a save/restore of the state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Draw a value in [0, 1) and advance the stored seed
    pub fn next_unit(&mut self) -> f32 {
        let mut rng = Pcg32::seed_from_u64(self.seed);
        let value: f32 = rng.random();
        self.seed = rng.random();
        value
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// RNG state (paddle-center deflection jitter)
    pub rng_state: RngState,
    /// Player lives
    pub lives: u8,
    /// Score
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Current phase
    pub phase: GamePhase,
    pub paddle: Paddle,
    pub ball: Ball,
    pub bricks: BrickGrid,
    pub hud: Hud,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        let paddle = Paddle::default();
        let ball = Ball::new(&paddle);
        Self {
            seed,
            rng_state: RngState::new(seed),
            lives: START_LIVES,
            score: 0,
            time_ticks: 0,
            phase: GamePhase::WaitingOnPaddle,
            paddle,
            ball,
            bricks: BrickGrid::new(),
            hud: Hud::new(),
        }
    }

    /// Release trigger (pointer pressed). Detaches the ball and starts
    /// play; a no-op in every other phase.
    pub fn release(&mut self) {
        if self.phase != GamePhase::WaitingOnPaddle || !self.ball.attached {
            return;
        }
        self.ball.attached = false;
        self.ball.vel = Vec2::new(BALL_LAUNCH_VX, BALL_LAUNCH_VY);
        self.hud.hide_status();
        self.phase = GamePhase::InPlay;
        log::debug!("ball released at x={:.1}", self.ball.pos.x);
    }

    /// Reattach the ball to the paddle (after a life loss or level clear)
    fn attach_ball(&mut self) {
        self.ball.attached = true;
        self.ball.vel = Vec2::ZERO;
        self.ball.update_attached(&self.paddle);
    }

    /// Dead-center paddle hits get a small random horizontal kick so the
    /// ball never enters a perfectly vertical bounce loop.
    pub(crate) fn center_hit_jitter(&mut self) -> f32 {
        PADDLE_JITTER_BASE + self.rng_state.next_unit() * PADDLE_JITTER_SPAN
    }

    /// Apply one simulation event to the state machine.
    ///
    /// Every event has exactly one defined transition from each phase in
    /// which it can occur; events are never errors.
    pub fn apply_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::BrickDestroyed { row, col } => {
                debug_assert_eq!(self.phase, GamePhase::InPlay);
                self.score += BRICK_SCORE;
                self.hud.set_score(self.score);
                log::debug!("brick ({row},{col}) destroyed, score={}", self.score);
            }
            GameEvent::LevelCleared => {
                debug_assert_eq!(self.phase, GamePhase::InPlay);
                self.phase = GamePhase::LevelClear;
                self.score += LEVEL_CLEAR_BONUS;
                self.hud.set_score(self.score);
                self.hud.set_status("- Next Level -");
                self.bricks.revive_all();
                self.attach_ball();
                self.phase = GamePhase::WaitingOnPaddle;
                log::info!("level cleared, score={}", self.score);
            }
            GameEvent::BallLost => {
                debug_assert_eq!(self.phase, GamePhase::InPlay);
                debug_assert!(self.lives > 0);
                self.lives -= 1;
                self.hud.set_lives(self.lives);
                if self.lives == 0 {
                    self.ball.vel = Vec2::ZERO;
                    self.hud.set_status("Game Over!");
                    self.phase = GamePhase::GameOver;
                    log::info!("game over, final score={}", self.score);
                } else {
                    self.attach_ball();
                    self.phase = GamePhase::WaitingOnPaddle;
                    log::debug!("ball lost, lives={}", self.lives);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_layout() {
        let grid = BrickGrid::new();
        assert_eq!(grid.count_living(), BRICK_COUNT);
        assert_eq!(grid.get(0, 0).aabb.min, Vec2::new(120.0, 100.0));
        assert_eq!(grid.get(0, 1).aabb.min, Vec2::new(156.0, 100.0));
        assert_eq!(grid.get(1, 0).aabb.min, Vec2::new(120.0, 152.0));
        assert_eq!(grid.get(3, 14).aabb.min, Vec2::new(624.0, 256.0));
    }

    #[test]
    fn test_kill_and_revive_all() {
        let mut grid = BrickGrid::new();
        grid.get_mut(2, 7).kill();
        grid.get_mut(0, 0).kill();
        assert_eq!(grid.count_living(), BRICK_COUNT - 2);
        grid.revive_all();
        assert_eq!(grid.count_living(), BRICK_COUNT);
    }

    #[test]
    fn test_paddle_clamp() {
        let mut paddle = Paddle::default();
        paddle.set_target_x(-500.0);
        assert_eq!(paddle.clamped_x(), PADDLE_HALF_WIDTH);
        paddle.set_target_x(5000.0);
        assert_eq!(paddle.clamped_x(), ARENA_WIDTH - PADDLE_HALF_WIDTH);
        paddle.set_target_x(400.0);
        paddle.update();
        assert_eq!(paddle.x, 400.0);
    }

    #[test]
    fn test_new_state_is_waiting_with_attached_ball() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::WaitingOnPaddle);
        assert_eq!(state.lives, START_LIVES);
        assert_eq!(state.score, 0);
        assert!(state.ball.attached);
        assert_eq!(state.ball.vel, Vec2::ZERO);
        assert_eq!(state.ball.pos, Vec2::new(400.0, PADDLE_Y - BALL_ATTACH_OFFSET));
        assert_eq!(state.hud.status.as_deref(), Some("- click to start -"));
    }

    #[test]
    fn test_release_is_noop_outside_waiting() {
        let mut state = GameState::new(7);
        state.release();
        assert_eq!(state.phase, GamePhase::InPlay);
        let vel = state.ball.vel;
        // Second release while already in play changes nothing
        state.release();
        assert_eq!(state.ball.vel, vel);
        assert_eq!(state.phase, GamePhase::InPlay);
    }

    #[test]
    fn test_ball_lost_decrements_and_reattaches() {
        let mut state = GameState::new(7);
        state.release();
        state.apply_event(GameEvent::BallLost);
        assert_eq!(state.lives, 2);
        assert_eq!(state.phase, GamePhase::WaitingOnPaddle);
        assert!(state.ball.attached);
        assert_eq!(state.ball.pos, Vec2::new(state.paddle.x, PADDLE_Y - BALL_ATTACH_OFFSET));
        assert_eq!(state.hud.lives_text, "lives: 2");
        // Intro text stays hidden after the first release
        assert!(state.hud.status.is_none());
    }

    #[test]
    fn test_last_life_is_terminal() {
        let mut state = GameState::new(7);
        state.lives = 1;
        state.release();
        state.apply_event(GameEvent::BallLost);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.lives, 0);
        assert_eq!(state.ball.vel, Vec2::ZERO);
        assert_eq!(state.hud.status.as_deref(), Some("Game Over!"));
        // Release triggers are ignored once the run has ended
        state.release();
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.ball.vel, Vec2::ZERO);
    }

    #[test]
    fn test_level_clear_revives_and_awards_bonus() {
        let mut state = GameState::new(7);
        state.release();
        for row in 0..BRICK_ROWS {
            for col in 0..BRICK_COLS {
                state.bricks.get_mut(row, col).kill();
                state.apply_event(GameEvent::BrickDestroyed { row, col });
            }
        }
        assert_eq!(state.score, 60 * BRICK_SCORE);
        state.apply_event(GameEvent::LevelCleared);
        assert_eq!(state.score, 60 * BRICK_SCORE + LEVEL_CLEAR_BONUS);
        assert_eq!(state.bricks.count_living(), BRICK_COUNT);
        assert_eq!(state.phase, GamePhase::WaitingOnPaddle);
        assert!(state.ball.attached);
        assert_eq!(state.hud.status.as_deref(), Some("- Next Level -"));
        assert_eq!(state.hud.score_text, "score: 1600");
    }

    #[test]
    fn test_rng_state_deterministic() {
        let mut a = RngState::new(42);
        let mut b = RngState::new(42);
        for _ in 0..16 {
            assert_eq!(a.next_unit(), b.next_unit());
        }
        // Consecutive draws differ (seed rolls forward)
        let mut c = RngState::new(42);
        let first = c.next_unit();
        let second = c.next_unit();
        assert_ne!(first, second);
    }

    #[test]
    fn test_state_roundtrips_through_json() {
        let mut state = GameState::new(99);
        state.release();
        state.bricks.get_mut(1, 3).kill();
        let json = serde_json::to_string(&state).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.phase, state.phase);
        assert_eq!(restored.bricks.count_living(), state.bricks.count_living());
        assert_eq!(restored.ball.vel, state.ball.vel);
    }
}
