//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation deterministically. Each
//! tick runs in a fixed order: paddle update, ball movement + collision
//! resolution (walls, paddle, bricks), then event dispatch into the
//! state machine.

use glam::Vec2;

use super::collision::{circle_aabb_collision, reflect_axis};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Raw horizontal pointer position; unbounded, clamped by the paddle
    pub target_x: Option<f32>,
    /// Release the ball from the paddle (click/tap)
    pub release: bool,
}

/// Advance the game state by one fixed timestep.
///
/// Returns the events produced this tick, already applied to the state
/// machine, in the order they occurred.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Terminal: no input is accepted and nothing moves
    if state.phase == GamePhase::GameOver {
        return events;
    }

    state.time_ticks += 1;

    // Paddle strictly first
    if let Some(x) = input.target_x {
        state.paddle.set_target_x(x);
    }
    state.paddle.update();

    if input.release {
        state.release();
    }

    if state.ball.attached {
        state.ball.update_attached(&state.paddle);
        return events;
    }

    debug_assert!(
        state.phase != GamePhase::InPlay || state.ball.vel != Vec2::ZERO,
        "free ball must carry velocity while in play"
    );

    // Integrate
    state.ball.move_by(TICK_DT);

    let r = state.ball.radius;

    // Walls: left/right mirror vx, top mirrors vy. The bottom edge is
    // open on purpose - exiting there is a life loss, not a bounce.
    if state.ball.pos.x - r < 0.0 {
        state.ball.pos.x = r;
        state.ball.vel.x = -state.ball.vel.x;
    } else if state.ball.pos.x + r > ARENA_WIDTH {
        state.ball.pos.x = ARENA_WIDTH - r;
        state.ball.vel.x = -state.ball.vel.x;
    }
    if state.ball.pos.y - r < 0.0 {
        state.ball.pos.y = r;
        state.ball.vel.y = -state.ball.vel.y;
    }

    // Paddle: only a descending ball can be caught, so a ball pushed
    // sideways into the paddle edge never sticks to it
    if state.ball.vel.y > 0.0 {
        let paddle_box = state.paddle.aabb();
        let result = circle_aabb_collision(state.ball.pos, r, &paddle_box);
        if result.hit {
            // Horizontal deflection grows with distance from the paddle
            // center; a dead-center hit gets a small random kick instead
            // of bouncing perfectly vertical forever
            let diff = state.ball.pos.x - state.paddle.x;
            state.ball.vel.x = if diff != 0.0 {
                PADDLE_DEFLECT_FACTOR * diff
            } else {
                state.center_hit_jitter()
            };
            state.ball.vel.y = -state.ball.vel.y.abs();
            // Rest the ball on the paddle top
            state.ball.pos.y = paddle_box.min.y - r;
        }
    }

    // Bricks: resolve at most one contact per tick, scanning row-major
    // so simultaneous overlaps break ties deterministically
    if let Some((row, col)) = state.bricks.first_hit(state.ball.pos, r) {
        let brick_box = state.bricks.get(row, col).aabb;
        let result = circle_aabb_collision(state.ball.pos, r, &brick_box);
        state.ball.vel = reflect_axis(state.ball.vel, result.normal);
        state.ball.pos += result.normal * result.penetration;
        state.bricks.get_mut(row, col).kill();
        events.push(GameEvent::BrickDestroyed { row, col });
        if state.bricks.count_living() == 0 {
            events.push(GameEvent::LevelCleared);
        }
    }

    // Out of bounds through the open bottom edge
    if state.ball.pos.y > ARENA_HEIGHT {
        events.push(GameEvent::BallLost);
    }

    // Dispatch, in order, into the state machine
    for &event in &events {
        state.apply_event(event);
    }

    events
}
