//! Barkanoid entry point
//!
//! Headless demo driver. The simulation core only consumes a paddle
//! target and a release trigger, so a tiny autopilot stands in for the
//! pointer: it tracks the ball and launches whenever the ball is waiting
//! on the paddle. Events and HUD updates go to the log.
//!
//! Usage: `barkanoid [seed] [--json]`

use std::time::{SystemTime, UNIX_EPOCH};

use barkanoid::consts::TICK_DT;
use barkanoid::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

/// Hard cap on demo length (10 minutes of simulated time)
const MAX_TICKS: u64 = (600.0 / TICK_DT) as u64;

/// Track the ball with a small oscillating offset so the demo does not
/// settle into a fixed bounce loop
fn autopilot_target(state: &GameState) -> f32 {
    let t = state.time_ticks as f32 * 0.01;
    let offset = t.sin() * 12.0 + (t * 0.7).sin() * 6.0;
    state.ball.pos.x + offset
}

fn main() {
    env_logger::init();

    let mut seed: Option<u64> = None;
    let mut dump_json = false;
    for arg in std::env::args().skip(1) {
        if arg == "--json" {
            dump_json = true;
        } else {
            match arg.parse() {
                Ok(s) => seed = Some(s),
                Err(_) => log::warn!("ignoring argument {arg:?} (expected a numeric seed)"),
            }
        }
    }
    let seed = seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });

    log::info!("Barkanoid starting with seed {seed}");
    let mut state = GameState::new(seed);

    let mut ticks = 0u64;
    while state.phase != GamePhase::GameOver && ticks < MAX_TICKS {
        let input = TickInput {
            target_x: Some(autopilot_target(&state)),
            release: state.phase == GamePhase::WaitingOnPaddle,
        };
        let events = tick(&mut state, &input);
        for event in events {
            match event {
                GameEvent::BrickDestroyed { row, col } => {
                    log::debug!("brick ({row},{col}) down - {}", state.hud.score_text);
                }
                GameEvent::LevelCleared => {
                    log::info!("level cleared - {}", state.hud.score_text);
                }
                GameEvent::BallLost => {
                    log::info!("ball lost - {}", state.hud.lives_text);
                }
            }
        }
        ticks += 1;
    }

    log::info!(
        "demo finished after {:.1}s: {} / {}",
        ticks as f32 * TICK_DT,
        state.hud.score_text,
        state.hud.lives_text
    );

    if dump_json {
        match serde_json::to_string_pretty(&state) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("failed to serialize state: {e}"),
        }
    }
}
