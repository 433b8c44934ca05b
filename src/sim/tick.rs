//! Simulation tick
//!
//! Core game loop step: applies queued actions, then advances whatever the
//! current phase simulates.

use super::collision::collides;
use super::state::{CrashCause, GamePhase, GameState};
use crate::consts::FRAME_MS;

/// Pixels above the bottom pipe the autopilot tries to keep its hitbox
const AUTOPILOT_CLEARANCE: f32 = 25.0;
/// Hover line (fraction of floor height) when no pipe is ahead
const AUTOPILOT_CRUISE: f32 = 0.6;

/// Actions queued for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Flap (only while playing)
    pub flap: bool,
    /// Leave the title screen; also flaps
    pub start: bool,
    /// New round from the game over screen
    pub restart: bool,
    /// Demo mode - autopilot plays the game
    pub idle_mode: bool,
}

impl TickInput {
    /// Drop one-shot actions once they've been applied
    pub fn clear_actions(&mut self) {
        self.flap = false;
        self.start = false;
        self.restart = false;
    }
}

/// Advance the game state by `dt` nominal frames
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let mut input = input.clone();
    if input.idle_mode {
        autopilot(state, &mut input);
    }

    // Actions in the wrong phase are ignored
    match state.phase {
        GamePhase::Start if input.start => {
            state.start_round();
            state.flap();
        }
        GamePhase::Playing if input.flap => state.flap(),
        GamePhase::GameOver if input.restart => state.start_round(),
        _ => {}
    }

    match state.phase {
        GamePhase::Start => {
            state.elapsed_ms += dt as f64 * FRAME_MS;
            state.bird.idle_bob(state.elapsed_ms);
            state.scroll_ground(dt);
        }

        GamePhase::Playing => {
            state.elapsed_ms += dt as f64 * FRAME_MS;
            let speed = state.settings.speed();
            let floor = state.tuning().floor();

            let grounded = state.bird.advance(dt, &state.settings, floor);

            let cleared = state.pipes.advance(dt, speed, state.bird.pos.x);
            for _ in 0..cleared {
                state.add_point();
            }

            state.scroll_ground(dt);

            if grounded {
                state.crash(CrashCause::Ground);
            } else if collides(&state.bird, &state.settings, &state.pipes) {
                state.crash(CrashCause::Pipe);
            }
        }

        // Bird and pipes stay frozen until restart; only the ground scrolls
        GamePhase::GameOver => state.scroll_ground(dt),
    }
}

/// Fill in actions for demo mode: start from the title, then flap whenever
/// the bird sinks toward the bottom of the next gap. Never restarts.
fn autopilot(state: &GameState, input: &mut TickInput) {
    match state.phase {
        GamePhase::Start => input.start = true,
        GamePhase::Playing => {
            let tuning = state.tuning();
            let size = state.bird.size(&state.settings);
            let hitbox_left = state.bird.pos.x + size.x * 0.3;
            let hitbox_bottom = state.bird.pos.y + size.y * 0.8;

            let target = state
                .pipes
                .pipes()
                .iter()
                .find(|p| p.x + tuning.pipe_width >= hitbox_left)
                .map(|p| p.bottom_y(tuning.pipe_gap) - AUTOPILOT_CLEARANCE)
                .unwrap_or(tuning.floor() * AUTOPILOT_CRUISE);

            if hitbox_bottom > target && state.bird.velocity >= 0.0 {
                input.flap = true;
            }
        }
        GamePhase::GameOver => {}
    }
}
