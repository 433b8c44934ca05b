//! The chonky bird
//!
//! Size, gravity and flap strength all derive from the heaviness setting and
//! are recomputed on every read, so moving the slider mid-flight is safe.

use glam::Vec2;

use crate::consts::*;
use crate::settings::Settings;

/// Flap wobble kick (radians per frame, decays)
const FLAP_WOBBLE_SPEED: f32 = 0.5;
/// Per-frame wobble damping
const WOBBLE_DAMPING: f32 = 0.95;
/// Frames the wing stays raised after a flap
const FLAP_FRAMES: f32 = 10.0;

/// Start-screen float: amplitude in pixels and period divisor in ms
const IDLE_BOB_AMPLITUDE: f32 = 20.0;
const IDLE_BOB_PERIOD_MS: f32 = 300.0;

/// Drawn size (width, height) for a heaviness in [0, 100]
#[inline]
pub fn body_size(heaviness: f32) -> Vec2 {
    Vec2::new(35.0 + heaviness * 0.2, 30.0 + heaviness * 0.16)
}

/// Downward acceleration per nominal frame
#[inline]
pub fn gravity(heaviness: f32) -> f32 {
    0.3 + heaviness * 0.006
}

/// Velocity set by a flap. Negative is upward; heavier birds flap harder to
/// offset their extra gravity.
#[inline]
pub fn jump_strength(heaviness: f32) -> f32 {
    -(7.0 + heaviness * 0.04)
}

/// The player body
#[derive(Debug, Clone)]
pub struct Bird {
    /// Top-left corner; x never changes
    pub pos: Vec2,
    /// Vertical velocity per nominal frame (+y is down)
    pub velocity: f32,
    /// Tilt in degrees, derived from velocity
    pub rotation: f32,
    /// Jiggle phase (cosmetic)
    pub wobble: f32,
    pub wobble_speed: f32,
    /// Frames left with the wing raised (cosmetic)
    pub flap_frames: f32,
}

impl Default for Bird {
    fn default() -> Self {
        Self {
            pos: Vec2::new(BIRD_X, BIRD_SPAWN_Y),
            velocity: 0.0,
            rotation: 0.0,
            wobble: 0.0,
            wobble_speed: 0.0,
            flap_frames: 0.0,
        }
    }
}

impl Bird {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the spawn point with all motion cleared
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Current drawn size
    pub fn size(&self, settings: &Settings) -> Vec2 {
        body_size(settings.heaviness())
    }

    /// Flap! Velocity is set, not added.
    pub fn flap(&mut self, settings: &Settings) {
        self.velocity = jump_strength(settings.heaviness());
        self.wobble_speed = FLAP_WOBBLE_SPEED;
        self.flap_frames = FLAP_FRAMES;
    }

    /// Whether the wing should be drawn raised
    pub fn is_flapping(&self) -> bool {
        self.flap_frames > 0.0
    }

    /// Sweat drops appear when plummeting
    pub fn is_sweating(&self) -> bool {
        self.velocity > 5.0
    }

    /// Integrate one step. Returns true if the bird hit the ground at `floor`;
    /// ending the round is the caller's decision.
    pub fn advance(&mut self, dt: f32, settings: &Settings, floor: f32) -> bool {
        let scale = dt * settings.speed();

        self.velocity += gravity(settings.heaviness()) * scale;
        self.velocity = self.velocity.min(TERMINAL_VELOCITY);
        self.pos.y += self.velocity * scale;

        // The chonk jiggles
        self.wobble += self.wobble_speed * dt;
        self.wobble_speed *= WOBBLE_DAMPING.powf(dt);
        self.flap_frames = (self.flap_frames - dt).max(0.0);

        self.rotation =
            (self.velocity * ROTATION_PER_VELOCITY).clamp(MIN_ROTATION, MAX_ROTATION);

        // Ceiling stops, it doesn't bounce
        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
            self.velocity = 0.0;
        }

        let height = self.size(settings).y;
        if self.pos.y + height > floor {
            self.pos.y = floor - height;
            return true;
        }
        false
    }

    /// Gentle float on the title screen (no physics)
    pub fn idle_bob(&mut self, elapsed_ms: f64) {
        let phase = (elapsed_ms / IDLE_BOB_PERIOD_MS as f64) as f32;
        self.pos.y = BIRD_SPAWN_Y + phase.sin() * IDLE_BOB_AMPLITUDE;
    }
}
