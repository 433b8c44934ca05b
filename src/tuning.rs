//! Data-driven game balance
//!
//! Everything that shapes the playfield and the pipe stream. Validated once
//! when a session is built so a broken configuration never reaches a tick.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::settings::MAX_HEAVINESS;
use crate::sim::bird::body_size;

/// Configuration rejected at construction time
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// No valid gap position exists for the configured playfield
    #[error("pipe gap range is empty: top must lie in [{min}, {max}]")]
    DegenerateGap { min: f32, max: f32 },

    /// Heaviness outside [0, 100]
    #[error("heaviness {0} is outside 0..=100")]
    Heaviness(f32),

    /// Speed multiplier outside [0.5, 2.0]
    #[error("speed multiplier {0} is outside 0.5..=2.0")]
    Speed(f32),

    /// A dimension or rate that must be positive was not
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    /// A dimension that may be zero was negative
    #[error("{name} must be non-negative, got {value}")]
    Negative { name: &'static str, value: f32 },

    /// The heaviest bird can't stand at its spawn point above the ground
    #[error("floor at {floor} can't hold the bird: spawn needs {needed}")]
    BirdDoesNotFit { floor: f32, needed: f32 },
}

/// Playfield and pipe-stream constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    pub playfield_width: f32,
    pub playfield_height: f32,
    pub ground_height: f32,
    pub pipe_width: f32,
    pub pipe_gap: f32,
    /// Horizontal pipe travel per nominal frame
    pub pipe_speed: f32,
    /// Nominal frames between spawns
    pub spawn_interval: f32,
    /// Shortest allowed top or bottom pipe segment
    pub min_segment: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
            ground_height: GROUND_HEIGHT,
            pipe_width: PIPE_WIDTH,
            pipe_gap: PIPE_GAP,
            pipe_speed: PIPE_SPEED,
            spawn_interval: PIPE_SPAWN_INTERVAL,
            min_segment: PIPE_MIN_SEGMENT,
        }
    }
}

impl Tuning {
    /// Y coordinate of the ground surface
    pub fn floor(&self) -> f32 {
        self.playfield_height - self.ground_height
    }

    /// Inclusive range a pipe's top height is drawn from
    pub fn gap_top_range(&self) -> (f32, f32) {
        let min = self.min_segment;
        let max = self.floor() - self.pipe_gap - self.min_segment;
        (min, max)
    }

    /// Reject configurations that could spawn an impassable or invalid pipe
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
            ("pipe_width", self.pipe_width),
            ("pipe_gap", self.pipe_gap),
            ("pipe_speed", self.pipe_speed),
            ("spawn_interval", self.spawn_interval),
        ];
        for (name, value) in positive {
            // Also catches NaN
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        if !(self.ground_height >= 0.0) {
            return Err(ConfigError::Negative {
                name: "ground_height",
                value: self.ground_height,
            });
        }

        let (min, max) = self.gap_top_range();
        if !(min >= 0.0 && max >= min) {
            return Err(ConfigError::DegenerateGap { min, max });
        }

        // Bird advance clamps into [0, floor - height], which must not be empty
        let needed = BIRD_SPAWN_Y + body_size(MAX_HEAVINESS).y;
        if !(self.floor() >= needed) {
            return Err(ConfigError::BirdDoesNotFit {
                floor: self.floor(),
                needed,
            });
        }
        Ok(())
    }
}
