//! Player-adjustable settings
//!
//! Heaviness and speed are exposed as sliders. Both may change mid-round and
//! take effect on the next tick without resetting anything in flight.

use serde::{Deserialize, Serialize};

use crate::tuning::ConfigError;

pub const MIN_HEAVINESS: f32 = 0.0;
pub const MAX_HEAVINESS: f32 = 100.0;
pub const DEFAULT_HEAVINESS: f32 = 50.0;

pub const MIN_SPEED: f32 = 0.5;
pub const MAX_SPEED: f32 = 2.0;
pub const DEFAULT_SPEED: f32 = 1.0;

/// Game settings/preferences
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// How chonky the bird is (0 = svelte, 100 = absolute unit)
    heaviness: f32,
    /// Global simulation speed multiplier
    speed: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            heaviness: DEFAULT_HEAVINESS,
            speed: DEFAULT_SPEED,
        }
    }
}

impl Settings {
    /// Build validated settings
    pub fn new(heaviness: f32, speed: f32) -> Result<Self, ConfigError> {
        let mut settings = Self::default();
        settings.set_heaviness(heaviness)?;
        settings.set_speed(speed)?;
        Ok(settings)
    }

    pub fn heaviness(&self) -> f32 {
        self.heaviness
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Set heaviness, rejecting values outside [0, 100]
    pub fn set_heaviness(&mut self, heaviness: f32) -> Result<(), ConfigError> {
        if !(MIN_HEAVINESS..=MAX_HEAVINESS).contains(&heaviness) {
            return Err(ConfigError::Heaviness(heaviness));
        }
        self.heaviness = heaviness;
        Ok(())
    }

    /// Set speed multiplier, rejecting values outside [0.5, 2.0]
    pub fn set_speed(&mut self, speed: f32) -> Result<(), ConfigError> {
        if !(MIN_SPEED..=MAX_SPEED).contains(&speed) {
            return Err(ConfigError::Speed(speed));
        }
        self.speed = speed;
        Ok(())
    }
}
