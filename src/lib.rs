//! Flabby Bird - a heavier, fatter Flappy Bird
//!
//! Core modules:
//! - `game`: Frame driver tying input, clock, storage and presenter together
//! - `sim`: Frame-stepped simulation (bird physics, pipes, collisions, game state)
//! - `platform`: Presenter/input seams for whatever draws the game
//! - `persistence`: Best-score storage behind a key-value trait
//! - `tuning`: Validated game constants
//! - `settings`: Player-adjustable heaviness and speed

pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use highscores::BestScore;
pub use settings::Settings;
pub use tuning::{ConfigError, Tuning};

/// Game configuration constants
///
/// All kinematic quantities are expressed per nominal frame (1/60 s) and get
/// scaled by `dt` and the speed multiplier before they are applied.
pub mod consts {
    /// Nominal frame rate the physics constants are tuned for
    pub const TARGET_FPS: f64 = 60.0;
    /// Duration of one nominal frame in milliseconds
    pub const FRAME_MS: f64 = 1000.0 / TARGET_FPS;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 400.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;
    pub const GROUND_HEIGHT: f32 = 80.0;

    /// Bird spawn position (x never changes)
    pub const BIRD_X: f32 = 80.0;
    pub const BIRD_SPAWN_Y: f32 = 300.0;
    /// Even chonky birds have limits
    pub const TERMINAL_VELOCITY: f32 = 15.0;
    /// Degrees of tilt per unit of vertical velocity
    pub const ROTATION_PER_VELOCITY: f32 = 4.0;
    pub const MIN_ROTATION: f32 = -30.0;
    pub const MAX_ROTATION: f32 = 90.0;

    /// Pipe defaults - wide gap for the thicc bird
    pub const PIPE_WIDTH: f32 = 70.0;
    pub const PIPE_GAP: f32 = 180.0;
    pub const PIPE_SPEED: f32 = 3.0;
    pub const PIPE_SPAWN_INTERVAL: f32 = 100.0;
    pub const PIPE_MIN_SEGMENT: f32 = 80.0;

    /// Ground texture repeats every 40 pixels
    pub const GROUND_PATTERN: f32 = 40.0;
}
