//! Simulation module
//!
//! All gameplay logic lives here. Rules for this module:
//! - Quantities are per nominal frame, scaled by `dt` and the speed setting
//! - Seeded RNG only
//! - No rendering, storage or platform dependencies

pub mod bird;
pub mod clock;
pub mod collision;
pub mod pipes;
pub mod state;
pub mod tick;

pub use bird::{Bird, body_size, gravity, jump_strength};
pub use clock::Stepper;
pub use collision::{Rect, bird_hitbox, collides, pipe_segments};
pub use pipes::{Pipe, PipeStream};
pub use state::{CrashCause, GameEvent, GamePhase, GameState, Snapshot};
pub use tick::{TickInput, tick};
