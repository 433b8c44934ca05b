//! Collision detection between the bird and pipes
//!
//! The bird's hitbox is deliberately smaller than its sprite (30%-70% of the
//! width, 20%-80% of the height) so near misses feel fair.

use glam::Vec2;

use super::bird::Bird;
use super::pipes::{Pipe, PipeStream};
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Hitbox inset as fractions of the drawn size
const HITBOX_MIN: Vec2 = Vec2::new(0.3, 0.2);
const HITBOX_MAX: Vec2 = Vec2::new(0.7, 0.8);

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Strict overlap: shared edges don't count
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// The forgiving hitbox for a bird
pub fn bird_hitbox(bird: &Bird, settings: &Settings) -> Rect {
    let size = bird.size(settings);
    Rect::new(bird.pos + size * HITBOX_MIN, bird.pos + size * HITBOX_MAX)
}

/// Top and bottom segments of a pipe
pub fn pipe_segments(pipe: &Pipe, tuning: &Tuning) -> [Rect; 2] {
    let left = pipe.x;
    let right = pipe.x + tuning.pipe_width;
    [
        Rect::new(Vec2::new(left, 0.0), Vec2::new(right, pipe.top_height)),
        Rect::new(
            Vec2::new(left, pipe.bottom_y(tuning.pipe_gap)),
            Vec2::new(right, tuning.floor()),
        ),
    ]
}

/// Check whether the bird touches any pipe
pub fn collides(bird: &Bird, settings: &Settings, pipes: &PipeStream) -> bool {
    let hitbox = bird_hitbox(bird, settings);
    pipes.pipes().iter().any(|pipe| {
        pipe_segments(pipe, pipes.tuning())
            .iter()
            .any(|segment| hitbox.overlaps(segment))
    })
}
