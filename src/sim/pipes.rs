//! Pipe stream
//!
//! Pipes spawn at the right edge on a timer and slide left at a uniform
//! speed, so spawn order is also left-to-right order and never needs sorting.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::{ConfigError, Tuning};

/// A pair of pipes with a gap between them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    /// Left edge
    pub x: f32,
    /// Height of the top segment (gap starts here)
    pub top_height: f32,
    /// Scored already
    pub passed: bool,
}

impl Pipe {
    /// Y coordinate where the bottom segment begins
    pub fn bottom_y(&self, gap: f32) -> f32 {
        self.top_height + gap
    }

    /// Height of the bottom segment above the ground
    pub fn bottom_height(&self, gap: f32, floor: f32) -> f32 {
        floor - self.bottom_y(gap)
    }
}

/// Ordered pipes plus the spawn timer that feeds them
#[derive(Debug, Clone)]
pub struct PipeStream {
    pipes: Vec<Pipe>,
    /// Scaled frames since the last spawn
    spawn_timer: f32,
    tuning: Tuning,
    rng: Pcg32,
}

impl PipeStream {
    /// Build a stream, failing if the tuning can't produce a valid gap
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, ConfigError> {
        tuning.validate()?;
        Ok(Self {
            pipes: Vec::new(),
            spawn_timer: 0.0,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
        })
    }

    /// Pipes on screen, left to right
    pub fn pipes(&self) -> &[Pipe] {
        &self.pipes
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn spawn_timer(&self) -> f32 {
        self.spawn_timer
    }

    /// Empty the stream for a new round (RNG keeps its sequence)
    pub fn clear(&mut self) {
        self.pipes.clear();
        self.spawn_timer = 0.0;
    }

    /// Place a pipe at the right edge with a uniformly random gap
    pub fn spawn(&mut self) {
        let (min, max) = self.tuning.gap_top_range();
        let top_height = self.rng.random_range(min..=max);
        log::debug!("Spawned pipe with top height {:.1}", top_height);
        self.pipes.push(Pipe {
            x: self.tuning.playfield_width,
            top_height,
            passed: false,
        });
    }

    /// Insert a pipe directly (for scripted layouts)
    pub fn push(&mut self, pipe: Pipe) {
        debug_assert!(
            self.pipes.last().is_none_or(|last| last.x <= pipe.x),
            "pipes must stay ordered left to right"
        );
        self.pipes.push(pipe);
    }

    /// Advance one step. Returns how many pipes the bird cleared, judged
    /// against the bird's left edge at `player_x`.
    pub fn advance(&mut self, dt: f32, speed: f32, player_x: f32) -> u32 {
        let scale = dt * speed;

        self.spawn_timer += scale;
        if self.spawn_timer >= self.tuning.spawn_interval {
            self.spawn();
            self.spawn_timer = 0.0;
        }

        let width = self.tuning.pipe_width;
        let mut scored = 0;
        for pipe in &mut self.pipes {
            pipe.x -= self.tuning.pipe_speed * scale;

            if !pipe.passed && pipe.x + width < player_x {
                pipe.passed = true;
                scored += 1;
            }
        }

        // Leftmost pipes leave first
        let gone = self.pipes.iter().take_while(|p| p.x + width < 0.0).count();
        self.pipes.drain(..gone);

        scored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use proptest::prelude::*;

    fn stream() -> PipeStream {
        PipeStream::new(Tuning::default(), 42).unwrap()
    }

    #[test]
    fn test_spawns_on_interval() {
        let mut pipes = stream();
        for _ in 0..99 {
            pipes.advance(1.0, 1.0, BIRD_X);
        }
        assert!(pipes.pipes().is_empty());

        pipes.advance(1.0, 1.0, BIRD_X);
        assert_eq!(pipes.pipes().len(), 1);
        assert_eq!(pipes.spawn_timer(), 0.0);
        // Spawned at the right edge, then moved on the same step
        assert_eq!(pipes.pipes()[0].x, PLAYFIELD_WIDTH - PIPE_SPEED);
    }

    #[test]
    fn test_speed_multiplier_shortens_interval() {
        let mut pipes = stream();
        for _ in 0..50 {
            pipes.advance(1.0, 2.0, BIRD_X);
        }
        assert_eq!(pipes.pipes().len(), 1);
    }

    #[test]
    fn test_scores_once_after_trailing_edge_passes() {
        let mut pipes = stream();
        // Trailing edge sits exactly on the bird's left edge
        pipes.push(Pipe {
            x: BIRD_X - PIPE_WIDTH,
            top_height: 200.0,
            passed: false,
        });

        // Not yet strictly past
        assert_eq!(pipes.advance(0.0, 1.0, BIRD_X), 0);
        assert!(!pipes.pipes()[0].passed);

        assert_eq!(pipes.advance(1.0, 1.0, BIRD_X), 1);
        assert!(pipes.pipes()[0].passed);

        for _ in 0..10 {
            assert_eq!(pipes.advance(1.0, 1.0, BIRD_X), 0);
        }
    }

    #[test]
    fn test_offscreen_pipes_are_retired_in_order() {
        let mut pipes = stream();
        pipes.push(Pipe {
            x: -PIPE_WIDTH + 1.0,
            top_height: 100.0,
            passed: true,
        });
        pipes.push(Pipe {
            x: 200.0,
            top_height: 150.0,
            passed: false,
        });

        pipes.advance(1.0, 1.0, BIRD_X);

        assert_eq!(pipes.pipes().len(), 1);
        assert_eq!(pipes.pipes()[0].top_height, 150.0);
    }

    #[test]
    fn test_clear_resets_timer() {
        let mut pipes = stream();
        for _ in 0..150 {
            pipes.advance(1.0, 1.0, BIRD_X);
        }
        pipes.clear();
        assert!(pipes.pipes().is_empty());
        assert_eq!(pipes.spawn_timer(), 0.0);
    }

    #[test]
    fn test_degenerate_tuning_fails_fast() {
        let tuning = Tuning {
            min_segment: 200.0,
            ..Default::default()
        };
        assert!(matches!(
            PipeStream::new(tuning, 1),
            Err(ConfigError::DegenerateGap { .. })
        ));
    }

    #[test]
    fn test_same_seed_same_gaps() {
        let mut a = stream();
        let mut b = stream();
        for _ in 0..5 {
            a.spawn();
            b.spawn();
        }
        assert_eq!(a.pipes(), b.pipes());
    }

    proptest! {
        #[test]
        fn prop_segments_and_gap_fill_playfield(seed in any::<u64>()) {
            let mut pipes = PipeStream::new(Tuning::default(), seed).unwrap();
            let tuning = *pipes.tuning();
            for _ in 0..20 {
                pipes.spawn();
            }
            for pipe in pipes.pipes() {
                let bottom = pipe.bottom_height(tuning.pipe_gap, tuning.floor());
                prop_assert!(pipe.top_height >= tuning.min_segment);
                prop_assert!(bottom >= tuning.min_segment - 1e-3);
                let total = pipe.top_height + tuning.pipe_gap + bottom;
                prop_assert!((total - tuning.floor()).abs() < 1e-3);
            }
        }

        #[test]
        fn prop_order_is_preserved(steps in proptest::collection::vec(0.0f32..4.0, 1..400)) {
            let mut pipes = stream();
            for dt in steps {
                pipes.advance(dt, 1.0, BIRD_X);
                let xs: Vec<f32> = pipes.pipes().iter().map(|p| p.x).collect();
                prop_assert!(xs.windows(2).all(|w| w[0] <= w[1]));
            }
        }
    }
}
