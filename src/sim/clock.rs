//! Frame clock
//!
//! Converts display-refresh timestamps into a dimensionless time scale so the
//! simulation runs at the same pace regardless of monitor refresh rate.

use crate::consts::{FRAME_MS, MAX_SUBSTEPS};

/// Turns successive wall-clock timestamps into nominal-frame deltas
#[derive(Debug, Clone, Default)]
pub struct Stepper {
    /// Timestamp (ms) of the previous frame callback
    last_ms: Option<f64>,
}

impl Stepper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time scale for the frame at `now_ms`: 1.0 means exactly one nominal
    /// frame elapsed. The first call and any backwards clock jump yield 0.
    /// No upper bound is applied here; see [`Stepper::substeps`].
    pub fn step(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) if now_ms > last => ((now_ms - last) / FRAME_MS) as f32,
            _ => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt
    }

    /// Forget the previous timestamp (e.g. after the tab was hidden)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }

    /// Split a catch-up step into pieces of at most one nominal frame.
    ///
    /// A long stall would otherwise move pipes far enough in one step to
    /// tunnel through the bird. Anything beyond `MAX_SUBSTEPS` frames is
    /// dropped.
    pub fn substeps(dt: f32) -> impl Iterator<Item = f32> {
        let budget = dt.clamp(0.0, MAX_SUBSTEPS as f32);
        let whole = budget.floor() as u32;
        let rest = budget - whole as f32;
        let tail = (rest > f32::EPSILON).then_some(rest);
        std::iter::repeat_n(1.0, whole as usize).chain(tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_step_is_zero() {
        let mut stepper = Stepper::new();
        assert_eq!(stepper.step(1234.0), 0.0);
    }

    #[test]
    fn test_nominal_frame_is_one() {
        let mut stepper = Stepper::new();
        stepper.step(0.0);
        let dt = stepper.step(FRAME_MS);
        assert!((dt - 1.0).abs() < 1e-6);

        // 120 Hz display runs half-size steps
        let dt = stepper.step(FRAME_MS * 1.5);
        assert!((dt - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_backwards_clock_is_zero() {
        let mut stepper = Stepper::new();
        stepper.step(1000.0);
        assert_eq!(stepper.step(900.0), 0.0);
        // Resumes relative to the latest timestamp
        let dt = stepper.step(900.0 + FRAME_MS * 2.0);
        assert!((dt - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_long_pause_is_not_clamped() {
        let mut stepper = Stepper::new();
        stepper.step(0.0);
        let dt = stepper.step(FRAME_MS * 300.0);
        assert!((dt - 300.0).abs() < 1e-3);
    }

    #[test]
    fn test_reset_forgets_previous_frame() {
        let mut stepper = Stepper::new();
        stepper.step(0.0);
        stepper.reset();
        assert_eq!(stepper.step(5000.0), 0.0);
    }

    #[test]
    fn test_substeps() {
        let steps: Vec<f32> = Stepper::substeps(2.5).collect();
        assert_eq!(steps, vec![1.0, 1.0, 0.5]);

        let steps: Vec<f32> = Stepper::substeps(0.25).collect();
        assert_eq!(steps, vec![0.25]);

        assert_eq!(Stepper::substeps(0.0).count(), 0);
        assert_eq!(Stepper::substeps(-1.0).count(), 0);

        // Catch-up is capped
        let total: f32 = Stepper::substeps(300.0).sum();
        assert_eq!(total, MAX_SUBSTEPS as f32);
    }
}
