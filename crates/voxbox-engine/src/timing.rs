//! Frame timing.
//!
//! Turns variable frame deltas into a whole number of fixed simulation
//! steps, and keeps a short history of frame times for reporting.

use std::collections::VecDeque;

/// Frame samples kept for averaging.
const MAX_SAMPLES: usize = 120;

/// Fixed-timestep accumulator.
#[derive(Debug)]
pub struct FrameTiming {
    /// Unsimulated time carried over between frames
    accumulator: f32,
    /// Simulation step length
    fixed_dt: f32,
    /// Maximum delta time to prevent spiral of death
    max_dt: f32,
    /// Recent (clamped) frame times
    frame_times: VecDeque<f32>,
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new(1.0 / 60.0, 0.25)
    }
}

impl FrameTiming {
    /// Creates a timer with the given step length and frame delta cap.
    #[must_use]
    pub fn new(fixed_dt: f32, max_dt: f32) -> Self {
        let fixed_dt = fixed_dt.max(0.001);
        Self {
            accumulator: 0.0,
            fixed_dt,
            max_dt: max_dt.max(fixed_dt),
            frame_times: VecDeque::with_capacity(MAX_SAMPLES),
        }
    }

    /// Get the fixed timestep value.
    #[must_use]
    pub const fn fixed_dt(&self) -> f32 {
        self.fixed_dt
    }

    /// Adds a frame delta and returns how many fixed steps to run.
    pub fn accumulate(&mut self, dt: f32) -> u32 {
        // Clamp to prevent spiral of death
        let dt = if dt.is_finite() { dt.clamp(0.0, self.max_dt) } else { 0.0 };

        self.frame_times.push_back(dt);
        if self.frame_times.len() > MAX_SAMPLES {
            self.frame_times.pop_front();
        }

        self.accumulator += dt;
        let mut count = 0;
        while self.accumulator >= self.fixed_dt {
            self.accumulator -= self.fixed_dt;
            count += 1;
        }
        count
    }

    /// Fraction of a step left in the accumulator, in `[0, 1)`.
    #[must_use]
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.fixed_dt
    }

    /// Frames per second averaged over recent frames.
    #[must_use]
    pub fn current_fps(&self) -> f32 {
        if self.frame_times.is_empty() {
            return 0.0;
        }

        let avg_frame_time: f32 =
            self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32;

        if avg_frame_time > 0.0 {
            1.0 / avg_frame_time
        } else {
            0.0
        }
    }

    /// Reset timing (call after pause or loading).
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.frame_times.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_steps_and_carry() {
        let mut timing = FrameTiming::new(0.01, 0.25);
        assert_eq!(timing.accumulate(0.025), 2);
        assert!((timing.alpha() - 0.5).abs() < 1e-3);
        assert_eq!(timing.accumulate(0.006), 1);
    }

    #[test]
    fn test_huge_delta_is_clamped() {
        let mut timing = FrameTiming::new(1.0 / 60.0, 0.25);
        let steps = timing.accumulate(10.0);
        assert!((14..=15).contains(&steps));
        assert!(timing.alpha() < 1.0);
    }

    #[test]
    fn test_bad_deltas_ignored() {
        let mut timing = FrameTiming::default();
        assert_eq!(timing.accumulate(-1.0), 0);
        assert_eq!(timing.accumulate(f32::NAN), 0);
        assert_eq!(timing.alpha(), 0.0);
    }

    #[test]
    fn test_fps_average() {
        let mut timing = FrameTiming::default();
        assert_eq!(timing.current_fps(), 0.0);
        for _ in 0..10 {
            timing.accumulate(0.02);
        }
        assert!((timing.current_fps() - 50.0).abs() < 0.1);

        timing.reset();
        assert_eq!(timing.current_fps(), 0.0);
    }
}
