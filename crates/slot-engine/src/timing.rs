//! Spin timing profiles and easing
//!
//! One spin is five staggered reel animations: reel `i` starts
//! `i * stagger_start_ms` after the spin begins and runs for
//! `base_duration_ms + i * stagger_stop_ms`, so reels stop left to right in
//! a waterfall. Later reels also travel more full rotations before landing.

use serde::{Deserialize, Serialize};

/// Quartic ease-out: fast launch, long deceleration into the stop.
pub fn ease_out_quart(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(4)
}

/// Timing parameters for one spin cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Spin duration of the first reel (ms)
    pub base_duration_ms: f64,

    /// Delay between consecutive reel starts (ms)
    pub stagger_start_ms: f64,

    /// Extra duration added per reel index (ms), producing the
    /// left-to-right stop waterfall
    pub stagger_stop_ms: f64,

    /// Full strip rotations for reel 0; reel `i` adds `i / 2` more
    pub base_rotations: u32,

    /// Safety margin after the last reel's stop before a timer-driven
    /// completion check should fire (ms)
    pub completion_buffer_ms: f64,
}

impl TimingConfig {
    /// Normal gameplay timing.
    pub fn normal() -> Self {
        Self {
            base_duration_ms: 4000.0,
            stagger_start_ms: 80.0,
            stagger_stop_ms: 150.0,
            base_rotations: 3,
            completion_buffer_ms: 100.0,
        }
    }

    /// Fast mode: same choreography, roughly a third of the wait.
    pub fn turbo() -> Self {
        Self {
            base_duration_ms: 1200.0,
            stagger_start_ms: 40.0,
            stagger_stop_ms: 60.0,
            base_rotations: 2,
            completion_buffer_ms: 50.0,
        }
    }

    /// Near-instant timing for tests and headless simulation.
    pub fn studio() -> Self {
        Self {
            base_duration_ms: 40.0,
            stagger_start_ms: 5.0,
            stagger_stop_ms: 10.0,
            base_rotations: 1,
            completion_buffer_ms: 10.0,
        }
    }

    /// Scale every duration by a factor (< 1.0 = faster). Rotation count is
    /// choreography, not time, and stays put.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            base_duration_ms: self.base_duration_ms * factor,
            stagger_start_ms: self.stagger_start_ms * factor,
            stagger_stop_ms: self.stagger_stop_ms * factor,
            base_rotations: self.base_rotations,
            completion_buffer_ms: self.completion_buffer_ms * factor,
        }
    }

    /// Start delay for a reel relative to the spin request.
    pub fn start_delay_for(&self, reel: usize) -> f64 {
        reel as f64 * self.stagger_start_ms
    }

    /// Animation duration for a reel.
    pub fn duration_for(&self, reel: usize) -> f64 {
        self.base_duration_ms + reel as f64 * self.stagger_stop_ms
    }

    /// Full rotations a reel travels before landing.
    pub fn rotations_for(&self, reel: usize) -> u32 {
        self.base_rotations + (reel / 2) as u32
    }

    /// Time from spin start until the last reel has stopped and the
    /// completion buffer has elapsed.
    pub fn total_duration(&self, reel_count: usize) -> f64 {
        if reel_count == 0 {
            return 0.0;
        }
        let last = reel_count - 1;
        self.start_delay_for(last) + self.duration_for(last) + self.completion_buffer_ms
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::normal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_out_quart_endpoints() {
        assert_eq!(ease_out_quart(0.0), 0.0);
        assert_eq!(ease_out_quart(1.0), 1.0);
    }

    #[test]
    fn test_ease_out_quart_decelerates() {
        // First half covers far more ground than the second half
        let first = ease_out_quart(0.5);
        let second = 1.0 - first;
        assert!(first > 0.9);
        assert!(second < 0.1);
        // Monotonic
        let mut prev = 0.0;
        for i in 1..=100 {
            let v = ease_out_quart(i as f64 / 100.0);
            assert!(v >= prev);
            prev = v;
        }
    }

    #[test]
    fn test_stagger_schedule() {
        let timing = TimingConfig::normal();
        assert_eq!(timing.start_delay_for(0), 0.0);
        assert_eq!(timing.start_delay_for(4), 320.0);
        assert_eq!(timing.duration_for(0), 4000.0);
        assert_eq!(timing.duration_for(4), 4600.0);
    }

    #[test]
    fn test_rotations_increase_with_reel_index() {
        let timing = TimingConfig::normal();
        assert_eq!(timing.rotations_for(0), 3);
        assert_eq!(timing.rotations_for(1), 3);
        assert_eq!(timing.rotations_for(2), 4);
        assert_eq!(timing.rotations_for(4), 5);
    }

    #[test]
    fn test_total_duration_covers_last_reel() {
        let timing = TimingConfig::normal();
        let total = timing.total_duration(5);
        assert_eq!(total, 320.0 + 4600.0 + 100.0);
        assert!(total > timing.start_delay_for(4) + timing.duration_for(4));
    }

    #[test]
    fn test_scaled_profile() {
        let half = TimingConfig::normal().scaled(0.5);
        assert_eq!(half.base_duration_ms, 2000.0);
        assert_eq!(half.base_rotations, 3);
    }
}
