//! Median-interval tempo estimator.

use std::collections::VecDeque;
use std::time::Instant;

pub const DEFAULT_HISTORY_WINDOW: usize = 12;
const MIN_BPM: f32 = 60.0;
const MAX_BPM: f32 = 200.0;

/// Tracks recent beat timestamps and estimates BPM from their median interval.
pub struct TempoEstimator {
    beats: VecDeque<Instant>,
    history_window: usize,
}

impl TempoEstimator {
    pub fn new(history_window: usize) -> Self {
        Self {
            beats: VecDeque::with_capacity(history_window),
            history_window,
        }
    }

    /// Record a beat and return the current tempo estimate.
    ///
    /// Returns `0` (unknown) while fewer than two beats are in the window,
    /// matching spec's explicit choice over the source's 120 BPM fallback.
    pub fn record_beat(&mut self, at: Instant) -> f32 {
        if self.beats.len() == self.history_window {
            self.beats.pop_front();
        }
        self.beats.push_back(at);
        self.estimate()
    }

    /// Re-report the current estimate without recording a new beat.
    pub fn estimate(&self) -> f32 {
        if self.beats.len() < 2 {
            return 0.0;
        }
        let mut intervals: Vec<f32> = self
            .beats
            .iter()
            .zip(self.beats.iter().skip(1))
            .map(|(a, b)| b.duration_since(*a).as_secs_f32())
            .collect();
        intervals.sort_by(|a, b| a.total_cmp(b));
        let median = intervals[intervals.len() / 2];
        if median <= 0.0 {
            return 0.0;
        }
        (60.0 / median).clamp(MIN_BPM, MAX_BPM)
    }
}

impl Default for TempoEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_WINDOW)
    }
}
