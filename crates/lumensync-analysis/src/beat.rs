//! Adaptive-threshold beat detector.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Default length of the RMS history ring, ~0.5s at 512-sample hops/44.1kHz.
pub const DEFAULT_HISTORY_WINDOW: usize = 43;
pub const DEFAULT_SENSITIVITY: f32 = 1.5;
pub const DEFAULT_MIN_INTERVAL_MS: u64 = 250;

pub struct BeatDetector {
    history: VecDeque<f32>,
    history_window: usize,
    sensitivity: f32,
    min_interval: Duration,
    last_beat_time: Option<Instant>,
}

/// Outcome of feeding one frame's RMS volume to the detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeatResult {
    pub detected: bool,
    /// `(rms - mean) / max(mean, 1e-6)`, clamped to `[0, 1]`. Zero when no beat.
    pub intensity: f32,
}

impl BeatDetector {
    pub fn new(history_window: usize, sensitivity: f32, min_interval_ms: u64) -> Self {
        Self {
            history: VecDeque::with_capacity(history_window),
            history_window,
            sensitivity,
            min_interval: Duration::from_millis(min_interval_ms),
            last_beat_time: None,
        }
    }

    /// Feed this frame's RMS volume. `now` is the feature timestamp; passed
    /// in rather than read from the clock so tests can drive it explicitly.
    pub fn process(&mut self, rms: f32, now: Instant) -> BeatResult {
        if self.history.len() < self.history_window {
            self.history.push_back(rms);
            return BeatResult {
                detected: false,
                intensity: 0.0,
            };
        }

        let mean = self.history.iter().sum::<f32>() / self.history.len() as f32;
        let variance = self
            .history
            .iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f32>()
            / self.history.len() as f32;
        let stddev = variance.sqrt();
        let threshold = mean + stddev * self.sensitivity;

        let since_last = self
            .last_beat_time
            .map(|t| now.saturating_duration_since(t))
            .unwrap_or(self.min_interval);

        let result = if rms > threshold && since_last > self.min_interval {
            self.last_beat_time = Some(now);
            BeatResult {
                detected: true,
                intensity: ((rms - mean) / mean.max(1e-6)).clamp(0.0, 1.0),
            }
        } else {
            BeatResult {
                detected: false,
                intensity: 0.0,
            }
        };

        // Updated after the threshold test so the current frame cannot mask itself.
        if self.history.len() == self.history_window {
            self.history.pop_front();
        }
        self.history.push_back(rms);

        result
    }
}

impl Default for BeatDetector {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_WINDOW, DEFAULT_SENSITIVITY, DEFAULT_MIN_INTERVAL_MS)
    }
}
