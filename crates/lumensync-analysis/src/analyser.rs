//! Top-level per-block feature extraction: the Analyser stage.

use crate::bands::BandAccumulator;
use crate::beat::BeatDetector;
use crate::fft::{Fft, blackman_harris, magnitudes};
use crate::spectrum;
use crate::tempo::TempoEstimator;
use lumensync_core::{AudioBlock, AudioFeatures};

/// Fraction of total spectral energy the rolloff descriptor targets.
const ROLLOFF_PERCENT: f32 = 0.85;

/// Configuration the analyser needs beyond capture's own `frame_size`/`hop_size`.
#[derive(Debug, Clone, Copy)]
pub struct AnalyserConfig {
    pub frame_size: usize,
    pub beat_history_window: usize,
    pub beat_sensitivity: f32,
    pub beat_min_interval_ms: u64,
    pub tempo_history_window: usize,
}

impl Default for AnalyserConfig {
    fn default() -> Self {
        Self {
            frame_size: 1024,
            beat_history_window: crate::beat::DEFAULT_HISTORY_WINDOW,
            beat_sensitivity: crate::beat::DEFAULT_SENSITIVITY,
            beat_min_interval_ms: crate::beat::DEFAULT_MIN_INTERVAL_MS,
            tempo_history_window: crate::tempo::DEFAULT_HISTORY_WINDOW,
        }
    }
}

/// Stateful per-stream analyser: owns the FFT plan, band peak tracker, beat
/// detector, and tempo estimator across successive blocks.
pub struct Analyser {
    fft: Fft,
    bands: BandAccumulator,
    beat: BeatDetector,
    tempo: TempoEstimator,
}

impl Analyser {
    pub fn new(config: AnalyserConfig) -> Self {
        Self {
            fft: Fft::new(config.frame_size),
            bands: BandAccumulator::new(),
            beat: BeatDetector::new(
                config.beat_history_window,
                config.beat_sensitivity,
                config.beat_min_interval_ms,
            ),
            tempo: TempoEstimator::new(config.tempo_history_window),
        }
    }

    /// Derive an `AudioFeatures` record from one capture block.
    ///
    /// `block.samples` is expected to already be `frame_size` long (Capture
    /// emits overlapping frame-sized windows at hop intervals); this never
    /// reassembles a ring buffer of its own.
    pub fn process(&mut self, block: &AudioBlock) -> AudioFeatures {
        let n = block.samples.len();
        if n == 0 || block.samples.iter().all(|&s| s == 0.0) {
            return AudioFeatures::silent(block.timestamp, block.sequence);
        }

        let mut windowed = block.samples.clone();
        blackman_harris(&mut windowed);

        let spectrum_bins = self.fft.forward(&windowed);
        let mags = magnitudes(&spectrum_bins);

        let bands = self.bands.process(&mags);
        let centroid = spectrum::centroid(&mags);
        let rolloff = spectrum::rolloff(&mags, ROLLOFF_PERCENT);
        let flux = spectrum::flux(&mags);

        let rms = (windowed.iter().map(|s| s * s).sum::<f32>() / n as f32).sqrt();
        let peak = windowed.iter().fold(0.0f32, |acc, &s| acc.max(s.abs()));
        let zero_crossing_rate = zero_crossing_rate(&block.samples);

        let beat = self.beat.process(rms, block.timestamp);
        let tempo_bpm = if beat.detected {
            self.tempo.record_beat(block.timestamp)
        } else {
            self.tempo.estimate()
        };

        let energy = block.samples.iter().map(|s| s * s).sum::<f32>() / n as f32;
        let half = n / 2;
        let hf_energy: f32 = block.samples[half..].iter().map(|s| s * s).sum();
        let total_energy: f32 = block.samples.iter().map(|s| s * s).sum();
        let arousal = if total_energy > 1e-10 {
            hf_energy / total_energy
        } else {
            0.0
        };
        let valence = centroid / (n as f32 / 2.0);

        AudioFeatures {
            volume: rms.clamp(0.0, 1.0),
            peak: peak.clamp(0.0, 1.0),
            bands,
            centroid,
            rolloff,
            flux,
            zero_crossing_rate,
            beat_detected: beat.detected,
            beat_intensity: beat.intensity,
            tempo_bpm,
            valence: valence.clamp(0.0, 1.0),
            energy: energy.clamp(0.0, 1.0),
            arousal: arousal.clamp(0.0, 1.0),
            timestamp: block.timestamp,
            sequence: block.sequence,
        }
    }
}

fn zero_crossing_rate(samples: &[f32]) -> f32 {
    if samples.len() < 2 {
        return 0.0;
    }
    let crossings = samples
        .windows(2)
        .filter(|w| (w[0] >= 0.0) != (w[1] >= 0.0))
        .count();
    crossings as f32 / (samples.len() - 1) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_block_yields_zeroed_features_without_panicking() {
        let mut analyser = Analyser::new(AnalyserConfig::default());
        let block = AudioBlock::new(vec![0.0; 1024], 44100, 1, 0);
        let f = analyser.process(&block);
        assert_eq!(f.volume, 0.0);
        assert_eq!(f.bands, [0.0; lumensync_core::BAND_COUNT]);
        assert!(!f.beat_detected);
        assert_eq!(f.tempo_bpm, 0.0);
    }

    #[test]
    fn features_preserve_the_block_sequence_number() {
        let mut analyser = Analyser::new(AnalyserConfig::default());
        let samples: Vec<f32> = (0..1024)
            .map(|i| (std::f32::consts::TAU * 10.0 * i as f32 / 1024.0).sin())
            .collect();
        let block = AudioBlock::new(samples, 44100, 1, 7);
        let f = analyser.process(&block);
        assert_eq!(f.sequence, 7);
        assert_eq!(f.bands.len(), lumensync_core::BAND_COUNT);
    }

    #[test]
    fn zcr_of_alternating_signal_is_high() {
        let samples: Vec<f32> = (0..100).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        let zcr = zero_crossing_rate(&samples);
        assert!(zcr > 0.9, "got {zcr}");
    }
}
