//! Capture output and analyser output records.

use std::time::Instant;

/// Number of contiguous equal-width frequency bands the analyser produces.
pub const BAND_COUNT: usize = 12;

/// What Capture does when a downstream queue is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropPolicy {
    /// Drop the block that was about to be enqueued; sequence numbers still advance.
    #[default]
    Newest,
    /// Drop the oldest queued block to make room for the new one.
    Oldest,
}

/// A contiguous window of PCM samples handed from Capture to the Analyser.
///
/// `samples` is mono: stereo input has already been downmixed by averaging
/// channels. Successive blocks overlap by `frame_size - hop_size` samples;
/// the analyser treats each block as a fresh window, it does not reassemble
/// a continuous stream from them.
#[derive(Debug, Clone)]
pub struct AudioBlock {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub channels: u16,
    pub timestamp: Instant,
    /// Strictly monotonic across the lifetime of one capture session.
    pub sequence: u64,
}

impl AudioBlock {
    pub fn new(samples: Vec<f32>, sample_rate: u32, channels: u16, sequence: u64) -> Self {
        Self {
            samples,
            sample_rate,
            channels,
            timestamp: Instant::now(),
            sequence,
        }
    }
}

/// Per-hop analyser output: the full feature record an effect is evaluated against.
#[derive(Debug, Clone)]
pub struct AudioFeatures {
    /// RMS volume of the windowed samples, in `[0, 1]`.
    pub volume: f32,
    /// Peak absolute sample value, in `[0, 1]`.
    pub peak: f32,
    /// Normalised per-band magnitudes, `[0, 1]`, length [`BAND_COUNT`].
    pub bands: [f32; BAND_COUNT],
    /// Spectral centroid in bin units (multiply by `sample_rate / frame_size` for Hz).
    pub centroid: f32,
    /// Rolloff(0.85) as a fraction of the Nyquist-spanning bin range, `[0, 1]`.
    pub rolloff: f32,
    /// Mean spectral magnitude (see module docs on the non-standard "flux" definition).
    pub flux: f32,
    /// Zero-crossing rate of the raw (un-windowed) samples.
    pub zero_crossing_rate: f32,
    pub beat_detected: bool,
    /// Strength of the most recent beat, `[0, 1]`. Zero when `beat_detected` is false.
    pub beat_intensity: f32,
    /// Estimated tempo in BPM, `[60, 200]`, or `0` if fewer than two beats are known.
    pub tempo_bpm: f32,
    pub valence: f32,
    pub energy: f32,
    pub arousal: f32,
    pub timestamp: Instant,
    /// Equal to the [`AudioBlock::sequence`] this record was derived from.
    pub sequence: u64,
}

impl AudioFeatures {
    /// A features record with every magnitude at zero, used for silent/degenerate input.
    pub fn silent(timestamp: Instant, sequence: u64) -> Self {
        Self {
            volume: 0.0,
            peak: 0.0,
            bands: [0.0; BAND_COUNT],
            centroid: 0.0,
            rolloff: 0.0,
            flux: 0.0,
            zero_crossing_rate: 0.0,
            beat_detected: false,
            beat_intensity: 0.0,
            tempo_bpm: 0.0,
            valence: 0.0,
            energy: 0.0,
            arousal: 0.0,
            timestamp,
            sequence,
        }
    }

    /// Index of the loudest band, or `None` if every band is zero.
    pub fn dominant_band(&self) -> Option<usize> {
        self.bands
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v > 0.0)
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_features_have_no_dominant_band() {
        let f = AudioFeatures::silent(Instant::now(), 0);
        assert_eq!(f.dominant_band(), None);
        assert_eq!(f.bands.len(), BAND_COUNT);
    }

    #[test]
    fn dominant_band_picks_the_max() {
        let mut f = AudioFeatures::silent(Instant::now(), 1);
        f.bands[0] = 0.2;
        f.bands[7] = 0.9;
        f.bands[11] = 0.5;
        assert_eq!(f.dominant_band(), Some(7));
    }
}
