//! 12-band energy accumulator with slow-moving peak normalisation.

use lumensync_core::BAND_COUNT;

/// Smoothing factor for each band's running peak.
const PEAK_EMA_ALPHA: f32 = 0.02;
const PEAK_FLOOR: f32 = 1e-6;

/// Splits the FFT magnitude vector into [`BAND_COUNT`] equal-width bins and
/// tracks a slow-moving per-band peak so band energy can be reported
/// normalised to `[0, 1]` instead of raw magnitude.
pub struct BandAccumulator {
    peaks: [f32; BAND_COUNT],
}

impl BandAccumulator {
    pub fn new() -> Self {
        Self {
            peaks: [PEAK_FLOOR; BAND_COUNT],
        }
    }

    /// Compute this frame's normalised band energies from FFT magnitudes,
    /// updating the running peaks as a side effect.
    pub fn process(&mut self, mags: &[f32]) -> [f32; BAND_COUNT] {
        let mut raw = [0.0f32; BAND_COUNT];
        if !mags.is_empty() {
            let bin_width = mags.len() as f32 / BAND_COUNT as f32;
            for (band, slot) in raw.iter_mut().enumerate() {
                let lo = (band as f32 * bin_width).floor() as usize;
                let hi = (((band + 1) as f32 * bin_width).floor() as usize).max(lo + 1).min(mags.len());
                let slice = &mags[lo..hi];
                *slot = if slice.is_empty() {
                    0.0
                } else {
                    slice.iter().sum::<f32>() / slice.len() as f32
                };
            }
        }

        let mut normalised = [0.0f32; BAND_COUNT];
        for i in 0..BAND_COUNT {
            self.peaks[i] = ((1.0 - PEAK_EMA_ALPHA) * self.peaks[i] + PEAK_EMA_ALPHA * raw[i]).max(PEAK_FLOOR);
            normalised[i] = (raw[i] / self.peaks[i]).clamp(0.0, 1.0);
        }
        normalised
    }
}

impl Default for BandAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_input_yields_all_zero_bands() {
        let mut bands = BandAccumulator::new();
        let mags = vec![0.0; 512];
        let out = bands.process(&mags);
        assert_eq!(out, [0.0; BAND_COUNT]);
    }

    #[test]
    fn sustained_energy_in_one_region_dominates_after_warmup() {
        let mut bands = BandAccumulator::new();
        let mut mags = vec![0.0f32; 512];
        // Energy concentrated in the bins covering band 3.
        for m in mags.iter_mut().skip(128).take(16) {
            *m = 1.0;
        }
        let mut last = [0.0; BAND_COUNT];
        for _ in 0..200 {
            last = bands.process(&mags);
        }
        let max_band = last
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(max_band, 3);
        assert!(last[3] >= 0.8, "expected warmed-up band to dominate, got {:?}", last);
    }
}
