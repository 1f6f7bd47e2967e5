//! Per-frame spectral descriptors computed directly from FFT bin magnitudes.

/// Spectral centroid in bin units (`Σ i·mag[i] / Σ mag[i]`). The caller
/// multiplies by `sample_rate / frame_size` to get Hz. Zero when the
/// spectrum is silent (matches the "centroid defined iff some band > 0"
/// invariant without special-casing it at the call site).
pub fn centroid(mags: &[f32]) -> f32 {
    let mut weighted_sum = 0.0;
    let mut magnitude_sum = 0.0;
    for (i, &mag) in mags.iter().enumerate() {
        weighted_sum += i as f32 * mag;
        magnitude_sum += mag;
    }
    if magnitude_sum > 1e-10 {
        weighted_sum / magnitude_sum
    } else {
        0.0
    }
}

/// Rolloff(`percent`) as a fraction of the bin range `[0, 1]`: the smallest
/// `k / mags.len()` such that the cumulative magnitude up to `k` covers at
/// least `percent` of the total.
pub fn rolloff(mags: &[f32], percent: f32) -> f32 {
    let total: f32 = mags.iter().sum();
    if total <= 1e-10 || mags.is_empty() {
        return 0.0;
    }
    let threshold = total * percent;
    let mut cumulative = 0.0;
    for (k, &mag) in mags.iter().enumerate() {
        cumulative += mag;
        if cumulative >= threshold {
            return (k + 1) as f32 / mags.len() as f32;
        }
    }
    1.0
}

/// Mean spectral magnitude.
///
/// This is named "flux" to match the source system's terminology, but it is
/// *not* the textbook frame-to-frame spectral flux (no previous-frame
/// difference is taken) — it is a proxy the preset algorithms and tests
/// were built against. Do not swap in the textbook definition without
/// introducing a configuration switch, since existing presets are tuned to
/// this scale.
pub fn flux(mags: &[f32]) -> f32 {
    if mags.is_empty() {
        return 0.0;
    }
    mags.iter().sum::<f32>() / mags.len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_spectrum_has_zero_centroid_and_rolloff() {
        let mags = vec![0.0; 128];
        assert_eq!(centroid(&mags), 0.0);
        assert_eq!(rolloff(&mags, 0.85), 0.0);
        assert_eq!(flux(&mags), 0.0);
    }

    #[test]
    fn single_bin_energy_centers_centroid_on_that_bin() {
        let mut mags = vec![0.0; 64];
        mags[10] = 1.0;
        assert_eq!(centroid(&mags), 10.0);
        assert_eq!(rolloff(&mags, 0.85), 11.0 / 64.0);
    }

    #[test]
    fn rolloff_covers_whole_spectrum_when_energy_is_uniform() {
        let mags = vec![1.0; 10];
        let r = rolloff(&mags, 0.85);
        assert!((r - 0.9).abs() < 1e-6, "got {r}");
    }
}
