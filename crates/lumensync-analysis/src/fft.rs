//! Windowed FFT front-end for the analyser.

use rustfft::{FftPlanner, num_complex::Complex};
use std::sync::Arc;

/// 4-term Blackman-Harris window coefficients.
const A0: f32 = 0.35875;
const A1: f32 = -0.48829;
const A2: f32 = 0.14128;
const A3: f32 = -0.01168;

/// Apply the 4-term Blackman-Harris window to `buffer` in place.
pub fn blackman_harris(buffer: &mut [f32]) {
    let n = buffer.len();
    if n <= 1 {
        return;
    }
    let denom = (n - 1) as f32;
    for (i, sample) in buffer.iter_mut().enumerate() {
        let x = std::f32::consts::TAU * i as f32 / denom;
        let w = A0 + A1 * x.cos() + A2 * (2.0 * x).cos() + A3 * (3.0 * x).cos();
        *sample *= w;
    }
}

/// A cached forward-FFT plan for one fixed, power-of-two frame size.
pub struct Fft {
    fft: Arc<dyn rustfft::Fft<f32>>,
    size: usize,
}

impl Fft {
    /// `size` must be a power of two (the analyser's `frame_size`).
    pub fn new(size: usize) -> Self {
        assert!(size.is_power_of_two(), "FFT size must be a power of two, got {size}");
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        Self { fft, size }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Forward-transform a real input of length `size` and return `size / 2`
    /// complex bins spanning DC..Nyquist (exclusive of Nyquist itself).
    pub fn forward(&self, input: &[f32]) -> Vec<Complex<f32>> {
        debug_assert_eq!(input.len(), self.size);
        let mut buffer: Vec<Complex<f32>> = input.iter().map(|&x| Complex::new(x, 0.0)).collect();
        self.fft.process(&mut buffer);
        buffer.truncate(self.size / 2);
        buffer
    }
}

/// Magnitude of each complex bin: `sqrt(re^2 + im^2)`.
pub fn magnitudes(spectrum: &[Complex<f32>]) -> Vec<f32> {
    spectrum.iter().map(|c| c.norm()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blackman_harris_tapers_to_zero_at_edges() {
        let mut buffer = vec![1.0; 256];
        blackman_harris(&mut buffer);
        assert!(buffer[0].abs() < 1e-3);
        assert!(buffer[255].abs() < 1e-3);
        assert!(buffer[128] > 0.9);
    }

    #[test]
    fn all_zero_input_yields_all_zero_magnitudes() {
        let fft = Fft::new(256);
        let input = vec![0.0; 256];
        let mags = magnitudes(&fft.forward(&input));
        assert_eq!(mags.len(), 128);
        assert!(mags.iter().all(|&m| m == 0.0));
    }

    #[test]
    fn full_scale_sine_concentrates_energy_at_its_bin() {
        let fft = Fft::new(1024);
        let freq_bin = 40;
        let input: Vec<f32> = (0..1024)
            .map(|i| (std::f32::consts::TAU * freq_bin as f32 * i as f32 / 1024.0).sin())
            .collect();
        let mags = magnitudes(&fft.forward(&input));
        let peak_bin = mags
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(peak_bin, freq_bin);
    }
}
