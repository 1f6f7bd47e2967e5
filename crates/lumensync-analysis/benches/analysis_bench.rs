//! Criterion benchmarks for lumensync-analysis components.
//!
//! Run with: cargo bench -p lumensync-analysis

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use lumensync_analysis::fft::{Fft, blackman_harris, magnitudes};
use lumensync_analysis::{Analyser, AnalyserConfig, BandAccumulator};
use lumensync_core::AudioBlock;
use std::f32::consts::PI;

const SAMPLE_RATE: f32 = 44100.0;

fn generate_sine(size: usize, frequency: f32) -> Vec<f32> {
    (0..size)
        .map(|i| (2.0 * PI * frequency * i as f32 / SAMPLE_RATE).sin())
        .collect()
}

fn generate_complex_signal(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE;
            let f1 = (2.0 * PI * 110.0 * t).sin();
            let f2 = 0.5 * (2.0 * PI * 440.0 * t).sin();
            let f3 = 0.25 * (2.0 * PI * 1760.0 * t).sin();
            (f1 + f2 + f3) * 0.5
        })
        .collect()
}

fn bench_fft_forward(c: &mut Criterion) {
    let mut group = c.benchmark_group("FFT_Forward");

    for &size in &[256usize, 512, 1024, 2048, 4096] {
        let fft = Fft::new(size);
        let input = generate_sine(size, 440.0);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let result = fft.forward(black_box(&input));
                black_box(result)
            })
        });
    }

    group.finish();
}

fn bench_blackman_harris_window(c: &mut Criterion) {
    let mut group = c.benchmark_group("Window_BlackmanHarris");

    for &size in &[256usize, 1024, 4096] {
        let buffer = generate_sine(size, 440.0);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let mut buf = buffer.clone();
                blackman_harris(black_box(&mut buf));
                black_box(buf)
            })
        });
    }

    group.finish();
}

fn bench_magnitudes(c: &mut Criterion) {
    let mut group = c.benchmark_group("Magnitudes");

    for &size in &[1024usize, 2048, 4096] {
        let fft = Fft::new(size);
        let signal = generate_complex_signal(size);
        let spectrum = fft.forward(&signal);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let result = magnitudes(black_box(&spectrum));
                black_box(result)
            })
        });
    }

    group.finish();
}

fn bench_band_accumulator(c: &mut Criterion) {
    let mut group = c.benchmark_group("BandAccumulator");

    let size = 2048;
    let fft = Fft::new(size);
    let signal = generate_complex_signal(size);
    let mags = magnitudes(&fft.forward(&signal));

    group.bench_function("process", |b| {
        let mut bands = BandAccumulator::new();
        b.iter(|| {
            let result = bands.process(black_box(&mags));
            black_box(result)
        })
    });

    group.finish();
}

fn bench_analyser_process(c: &mut Criterion) {
    let mut group = c.benchmark_group("Analyser_Process");

    for &frame_size in &[512usize, 1024, 2048] {
        let config = AnalyserConfig { frame_size, ..AnalyserConfig::default() };
        let samples = generate_complex_signal(frame_size);

        group.bench_with_input(BenchmarkId::from_parameter(frame_size), &frame_size, |b, _| {
            let mut analyser = Analyser::new(config);
            let mut sequence = 0u64;
            b.iter(|| {
                let block = AudioBlock::new(samples.clone(), 44100, 1, sequence);
                sequence += 1;
                let result = analyser.process(black_box(&block));
                black_box(result)
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_fft_forward,
    bench_blackman_harris_window,
    bench_magnitudes,
    bench_band_accumulator,
    bench_analyser_process,
);
criterion_main!(benches);
