//! Integration tests exercising the full Analyser pipeline end to end.

use lumensync_analysis::{Analyser, AnalyserConfig};
use lumensync_core::{AudioBlock, BAND_COUNT};
use std::time::{Duration, Instant};

fn sine_block(freq_hz: f32, sample_rate: f32, n: usize, sequence: u64) -> AudioBlock {
    let samples: Vec<f32> = (0..n)
        .map(|i| (std::f32::consts::TAU * freq_hz * i as f32 / sample_rate).sin())
        .collect();
    AudioBlock::new(samples, sample_rate as u32, 1, sequence)
}

#[test]
fn all_zero_input_never_panics_and_reports_no_beat() {
    let mut analyser = Analyser::new(AnalyserConfig::default());
    let block = AudioBlock::new(vec![0.0; 1024], 44100, 1, 0);
    let f = analyser.process(&block);
    assert_eq!(f.centroid, 0.0);
    assert_eq!(f.bands, [0.0; BAND_COUNT]);
    assert!(!f.beat_detected);
    assert_eq!(f.tempo_bpm, 0.0);
}

#[test]
fn sequence_numbers_pass_through_unchanged_and_monotonic() {
    let mut analyser = Analyser::new(AnalyserConfig::default());
    let mut last_seq = None;
    for seq in 0..20u64 {
        let block = sine_block(220.0, 44100.0, 1024, seq);
        let f = analyser.process(&block);
        assert_eq!(f.sequence, seq);
        if let Some(prev) = last_seq {
            assert!(f.sequence > prev);
        }
        last_seq = Some(f.sequence);
    }
}

#[test]
fn silence_to_full_volume_ramp_triggers_exactly_one_beat() {
    let config = AnalyserConfig {
        beat_history_window: 8,
        beat_min_interval_ms: 50,
        ..AnalyserConfig::default()
    };
    let mut analyser = Analyser::new(config);

    // Warm up the beat history with quiet blocks, then one loud block.
    let mut beats = 0;
    for seq in 0..config.beat_history_window as u64 {
        let block = AudioBlock {
            samples: vec![0.01; 1024],
            sample_rate: 44100,
            channels: 1,
            timestamp: Instant::now() + Duration::from_millis(seq * 20),
            sequence: seq,
        };
        let f = analyser.process(&block);
        if f.beat_detected {
            beats += 1;
        }
    }
    let loud_seq = config.beat_history_window as u64;
    let loud = AudioBlock {
        samples: vec![0.99; 1024],
        sample_rate: 44100,
        channels: 1,
        timestamp: Instant::now() + Duration::from_millis(loud_seq * 20 + 500),
        sequence: loud_seq,
    };
    let f = analyser.process(&loud);
    if f.beat_detected {
        beats += 1;
    }
    assert_eq!(beats, 1, "expected exactly one beat on the ramp");
}

#[test]
fn metronome_at_120_bpm_settles_tempo_within_tolerance() {
    let mut analyser = Analyser::new(AnalyserConfig {
        beat_history_window: 4,
        beat_min_interval_ms: 50,
        ..AnalyserConfig::default()
    });

    let mut t = Instant::now();
    let beat_interval = Duration::from_millis(500); // 120 BPM
    let mut last_tempo = 0.0;
    let mut seq = 0u64;
    for _ in 0..16 {
        // Quiet filler block between beats so the adaptive threshold has contrast.
        for _ in 0..4 {
            let block = AudioBlock {
                samples: vec![0.02; 1024],
                sample_rate: 44100,
                channels: 1,
                timestamp: t,
                sequence: seq,
            };
            analyser.process(&block);
            seq += 1;
            t += Duration::from_millis(20);
        }
        let loud = AudioBlock {
            samples: vec![0.95; 1024],
            sample_rate: 44100,
            channels: 1,
            timestamp: t,
            sequence: seq,
        };
        let f = analyser.process(&loud);
        if f.tempo_bpm > 0.0 {
            last_tempo = f.tempo_bpm;
        }
        seq += 1;
        t += beat_interval;
    }

    assert!(
        (115.0..=125.0).contains(&last_tempo),
        "tempo {last_tempo} should settle near 120 BPM"
    );
}
