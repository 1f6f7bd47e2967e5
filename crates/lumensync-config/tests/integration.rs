//! Integration tests for lumensync-config: round-tripping real preset files
//! and pipeline config through disk.

use lumensync_config::{PipelineConfig, PresetFile, factory_presets, get_factory_preset, validate_preset};
use tempfile::TempDir;

#[test]
fn factory_preset_round_trips_through_a_real_file() {
    let dir = TempDir::new().unwrap();
    let preset = get_factory_preset("beat_flash").expect("beat_flash is a factory preset");

    let path = dir.path().join("beat_flash.toml");
    preset.save(&path).unwrap();

    let loaded = PresetFile::load(&path).unwrap();
    assert_eq!(preset, loaded);
    assert!(validate_preset(&loaded).is_ok());
}

#[test]
fn loaded_preset_evaluates_through_the_runtime_type() {
    let preset = get_factory_preset("volume_pulse").unwrap().to_preset();
    assert_eq!(preset.name, "Volume Pulse");
    assert!(preset.enabled);

    let mut effect = lumensync_effects::build(&preset.kind);
    let features = lumensync_core::AudioFeatures::silent(std::time::Instant::now(), 0);
    let device = lumensync_core::DeviceId::new("probe");
    assert!(!effect.evaluate(&device, &features).is_empty());
}

#[test]
fn every_factory_preset_is_valid() {
    for preset in factory_presets() {
        assert!(validate_preset(&preset).is_ok(), "{} should validate", preset.id);
    }
}

#[test]
fn pipeline_config_round_trips_through_a_real_file() {
    let dir = TempDir::new().unwrap();
    let mut config = PipelineConfig::default();
    config.audio.sample_rate = 48000;
    config.device.hue.burst = 9;

    let path = dir.path().join("lumensync.toml");
    config.save(&path).unwrap();

    let loaded = PipelineConfig::load(&path).unwrap();
    assert_eq!(config, loaded);
}

#[test]
fn malformed_preset_file_is_rejected_with_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "id = \"x\"\nname = \"broken\"\n[kind]\ntype = \"not_a_real_kind\"\n").unwrap();

    assert!(PresetFile::load(&path).is_err());
}
