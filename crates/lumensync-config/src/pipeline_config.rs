//! Pipeline-wide configuration: audio capture, beat/tempo tuning, dead-band
//! suppression, and per-device-kind scheduler defaults.
//!
//! Mirrors the config key table: every section below maps one-to-one onto a
//! `section.key` pair (e.g. `audio.sample_rate`, `device.hue.rate_cps`).

use lumensync_core::DropPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AudioConfig {
    pub sample_rate: u32,
    pub frame_size: usize,
    pub hop_size: usize,
    pub drop_policy: DropPolicyConfig,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            frame_size: 1024,
            hop_size: 512,
            drop_policy: DropPolicyConfig::Newest,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DropPolicyConfig {
    #[default]
    Newest,
    Oldest,
}

impl From<DropPolicyConfig> for DropPolicy {
    fn from(value: DropPolicyConfig) -> Self {
        match value {
            DropPolicyConfig::Newest => DropPolicy::Newest,
            DropPolicyConfig::Oldest => DropPolicy::Oldest,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BeatConfig {
    pub history_window: usize,
    pub sensitivity: f32,
    pub min_interval_ms: u32,
}

impl Default for BeatConfig {
    fn default() -> Self {
        Self {
            history_window: 43,
            sensitivity: 1.5,
            min_interval_ms: 250,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TempoConfig {
    pub history_window: usize,
}

impl Default for TempoConfig {
    fn default() -> Self {
        Self { history_window: 12 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EffectConfig {
    pub dead_band_rgb: u8,
    pub dead_band_brightness: u8,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self { dead_band_rgb: 4, dead_band_brightness: 4 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SchedulerConfig {
    pub outbox_size: usize,
    pub call_timeout_ms: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self { outbox_size: 8, call_timeout_ms: 1500 }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DeviceKindConfig {
    pub rate_cps: f32,
    pub burst: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DeviceConfig {
    pub hue: DeviceKindConfig,
    pub kasa: DeviceKindConfig,
    pub magichome: DeviceKindConfig,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            hue: DeviceKindConfig { rate_cps: 10.0, burst: 5 },
            kasa: DeviceKindConfig { rate_cps: 5.0, burst: 3 },
            magichome: DeviceKindConfig { rate_cps: 20.0, burst: 10 },
        }
    }
}

/// The full set of recognised config keys, loaded from one TOML file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct PipelineConfig {
    pub audio: AudioConfig,
    pub beat: BeatConfig,
    pub tempo: TempoConfig,
    pub effect: EffectConfig,
    pub scheduler: SchedulerConfig,
    pub device: DeviceConfig,
}

impl PipelineConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Ok(toml::from_str(&content)?)
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
            }
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_key_table() {
        let config = PipelineConfig::default();
        assert_eq!(config.audio.sample_rate, 44100);
        assert_eq!(config.beat.sensitivity, 1.5);
        assert_eq!(config.device.hue.rate_cps, 10.0);
        assert_eq!(config.device.kasa.burst, 3);
        assert_eq!(config.device.magichome.rate_cps, 20.0);
    }

    #[test]
    fn partial_toml_fills_in_remaining_defaults() {
        let config = PipelineConfig::from_toml("[audio]\nsample_rate = 48000\n").unwrap();
        assert_eq!(config.audio.sample_rate, 48000);
        assert_eq!(config.audio.frame_size, 1024);
        assert_eq!(config.scheduler.outbox_size, 8);
    }

    #[test]
    fn roundtrips_through_toml() {
        let mut config = PipelineConfig::default();
        config.effect.dead_band_rgb = 10;
        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed = PipelineConfig::from_toml(&toml).unwrap();
        assert_eq!(config, parsed);
    }
}
