//! Preset persistence and pipeline configuration for lumensync.
//!
//! This crate provides TOML loading/saving for presets and the pipeline's
//! tunable parameters, plus parameter validation and platform-specific
//! config directories.
//!
//! # Example
//!
//! ```rust,no_run
//! use lumensync_config::{PresetFile, user_presets_dir};
//!
//! let preset = PresetFile::load("my_preset.toml").unwrap();
//! let path = user_presets_dir().join("my_preset.toml");
//! preset.save(&path).unwrap();
//! ```

mod error;
mod pipeline_config;
mod preset_file;

/// Platform-specific paths for presets and configuration.
pub mod paths;

/// Preset validation.
pub mod validation;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::ConfigError;
pub use pipeline_config::{AudioConfig, BeatConfig, DeviceConfig, DeviceKindConfig, DropPolicyConfig, EffectConfig, PipelineConfig, SchedulerConfig, TempoConfig};
pub use preset_file::{DeviceSelectorFile, PresetFile, PresetKindFile};
pub use validation::{ValidationError, ValidationResult, validate_all, validate_preset};
pub use paths::{find_preset, list_user_presets, system_presets_dir, user_config_dir, user_presets_dir};
pub use factory_presets::{FACTORY_PRESET_NAMES, factory_preset_names, factory_presets, get_factory_preset, is_factory_preset};

/// Re-export the preset catalog from `lumensync-registry`.
pub use lumensync_registry::{PresetCategory, PresetDescriptor, PresetRegistry};
