//! On-disk preset format and TOML load/save.
//!
//! `lumensync_core::Preset` has no `serde` dependency — it's the runtime
//! type the pipeline evaluates against every hop. [`PresetFile`] is the
//! serializable counterpart: a tagged union mirroring [`PresetKind`]'s
//! variants, converted to and from the runtime type at the config boundary.
//!
//! # TOML Format
//!
//! ```toml
//! id = "living-room-pulse"
//! name = "Living Room Pulse"
//! enabled = true
//!
//! [kind]
//! type = "beat_pulse"
//! peak_brightness = 255
//! fall_brightness = 40
//! fall_delay_ms = 120
//! ```

use lumensync_core::{DeviceSelector, Preset, PresetKind};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PresetKindFile {
    VolumeReactive { b_min: u8, b_max: u8 },
    BeatPulse { peak_brightness: u8, fall_brightness: u8, fall_delay_ms: u32 },
    FrequencyColor,
    SpectrumAnalyzer,
    MoodLighting,
    PartyMode { k_phi: f32 },
    Static { r: u8, g: u8, b: u8, brightness: u8 },
}

impl From<&PresetKind> for PresetKindFile {
    fn from(kind: &PresetKind) -> Self {
        match kind.clone() {
            PresetKind::VolumeReactive { b_min, b_max } => PresetKindFile::VolumeReactive { b_min, b_max },
            PresetKind::BeatPulse { peak_brightness, fall_brightness, fall_delay_ms } => {
                PresetKindFile::BeatPulse { peak_brightness, fall_brightness, fall_delay_ms }
            }
            PresetKind::FrequencyColor => PresetKindFile::FrequencyColor,
            PresetKind::SpectrumAnalyzer => PresetKindFile::SpectrumAnalyzer,
            PresetKind::MoodLighting => PresetKindFile::MoodLighting,
            PresetKind::PartyMode { k_phi } => PresetKindFile::PartyMode { k_phi },
            PresetKind::Static { r, g, b, brightness } => PresetKindFile::Static { r, g, b, brightness },
        }
    }
}

impl From<PresetKindFile> for PresetKind {
    fn from(file: PresetKindFile) -> Self {
        match file {
            PresetKindFile::VolumeReactive { b_min, b_max } => PresetKind::VolumeReactive { b_min, b_max },
            PresetKindFile::BeatPulse { peak_brightness, fall_brightness, fall_delay_ms } => {
                PresetKind::BeatPulse { peak_brightness, fall_brightness, fall_delay_ms }
            }
            PresetKindFile::FrequencyColor => PresetKind::FrequencyColor,
            PresetKindFile::SpectrumAnalyzer => PresetKind::SpectrumAnalyzer,
            PresetKindFile::MoodLighting => PresetKind::MoodLighting,
            PresetKindFile::PartyMode { k_phi } => PresetKind::PartyMode { k_phi },
            PresetKindFile::Static { r, g, b, brightness } => PresetKind::Static { r, g, b, brightness },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeviceSelectorFile {
    Ids { ids: Vec<String> },
    Group { group: String },
    All,
}

impl Default for DeviceSelectorFile {
    fn default() -> Self {
        DeviceSelectorFile::All
    }
}

impl From<&DeviceSelector> for DeviceSelectorFile {
    fn from(selector: &DeviceSelector) -> Self {
        match selector {
            DeviceSelector::Ids(ids) => DeviceSelectorFile::Ids { ids: ids.iter().map(|id| id.0.clone()).collect() },
            DeviceSelector::Group(group) => DeviceSelectorFile::Group { group: group.clone() },
            DeviceSelector::All => DeviceSelectorFile::All,
        }
    }
}

impl From<DeviceSelectorFile> for DeviceSelector {
    fn from(file: DeviceSelectorFile) -> Self {
        match file {
            DeviceSelectorFile::Ids { ids } => DeviceSelector::Ids(ids.into_iter().map(lumensync_core::DeviceId::new).collect()),
            DeviceSelectorFile::Group { group } => DeviceSelector::Group(group),
            DeviceSelectorFile::All => DeviceSelector::All,
        }
    }
}

/// The TOML-serializable form of one [`Preset`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PresetFile {
    pub id: String,
    pub name: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub selector: DeviceSelectorFile,
    pub kind: PresetKindFile,
}

fn default_enabled() -> bool {
    true
}

impl PresetFile {
    pub fn to_preset(&self) -> Preset {
        Preset::new(self.id.clone(), self.name.clone(), self.kind.clone().into())
            .with_selector(self.selector.clone().into())
            .with_enabled(self.enabled)
    }

    pub fn from_preset(preset: &Preset) -> Self {
        Self {
            id: preset.id.clone(),
            name: preset.name.clone(),
            enabled: preset.enabled,
            selector: (&preset.selector).into(),
            kind: (&preset.kind).into(),
        }
    }

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

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_through_the_runtime_preset_type() {
        let file = PresetFile {
            id: "p1".into(),
            name: "Pulse".into(),
            enabled: true,
            selector: DeviceSelectorFile::All,
            kind: PresetKindFile::BeatPulse { peak_brightness: 255, fall_brightness: 40, fall_delay_ms: 120 },
        };
        let preset = file.to_preset();
        let back = PresetFile::from_preset(&preset);
        assert_eq!(file, back);
    }

    #[test]
    fn toml_roundtrip_preserves_parameters() {
        let file = PresetFile {
            id: "p2".into(),
            name: "Mood".into(),
            enabled: false,
            selector: DeviceSelectorFile::Group { group: "living-room".into() },
            kind: PresetKindFile::MoodLighting,
        };
        let toml = file.to_toml().unwrap();
        let parsed = PresetFile::from_toml(&toml).unwrap();
        assert_eq!(file, parsed);
    }

    #[test]
    fn device_ids_selector_roundtrips() {
        let file = PresetFile {
            id: "p3".into(),
            name: "Targeted".into(),
            enabled: true,
            selector: DeviceSelectorFile::Ids { ids: vec!["d1".into(), "d2".into()] },
            kind: PresetKindFile::FrequencyColor,
        };
        let preset = file.to_preset();
        assert_eq!(preset.selector, DeviceSelector::Ids(vec![lumensync_core::DeviceId::new("d1"), lumensync_core::DeviceId::new("d2")]));
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let toml = r#"
id = "min"
name = "Minimal"

[kind]
type = "static"
r = 255
g = 255
b = 255
brightness = 255
"#;
        let file = PresetFile::from_toml(toml).unwrap();
        assert!(file.enabled);
        assert_eq!(file.selector, DeviceSelectorFile::All);
    }
}
