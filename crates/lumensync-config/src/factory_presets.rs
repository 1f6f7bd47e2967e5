//! Factory presets bundled with the lumensync library.
//!
//! These are always available without requiring a preset file on disk, one
//! per built-in algorithm, with reasonable default parameters.

use crate::preset_file::PresetFile;

pub static FACTORY_PRESET_NAMES: &[&str] = &[
    "off",
    "volume_pulse",
    "beat_flash",
    "spectrum",
    "calm_mood",
    "rainbow_party",
];

static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("off", OFF_PRESET),
    ("volume_pulse", VOLUME_PULSE_PRESET),
    ("beat_flash", BEAT_FLASH_PRESET),
    ("spectrum", SPECTRUM_PRESET),
    ("calm_mood", CALM_MOOD_PRESET),
    ("rainbow_party", RAINBOW_PARTY_PRESET),
];

const OFF_PRESET: &str = r#"
id = "off"
name = "Off"

[kind]
type = "static"
r = 0
g = 0
b = 0
brightness = 0
"#;

const VOLUME_PULSE_PRESET: &str = r#"
id = "volume_pulse"
name = "Volume Pulse"

[kind]
type = "volume_reactive"
b_min = 10
b_max = 255
"#;

const BEAT_FLASH_PRESET: &str = r#"
id = "beat_flash"
name = "Beat Flash"

[kind]
type = "beat_pulse"
peak_brightness = 255
fall_brightness = 40
fall_delay_ms = 120
"#;

const SPECTRUM_PRESET: &str = r#"
id = "spectrum"
name = "Spectrum"

[kind]
type = "spectrum_analyzer"
"#;

const CALM_MOOD_PRESET: &str = r#"
id = "calm_mood"
name = "Calm Mood"

[kind]
type = "mood_lighting"
"#;

const RAINBOW_PARTY_PRESET: &str = r#"
id = "rainbow_party"
name = "Rainbow Party"

[kind]
type = "party_mode"
k_phi = 37.0
"#;

pub fn factory_presets() -> Vec<PresetFile> {
    FACTORY_PRESETS_TOML
        .iter()
        .map(|(name, toml)| PresetFile::from_toml(toml).unwrap_or_else(|e| panic!("factory preset '{name}' failed to parse: {e}")))
        .collect()
}

pub fn get_factory_preset(name: &str) -> Option<PresetFile> {
    let lower = name.to_lowercase();
    FACTORY_PRESETS_TOML
        .iter()
        .find(|(id, _)| id.to_lowercase() == lower)
        .map(|(_, toml)| PresetFile::from_toml(toml).expect("embedded factory preset is well-formed"))
        .or_else(|| factory_presets().into_iter().find(|p| p.name.to_lowercase() == lower))
}

pub fn factory_preset_names() -> &'static [&'static str] {
    FACTORY_PRESET_NAMES
}

pub fn is_factory_preset(name: &str) -> bool {
    let lower = name.to_lowercase();
    FACTORY_PRESET_NAMES.iter().any(|n| n.to_lowercase() == lower)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_factory_presets_parse_and_validate() {
        for (name, toml) in FACTORY_PRESETS_TOML {
            let file = PresetFile::from_toml(toml).unwrap_or_else(|e| panic!("'{name}' failed to parse: {e}"));
            assert!(!file.name.is_empty(), "preset '{name}' should have a name");
            assert!(crate::validation::validate_preset(&file).is_ok(), "preset '{name}' should validate");
        }
    }

    #[test]
    fn get_factory_preset_is_case_insensitive() {
        let preset = get_factory_preset("BEAT_FLASH").expect("should exist");
        assert_eq!(preset.name, "Beat Flash");
        assert!(get_factory_preset("nonexistent").is_none());
    }

    #[test]
    fn factory_preset_names_matches_table() {
        let names = factory_preset_names();
        assert!(names.contains(&"off"));
        assert!(names.contains(&"rainbow_party"));
        assert_eq!(names.len(), factory_presets().len());
    }

    #[test]
    fn off_preset_is_black_and_zero_brightness() {
        use crate::preset_file::PresetKindFile;
        let off = get_factory_preset("off").unwrap();
        assert!(matches!(off.kind, PresetKindFile::Static { r: 0, g: 0, b: 0, brightness: 0 }));
    }

    #[test]
    fn is_factory_preset_recognizes_known_names() {
        assert!(is_factory_preset("spectrum"));
        assert!(!is_factory_preset("not-a-real-preset"));
    }
}
