//! Preset registry and factory for lumensync lighting presets.
//!
//! This crate provides a centralized catalog of the built-in preset
//! algorithms: discovery by name, metadata for building a configuration UI
//! or CLI listing, and a factory that hands back default parameters for a
//! given preset kind.
//!
//! # Example
//!
//! ```rust
//! use lumensync_registry::{PresetRegistry, PresetCategory};
//!
//! let registry = PresetRegistry::new();
//!
//! for preset in registry.all_presets() {
//!     println!("{}: {}", preset.name, preset.description);
//! }
//!
//! for preset in registry.presets_in_category(PresetCategory::Reactive) {
//!     println!("Reactive preset: {}", preset.name);
//! }
//! ```

use lumensync_core::PresetKind;

/// Category of preset algorithm, for organization and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresetCategory {
    /// Drives brightness or color directly from a running audio feature.
    Reactive,
    /// Slow, feature-averaged lighting that doesn't chase individual beats.
    Ambient,
    /// Fixed output, no audio dependency.
    Static,
}

impl PresetCategory {
    pub const fn name(&self) -> &'static str {
        match self {
            PresetCategory::Reactive => "Reactive",
            PresetCategory::Ambient => "Ambient",
            PresetCategory::Static => "Static",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            PresetCategory::Reactive => "Presets that respond directly to a running audio feature",
            PresetCategory::Ambient => "Slow-moving presets driven by averaged mood features",
            PresetCategory::Static => "Fixed output with no audio dependency",
        }
    }
}

/// Describes one preset algorithm in the registry.
#[derive(Debug, Clone)]
pub struct PresetDescriptor {
    /// Unique identifier, matches [`lumensync_core::PresetKind::type_name`].
    pub id: &'static str,
    pub name: &'static str,
    pub short_name: &'static str,
    pub description: &'static str,
    pub category: PresetCategory,
}

type DefaultKindFn = fn() -> PresetKind;

struct RegistryEntry {
    descriptor: PresetDescriptor,
    default_kind: DefaultKindFn,
}

/// Catalog of all built-in preset algorithms.
pub struct PresetRegistry {
    entries: Vec<RegistryEntry>,
}

impl Default for PresetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PresetRegistry {
    pub fn new() -> Self {
        let mut registry = Self { entries: Vec::with_capacity(7) };
        registry.register_builtin_presets();
        registry
    }

    fn register(&mut self, descriptor: PresetDescriptor, default_kind: DefaultKindFn) {
        self.entries.push(RegistryEntry { descriptor, default_kind });
    }

    fn register_builtin_presets(&mut self) {
        self.register(
            PresetDescriptor {
                id: "volume_reactive",
                name: "Volume Reactive",
                short_name: "VOL",
                description: "Maps overall loudness to brightness",
                category: PresetCategory::Reactive,
            },
            || PresetKind::VolumeReactive { b_min: 10, b_max: 255 },
        );

        self.register(
            PresetDescriptor {
                id: "beat_pulse",
                name: "Beat Pulse",
                short_name: "PULSE",
                description: "Flashes to peak brightness on each detected beat, then decays",
                category: PresetCategory::Reactive,
            },
            || PresetKind::BeatPulse { peak_brightness: 255, fall_brightness: 40, fall_delay_ms: 120 },
        );

        self.register(
            PresetDescriptor {
                id: "frequency_color",
                name: "Frequency Color",
                short_name: "FREQ",
                description: "Maps the low/mid/high band energies to RGB channels",
                category: PresetCategory::Reactive,
            },
            || PresetKind::FrequencyColor,
        );

        self.register(
            PresetDescriptor {
                id: "spectrum_analyzer",
                name: "Spectrum Analyzer",
                short_name: "SPEC",
                description: "Colors by dominant frequency band, brightness by that band's energy",
                category: PresetCategory::Reactive,
            },
            || PresetKind::SpectrumAnalyzer,
        );

        self.register(
            PresetDescriptor {
                id: "mood_lighting",
                name: "Mood Lighting",
                short_name: "MOOD",
                description: "Slow color wash driven by valence/arousal mood estimate",
                category: PresetCategory::Ambient,
            },
            || PresetKind::MoodLighting,
        );

        self.register(
            PresetDescriptor {
                id: "party_mode",
                name: "Party Mode",
                short_name: "PARTY",
                description: "Advances a shared hue wheel on every beat across all devices",
                category: PresetCategory::Reactive,
            },
            || PresetKind::PartyMode { k_phi: 37.0 },
        );

        self.register(
            PresetDescriptor {
                id: "static",
                name: "Static Color",
                short_name: "STATIC",
                description: "Fixed color and brightness, ignores audio input",
                category: PresetCategory::Static,
            },
            || PresetKind::Static { r: 255, g: 255, b: 255, brightness: 255 },
        );
    }

    pub fn all_presets(&self) -> Vec<&PresetDescriptor> {
        self.entries.iter().map(|e| &e.descriptor).collect()
    }

    pub fn presets_in_category(&self, category: PresetCategory) -> Vec<&PresetDescriptor> {
        self.entries.iter().filter(|e| e.descriptor.category == category).map(|e| &e.descriptor).collect()
    }

    pub fn get(&self, id: &str) -> Option<&PresetDescriptor> {
        self.entries.iter().find(|e| e.descriptor.id == id).map(|e| &e.descriptor)
    }

    /// Returns the default parameter set for a preset kind, for seeding a new
    /// config entry before the user customizes it.
    pub fn default_kind(&self, id: &str) -> Option<PresetKind> {
        self.entries.iter().find(|e| e.descriptor.id == id).map(|e| (e.default_kind)())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
