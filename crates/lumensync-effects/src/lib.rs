//! The Effect Engine: maps `AudioFeatures` into per-device `DeviceCommand`s
//! according to the active [`Preset`].
//!
//! [`EffectEngine`] owns the active preset's runtime state and the per-device
//! dead-band snapshots used to suppress commands that wouldn't visibly
//! change a device. Snapshots are updated only through [`EffectEngine::confirm_dispatch`] —
//! called back by whatever actually talks to the device — not speculatively
//! when a command is produced, so dead-band comparisons track real device
//! state even across retries and drops downstream.

mod color;
mod dead_band;
mod presets;

pub use dead_band::{DEFAULT_DEAD_BAND_BRIGHTNESS, DEFAULT_DEAD_BAND_RGB};
pub use presets::{Effect, build, validate};

use lumensync_core::{AudioFeatures, DeviceCommand, DeviceId, DeviceSnapshot, Preset};
use std::collections::HashMap;

pub struct EffectEngine {
    preset: Option<Preset>,
    effect: Option<Box<dyn Effect>>,
    last_sent: HashMap<DeviceId, DeviceSnapshot>,
    dead_band_rgb: u8,
    dead_band_brightness: u8,
}

impl EffectEngine {
    pub fn new(dead_band_rgb: u8, dead_band_brightness: u8) -> Self {
        Self {
            preset: None,
            effect: None,
            last_sent: HashMap::new(),
            dead_band_rgb,
            dead_band_brightness,
        }
    }

    /// Atomically swap the active preset. Per-device dead-band snapshots
    /// survive the swap; a preset's own phase/timer state does not.
    pub fn replace_preset(&mut self, preset: Preset) {
        self.effect = Some(build(&preset.kind));
        self.preset = Some(preset);
    }

    pub fn active_preset(&self) -> Option<&Preset> {
        self.preset.as_ref()
    }

    /// Record the state a device actually applied, for future dead-band comparisons.
    pub fn confirm_dispatch(&mut self, device_id: &DeviceId, snapshot: DeviceSnapshot) {
        self.last_sent.insert(device_id.clone(), snapshot);
    }

    /// Evaluate the active preset against one feature frame for the given targets.
    pub fn evaluate(&mut self, features: &AudioFeatures, device_ids: &[DeviceId]) -> Vec<DeviceCommand> {
        let Some(preset) = &self.preset else {
            return Vec::new();
        };
        if !preset.enabled {
            return Vec::new();
        }
        let Some(effect) = self.effect.as_mut() else {
            return Vec::new();
        };

        let mut out = Vec::new();
        for device_id in device_ids {
            let last = self.last_sent.get(device_id).copied().unwrap_or_default();
            for command in effect.evaluate(device_id, features) {
                if dead_band::passes(&command.verb, &last, self.dead_band_rgb, self.dead_band_brightness) {
                    out.push(command);
                }
            }
        }
        out
    }
}

impl Default for EffectEngine {
    fn default() -> Self {
        Self::new(DEFAULT_DEAD_BAND_RGB, DEFAULT_DEAD_BAND_BRIGHTNESS)
    }
}
