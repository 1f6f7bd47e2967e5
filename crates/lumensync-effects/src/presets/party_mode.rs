use super::Effect;
use crate::color::hsv_to_rgb;
use lumensync_core::{AudioFeatures, CommandPriority, CommandVerb, DeviceCommand, DeviceId};
use std::collections::HashMap;

/// Hue sweeps forward on every beat; brightness tracks volume continuously.
pub struct PartyMode {
    k_phi: f32,
    phase: HashMap<DeviceId, f32>,
}

impl PartyMode {
    pub fn new(k_phi: f32) -> Self {
        Self { k_phi, phase: HashMap::new() }
    }
}

impl Effect for PartyMode {
    fn evaluate(&mut self, device_id: &DeviceId, features: &AudioFeatures) -> Vec<DeviceCommand> {
        let phase = self.phase.entry(device_id.clone()).or_insert(0.0);
        if features.beat_detected {
            *phase = (*phase + features.beat_intensity * self.k_phi).rem_euclid(360.0);
        }

        let (r, g, b) = hsv_to_rgb(*phase, 1.0, 1.0);
        let brightness = (features.volume * 255.0).round().clamp(0.0, 255.0) as u8;
        vec![
            DeviceCommand::new(device_id.clone(), CommandVerb::SetColor(r, g, b), CommandPriority::Color),
            DeviceCommand::new(device_id.clone(), CommandVerb::SetBrightness(brightness), CommandPriority::Brightness),
        ]
    }
}
