use super::Effect;
use crate::color::hsv_to_rgb;
use lumensync_core::{AudioFeatures, BAND_COUNT, CommandPriority, CommandVerb, DeviceCommand, DeviceId};

/// Colors by the dominant frequency band: hue = band index, value = its magnitude.
pub struct SpectrumAnalyzer;

impl Effect for SpectrumAnalyzer {
    fn evaluate(&mut self, device_id: &DeviceId, features: &AudioFeatures) -> Vec<DeviceCommand> {
        let Some(band) = features.dominant_band() else {
            return vec![DeviceCommand::new(device_id.clone(), CommandVerb::SetColor(0, 0, 0), CommandPriority::Color)];
        };
        let hue = band as f32 * (360.0 / BAND_COUNT as f32);
        let (r, g, b) = hsv_to_rgb(hue, 1.0, features.bands[band]);
        vec![DeviceCommand::new(device_id.clone(), CommandVerb::SetColor(r, g, b), CommandPriority::Color)]
    }
}
