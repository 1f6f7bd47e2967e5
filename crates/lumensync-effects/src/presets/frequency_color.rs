use super::Effect;
use lumensync_core::{AudioFeatures, CommandPriority, CommandVerb, DeviceCommand, DeviceId};

fn to_channel(band: f32) -> u8 {
    (band * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Maps the three lowest bands directly onto red, green, and blue.
pub struct FrequencyColor;

impl Effect for FrequencyColor {
    fn evaluate(&mut self, device_id: &DeviceId, features: &AudioFeatures) -> Vec<DeviceCommand> {
        let (r, g, b) = (to_channel(features.bands[0]), to_channel(features.bands[1]), to_channel(features.bands[2]));
        vec![DeviceCommand::new(device_id.clone(), CommandVerb::SetColor(r, g, b), CommandPriority::Color)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn bands_map_directly_to_rgb() {
        let mut f = AudioFeatures::silent(Instant::now(), 0);
        f.bands[0] = 1.0;
        f.bands[1] = 0.0;
        f.bands[2] = 0.5;
        let mut effect = FrequencyColor;
        let cmds = effect.evaluate(&DeviceId::new("d1"), &f);
        assert!(matches!(cmds[0].verb, CommandVerb::SetColor(255, 0, 128)));
    }
}
