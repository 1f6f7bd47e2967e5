use super::Effect;
use lumensync_core::{AudioFeatures, CommandPriority, CommandVerb, DeviceCommand, DeviceId};

/// A constant target state, independent of the audio stream. Dead-band
/// suppression in the engine ensures this only dispatches once per device.
pub struct StaticColor {
    r: u8,
    g: u8,
    b: u8,
    brightness: u8,
}

impl StaticColor {
    pub fn new(r: u8, g: u8, b: u8, brightness: u8) -> Self {
        Self { r, g, b, brightness }
    }
}

impl Effect for StaticColor {
    fn evaluate(&mut self, device_id: &DeviceId, _features: &AudioFeatures) -> Vec<DeviceCommand> {
        vec![
            DeviceCommand::new(device_id.clone(), CommandVerb::SetColor(self.r, self.g, self.b), CommandPriority::Color),
            DeviceCommand::new(device_id.clone(), CommandVerb::SetBrightness(self.brightness), CommandPriority::Brightness),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn always_emits_the_same_values() {
        let mut effect = StaticColor::new(10, 20, 30, 200);
        let f = AudioFeatures::silent(Instant::now(), 0);
        let cmds = effect.evaluate(&DeviceId::new("d1"), &f);
        assert!(matches!(cmds[0].verb, CommandVerb::SetColor(10, 20, 30)));
        assert!(matches!(cmds[1].verb, CommandVerb::SetBrightness(200)));
    }
}
