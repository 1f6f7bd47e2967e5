use super::Effect;
use lumensync_core::{AudioFeatures, CommandPriority, CommandVerb, DeviceCommand, DeviceId};

/// Brightness tracks RMS volume linearly; no color change.
pub struct VolumeReactive {
    b_min: u8,
    b_max: u8,
}

impl VolumeReactive {
    pub fn new(b_min: u8, b_max: u8) -> Self {
        Self { b_min, b_max }
    }
}

impl Effect for VolumeReactive {
    fn evaluate(&mut self, device_id: &DeviceId, features: &AudioFeatures) -> Vec<DeviceCommand> {
        let brightness = ((features.volume * 255.0).round() as i32).clamp(self.b_min as i32, self.b_max as i32) as u8;
        vec![DeviceCommand::new(
            device_id.clone(),
            CommandVerb::SetBrightness(brightness),
            CommandPriority::Brightness,
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn features_with_volume(volume: f32) -> AudioFeatures {
        let mut f = AudioFeatures::silent(Instant::now(), 0);
        f.volume = volume;
        f
    }

    #[test]
    fn zero_volume_clamps_to_b_min() {
        let mut effect = VolumeReactive::new(10, 255);
        let cmds = effect.evaluate(&DeviceId::new("d1"), &features_with_volume(0.0));
        assert_eq!(cmds.len(), 1);
        assert!(matches!(cmds[0].verb, CommandVerb::SetBrightness(10)));
    }

    #[test]
    fn full_volume_hits_255() {
        let mut effect = VolumeReactive::new(10, 255);
        let cmds = effect.evaluate(&DeviceId::new("d1"), &features_with_volume(1.0));
        assert!(matches!(cmds[0].verb, CommandVerb::SetBrightness(255)));
    }

    #[test]
    fn respects_upper_clamp() {
        let mut effect = VolumeReactive::new(10, 200);
        let cmds = effect.evaluate(&DeviceId::new("d1"), &features_with_volume(1.0));
        assert!(matches!(cmds[0].verb, CommandVerb::SetBrightness(200)));
    }
}
