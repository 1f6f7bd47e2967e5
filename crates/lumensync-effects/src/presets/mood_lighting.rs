use super::Effect;
use lumensync_core::{AudioFeatures, CommandPriority, CommandVerb, DeviceCommand, DeviceId};

/// Corners of the `(valence, arousal)` palette, indexed `[valence][arousal]`.
const PALETTE: [[(f32, f32, f32); 2]; 2] = [
    [(30.0, 30.0, 80.0), (180.0, 20.0, 20.0)],
    [(50.0, 180.0, 80.0), (255.0, 200.0, 0.0)],
];

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn bilinear(valence: f32, arousal: f32) -> (u8, u8, u8) {
    let v = valence.clamp(0.0, 1.0);
    let a = arousal.clamp(0.0, 1.0);

    let top = (
        lerp(PALETTE[0][0].0, PALETTE[0][1].0, a),
        lerp(PALETTE[0][0].1, PALETTE[0][1].1, a),
        lerp(PALETTE[0][0].2, PALETTE[0][1].2, a),
    );
    let bottom = (
        lerp(PALETTE[1][0].0, PALETTE[1][1].0, a),
        lerp(PALETTE[1][0].1, PALETTE[1][1].1, a),
        lerp(PALETTE[1][0].2, PALETTE[1][1].2, a),
    );

    (
        lerp(top.0, bottom.0, v).round() as u8,
        lerp(top.1, bottom.1, v).round() as u8,
        lerp(top.2, bottom.2, v).round() as u8,
    )
}

/// Colors from a fixed valence/arousal palette; brightness tracks frame energy.
pub struct MoodLighting;

impl Effect for MoodLighting {
    fn evaluate(&mut self, device_id: &DeviceId, features: &AudioFeatures) -> Vec<DeviceCommand> {
        let (r, g, b) = bilinear(features.valence, features.arousal);
        let brightness = (features.energy * 255.0).round().clamp(0.0, 255.0) as u8;
        vec![
            DeviceCommand::new(device_id.clone(), CommandVerb::SetColor(r, g, b), CommandPriority::Color),
            DeviceCommand::new(device_id.clone(), CommandVerb::SetBrightness(brightness), CommandPriority::Brightness),
        ]
    }
}
