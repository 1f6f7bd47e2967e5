//! One module per built-in preset algorithm.

mod beat_pulse;
mod frequency_color;
mod mood_lighting;
mod party_mode;
mod spectrum_analyzer;
mod static_color;
mod volume_reactive;

pub use beat_pulse::BeatPulse;
pub use frequency_color::FrequencyColor;
pub use mood_lighting::MoodLighting;
pub use party_mode::PartyMode;
pub use spectrum_analyzer::SpectrumAnalyzer;
pub use static_color::StaticColor;
pub use volume_reactive::VolumeReactive;

use lumensync_core::{AudioFeatures, DeviceCommand, DeviceId, Error, PresetKind};

/// One per-device, per-frame mapper from features to candidate commands.
///
/// Implementations own whatever per-device timing state they need (phase
/// accumulators, pulse timers); the dead-band suppression and priority
/// ordering that applies across every preset lives in the engine, not here.
pub trait Effect: Send {
    fn evaluate(&mut self, device_id: &DeviceId, features: &AudioFeatures) -> Vec<DeviceCommand>;
}

/// Checks a preset's parameters are usable before committing to it.
pub fn validate(kind: &PresetKind) -> Result<(), Error> {
    match kind {
        PresetKind::VolumeReactive { b_min, b_max } if b_min > b_max => Err(Error::PresetParameterError {
            preset: "volume_reactive".into(),
            key: "b_min/b_max".into(),
        }),
        PresetKind::BeatPulse { fall_delay_ms, .. } if *fall_delay_ms == 0 => Err(Error::PresetParameterError {
            preset: "beat_pulse".into(),
            key: "fall_delay_ms".into(),
        }),
        PresetKind::PartyMode { k_phi } if !k_phi.is_finite() || *k_phi <= 0.0 => Err(Error::PresetParameterError {
            preset: "party_mode".into(),
            key: "k_phi".into(),
        }),
        _ => Ok(()),
    }
}

/// Instantiate the evaluator for a preset, falling back to black `Static`
/// when its parameters don't pass [`validate`].
pub fn build(kind: &PresetKind) -> Box<dyn Effect> {
    let kind = if validate(kind).is_ok() { kind.clone() } else { PresetKind::fallback() };
    build_unchecked(&kind)
}

fn build_unchecked(kind: &PresetKind) -> Box<dyn Effect> {
    match kind {
        PresetKind::VolumeReactive { b_min, b_max } => Box::new(VolumeReactive::new(*b_min, *b_max)),
        PresetKind::BeatPulse { peak_brightness, fall_brightness, fall_delay_ms } => {
            Box::new(BeatPulse::new(*peak_brightness, *fall_brightness, *fall_delay_ms))
        }
        PresetKind::FrequencyColor => Box::new(FrequencyColor),
        PresetKind::SpectrumAnalyzer => Box::new(SpectrumAnalyzer),
        PresetKind::MoodLighting => Box::new(MoodLighting),
        PresetKind::PartyMode { k_phi } => Box::new(PartyMode::new(*k_phi)),
        PresetKind::Static { r, g, b, brightness } => Box::new(StaticColor::new(*r, *g, *b, *brightness)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_volume_reactive_bounds_rejected() {
        assert!(validate(&PresetKind::VolumeReactive { b_min: 200, b_max: 10 }).is_err());
    }

    #[test]
    fn zero_fall_delay_rejected() {
        assert!(validate(&PresetKind::BeatPulse { peak_brightness: 255, fall_brightness: 128, fall_delay_ms: 0 }).is_err());
    }

    #[test]
    fn negative_k_phi_rejected() {
        assert!(validate(&PresetKind::PartyMode { k_phi: -1.0 }).is_err());
    }

    #[test]
    fn valid_presets_pass() {
        assert!(validate(&PresetKind::FrequencyColor).is_ok());
        assert!(validate(&PresetKind::VolumeReactive { b_min: 10, b_max: 255 }).is_ok());
    }

    #[test]
    fn build_falls_back_to_black_static_on_invalid_params() {
        let mut effect = build(&PresetKind::PartyMode { k_phi: f32::NAN });
        let features = AudioFeatures::silent(std::time::Instant::now(), 0);
        let commands = effect.evaluate(&DeviceId::new("d1"), &features);
        assert!(commands.iter().any(|c| matches!(c.verb, lumensync_core::CommandVerb::SetColor(0, 0, 0))));
    }
}
