use super::Effect;
use lumensync_core::{AudioFeatures, CommandPriority, CommandVerb, DeviceCommand, DeviceId};
use std::collections::HashMap;
use std::time::{Duration, Instant};

struct PulseState {
    started_at: Instant,
    fallen: bool,
}

/// Snaps to full brightness on each beat, then decays to a resting level
/// `fall_delay_ms` later. Silent on frames with no beat and no pending decay.
pub struct BeatPulse {
    peak_brightness: u8,
    fall_brightness: u8,
    fall_delay: Duration,
    pending: HashMap<DeviceId, PulseState>,
}

impl BeatPulse {
    pub fn new(peak_brightness: u8, fall_brightness: u8, fall_delay_ms: u32) -> Self {
        Self {
            peak_brightness,
            fall_brightness,
            fall_delay: Duration::from_millis(fall_delay_ms as u64),
            pending: HashMap::new(),
        }
    }
}

impl Effect for BeatPulse {
    fn evaluate(&mut self, device_id: &DeviceId, features: &AudioFeatures) -> Vec<DeviceCommand> {
        if features.beat_detected {
            self.pending.insert(
                device_id.clone(),
                PulseState { started_at: features.timestamp, fallen: false },
            );
            return vec![
                DeviceCommand::new(device_id.clone(), CommandVerb::Power(true), CommandPriority::Beat),
                DeviceCommand::new(device_id.clone(), CommandVerb::SetBrightness(self.peak_brightness), CommandPriority::Beat),
            ];
        }

        if let Some(pulse) = self.pending.get_mut(device_id)
            && !pulse.fallen
            && features.timestamp.saturating_duration_since(pulse.started_at) >= self.fall_delay
        {
            pulse.fallen = true;
            return vec![DeviceCommand::new(
                device_id.clone(),
                CommandVerb::SetBrightness(self.fall_brightness),
                CommandPriority::Beat,
            )];
        }

        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features_at(timestamp: Instant, beat: bool) -> AudioFeatures {
        let mut f = AudioFeatures::silent(timestamp, 0);
        f.beat_detected = beat;
        f
    }

    #[test]
    fn beat_triggers_power_and_peak_brightness() {
        let mut effect = BeatPulse::new(255, 128, 100);
        let now = Instant::now();
        let cmds = effect.evaluate(&DeviceId::new("d1"), &features_at(now, true));
        assert_eq!(cmds.len(), 2);
        assert!(cmds.iter().all(|c| c.priority == CommandPriority::Beat));
    }

    #[test]
    fn no_beat_and_no_pending_pulse_is_silent() {
        let mut effect = BeatPulse::new(255, 128, 100);
        let cmds = effect.evaluate(&DeviceId::new("d1"), &features_at(Instant::now(), false));
        assert!(cmds.is_empty());
    }

    #[test]
    fn falls_to_resting_brightness_after_delay() {
        let mut effect = BeatPulse::new(255, 128, 100);
        let t0 = Instant::now();
        effect.evaluate(&DeviceId::new("d1"), &features_at(t0, true));

        let too_soon = t0 + Duration::from_millis(50);
        assert!(effect.evaluate(&DeviceId::new("d1"), &features_at(too_soon, false)).is_empty());

        let after = t0 + Duration::from_millis(150);
        let cmds = effect.evaluate(&DeviceId::new("d1"), &features_at(after, false));
        assert_eq!(cmds.len(), 1);
        assert!(matches!(cmds[0].verb, CommandVerb::SetBrightness(128)));

        // Fires only once.
        let later = t0 + Duration::from_millis(300);
        assert!(effect.evaluate(&DeviceId::new("d1"), &features_at(later, false)).is_empty());
    }
}
