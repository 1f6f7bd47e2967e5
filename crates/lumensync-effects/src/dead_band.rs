//! Engine-wide suppression of commands that wouldn't visibly change a device.

use lumensync_core::{CommandVerb, DeviceSnapshot};

pub const DEFAULT_DEAD_BAND_RGB: u8 = 4;
pub const DEFAULT_DEAD_BAND_BRIGHTNESS: u8 = 4;

/// Whether `verb` differs from `last` by more than the configured dead-band.
/// Verbs with no dead-band concept (power, effect name, transition time) always pass.
pub fn passes(verb: &CommandVerb, last: &DeviceSnapshot, dead_band_rgb: u8, dead_band_brightness: u8) -> bool {
    match verb {
        CommandVerb::SetColor(r, g, b) => {
            r.abs_diff(last.color.0) >= dead_band_rgb
                || g.abs_diff(last.color.1) >= dead_band_rgb
                || b.abs_diff(last.color.2) >= dead_band_rgb
        }
        CommandVerb::SetBrightness(b) => b.abs_diff(last.brightness) >= dead_band_brightness,
        CommandVerb::Power(_) | CommandVerb::SetEffect(_) | CommandVerb::SetTransition(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_brightness_is_suppressed() {
        let last = DeviceSnapshot { brightness: 200, ..DeviceSnapshot::default() };
        assert!(!passes(&CommandVerb::SetBrightness(200), &last, 4, 4));
    }

    #[test]
    fn brightness_just_under_threshold_is_suppressed() {
        let last = DeviceSnapshot { brightness: 250, ..DeviceSnapshot::default() };
        assert!(!passes(&CommandVerb::SetBrightness(253), &last, 4, 4));
    }

    #[test]
    fn brightness_at_threshold_passes() {
        let last = DeviceSnapshot { brightness: 250, ..DeviceSnapshot::default() };
        assert!(passes(&CommandVerb::SetBrightness(254), &last, 4, 4));
    }

    #[test]
    fn color_change_on_any_channel_passes() {
        let last = DeviceSnapshot { color: (10, 10, 10), ..DeviceSnapshot::default() };
        assert!(passes(&CommandVerb::SetColor(10, 10, 20), &last, 4, 4));
        assert!(!passes(&CommandVerb::SetColor(11, 12, 13), &last, 4, 4));
    }

    #[test]
    fn power_always_passes() {
        let last = DeviceSnapshot::default();
        assert!(passes(&CommandVerb::Power(false), &last, 4, 4));
    }
}
