//! cpal device enumeration helpers shared by [`crate::cpal_backend`].

use crate::{AudioDevice, Result};
use cpal::traits::{DeviceTrait, HostTrait};

/// List every input device the host exposes, tagging loopback/monitor sources.
pub fn list_devices() -> Result<Vec<AudioDevice>> {
    let host = cpal::default_host();
    let mut devices = Vec::new();

    if let Ok(inputs) = host.input_devices() {
        for device in inputs {
            if let Ok(name) = device.name() {
                let sample_rate = device
                    .default_input_config()
                    .map(|c| c.sample_rate())
                    .unwrap_or(44100);
                devices.push(AudioDevice {
                    name: name.clone(),
                    is_loopback: is_loopback_name(&name),
                    default_sample_rate: sample_rate,
                });
            }
        }
    }

    Ok(devices)
}

/// The system's default input device, if any.
pub fn default_device() -> Result<Option<AudioDevice>> {
    let host = cpal::default_host();
    Ok(host.default_input_device().and_then(|d| {
        d.name().ok().map(|name| AudioDevice {
            default_sample_rate: d
                .default_input_config()
                .map(|c| c.sample_rate())
                .unwrap_or(44100),
            is_loopback: is_loopback_name(&name),
            name,
        })
    }))
}

/// Heuristic for "this input device is actually a system-output monitor",
/// the closest thing most desktop audio stacks expose to true loopback
/// capture (PulseAudio/PipeWire `.monitor` sources, WASAPI loopback-named
/// devices). Platform-specific loopback APIs are out of scope here; this
/// backend captures whatever device name matches, real loopback or not.
fn is_loopback_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.contains("monitor") || lower.contains("loopback") || lower.contains("stereo mix")
}

pub(crate) fn device_name(device: &cpal::Device) -> Result<String> {
    device
        .name()
        .map_err(|e| crate::Error::Stream(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loopback_name_heuristic_matches_common_monitor_sources() {
        assert!(is_loopback_name("Monitor of Built-in Audio Analog Stereo"));
        assert!(is_loopback_name("Stereo Mix (Realtek)"));
        assert!(!is_loopback_name("Built-in Microphone"));
    }

    #[test]
    fn list_devices_does_not_panic() {
        assert!(list_devices().is_ok());
    }
}
