//! cpal-based capture backend.
//!
//! Wraps [cpal](https://crates.io/crates/cpal) for cross-platform input
//! capture (ALSA, CoreAudio, WASAPI). True system-loopback capture is
//! platform-specific and outside what cpal exposes uniformly; this backend
//! prefers an input device whose name looks like a monitor/loopback source
//! (see [`crate::stream::default_device`]) and otherwise falls back to the
//! default input device, so the pipeline still runs on a machine with no
//! monitor source configured.

use crate::backend::{BackendStreamConfig, CaptureBackend, ErrorCallback, InputCallback, StreamHandle};
use crate::stream::device_name;
use crate::{AudioDevice, Error, Result};
use cpal::Host;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

pub struct CpalCaptureBackend {
    host: Host,
}

impl CpalCaptureBackend {
    pub fn new() -> Self {
        tracing::info!(host = cpal::default_host().id().name(), "cpal capture backend initialized");
        Self {
            host: cpal::default_host(),
        }
    }

    fn find_input_device(&self, name: Option<&str>) -> Result<cpal::Device> {
        match name {
            Some(search) => {
                let search_lower = search.to_lowercase();
                let devices = self
                    .host
                    .input_devices()
                    .map_err(|e| Error::Stream(e.to_string()))?;
                for device in devices {
                    if let Ok(dev_name) = device_name(&device)
                        && dev_name.to_lowercase().contains(search_lower.as_str())
                    {
                        return Ok(device);
                    }
                }
                Err(Error::DeviceNotFound(format!("no input device matching '{search}'")))
            }
            None => self.preferred_loopback_device(),
        }
    }

    /// Prefer a monitor/loopback-named input device; fall back to the default.
    fn preferred_loopback_device(&self) -> Result<cpal::Device> {
        if let Ok(devices) = self.host.input_devices() {
            for device in devices {
                if let Ok(name) = device_name(&device)
                    && crate::stream::list_devices()?
                        .iter()
                        .any(|d| d.name == name && d.is_loopback)
                {
                    return Ok(device);
                }
            }
        }
        self.host.default_input_device().ok_or(Error::NoDevice)
    }
}

impl Default for CpalCaptureBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureBackend for CpalCaptureBackend {
    fn name(&self) -> &str {
        "cpal"
    }

    fn list_devices(&self) -> Result<Vec<AudioDevice>> {
        crate::stream::list_devices()
    }

    fn default_loopback_device(&self) -> Result<Option<AudioDevice>> {
        crate::stream::default_device()
    }

    fn build_input_stream(
        &self,
        config: &BackendStreamConfig,
        mut callback: InputCallback,
        mut error_callback: ErrorCallback,
    ) -> Result<StreamHandle> {
        let device = self.find_input_device(config.device_name.as_deref())?;

        let stream_config = cpal::StreamConfig {
            channels: config.channels,
            sample_rate: config.sample_rate,
            buffer_size: cpal::BufferSize::Fixed(config.buffer_size),
        };

        let stream = device
            .build_input_stream(
                &stream_config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    callback(data);
                },
                move |err| {
                    error_callback(&err.to_string());
                },
                None,
            )
            .map_err(|e| Error::Stream(e.to_string()))?;

        stream.play().map_err(|e| Error::Stream(e.to_string()))?;
        tracing::info!(
            channels = config.channels,
            sample_rate = config.sample_rate,
            "capture stream started"
        );

        Ok(StreamHandle::new(stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_name_is_cpal() {
        assert_eq!(CpalCaptureBackend::new().name(), "cpal");
    }

    #[test]
    fn list_devices_does_not_panic() {
        assert!(CpalCaptureBackend::new().list_devices().is_ok());
    }
}
