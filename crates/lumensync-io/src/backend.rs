//! Pluggable capture backend abstraction.
//!
//! [`CaptureBackend`] decouples the Capture stage from any one platform audio
//! API. The default implementation ([`crate::cpal_backend::CpalCaptureBackend`])
//! wraps [cpal](https://crates.io/crates/cpal) for the system loopback/monitor
//! device, but the trait lets a deterministic mock backend stand in for tests
//! (spec's S1/S4 scenarios inject synthetic PCM without touching real hardware).
//!
//! The trait is object-safe (boxed callbacks, type-erased stream handle) so a
//! backend can be selected at runtime rather than baked in at compile time.

use crate::{AudioDevice, Result};

/// Configuration for building a capture stream.
#[derive(Debug, Clone)]
pub struct BackendStreamConfig {
    pub sample_rate: u32,
    pub buffer_size: u32,
    pub channels: u16,
    /// Optional device name filter; `None` uses the system loopback/default input.
    pub device_name: Option<String>,
}

impl Default for BackendStreamConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            buffer_size: 512,
            channels: 2,
            device_name: None,
        }
    }
}

/// Type-erased capture stream handle. Dropping it stops capture.
pub struct StreamHandle {
    _inner: Box<dyn Send>,
}

impl StreamHandle {
    pub fn new<T: Send + 'static>(stream: T) -> Self {
        Self {
            _inner: Box::new(stream),
        }
    }
}

impl std::fmt::Debug for StreamHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamHandle").finish_non_exhaustive()
    }
}

/// Called on the realtime audio thread with a buffer of interleaved `f32`
/// samples. Must not allocate, lock, or perform I/O.
pub type InputCallback = Box<dyn FnMut(&[f32]) + Send>;

/// Called when the backend's stream fails. A single call marks the stream
/// dead; the caller is responsible for rebuilding it.
pub type ErrorCallback = Box<dyn FnMut(&str) + Send>;

/// Abstracts over platform audio capture APIs.
pub trait CaptureBackend: Send {
    fn name(&self) -> &str;

    fn list_devices(&self) -> Result<Vec<AudioDevice>>;

    /// The device Capture should prefer: the system's loopback/monitor source
    /// if the platform exposes one, else the default input device.
    fn default_loopback_device(&self) -> Result<Option<AudioDevice>>;

    /// Build and start an input stream. Returns once streaming; the returned
    /// handle keeps it alive.
    fn build_input_stream(
        &self,
        config: &BackendStreamConfig,
        callback: InputCallback,
        error_callback: ErrorCallback,
    ) -> Result<StreamHandle>;
}
