//! Audio capture layer for the lumensync audio-to-light pipeline.
//!
//! This crate owns the Capture stage: it pulls PCM from the system's
//! loopback/monitor audio source via a pluggable [`CaptureBackend`]
//! ([`CpalCaptureBackend`] by default), slides it through an overlapping
//! hop window, and hands the Analyser fixed-length [`lumensync_core::AudioBlock`]s
//! through a bounded queue.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use lumensync_io::{Capture, CaptureConfig, CpalCaptureBackend};
//! use std::time::Duration;
//!
//! let capture = Capture::start(CpalCaptureBackend::new(), CaptureConfig::default(), 64);
//! while let Some(block) = capture.recv(Duration::from_millis(500)) {
//!     // hand block to lumensync_analysis::Analyser::process
//! }
//! ```

mod backend;
mod capture;
mod cpal_backend;
mod stream;

pub use backend::{BackendStreamConfig, CaptureBackend, ErrorCallback, InputCallback, StreamHandle};
pub use capture::{Capture, CaptureConfig};
pub use cpal_backend::CpalCaptureBackend;
pub use stream::{default_device, list_devices};

/// A capture-capable audio device as reported by the host.
#[derive(Debug, Clone)]
pub struct AudioDevice {
    pub name: String,
    /// Heuristically a system-output monitor/loopback source rather than a microphone.
    pub is_loopback: bool,
    pub default_sample_rate: u32,
}

/// Error types for the capture layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Audio stream setup or runtime error.
    #[error("audio stream error: {0}")]
    Stream(String),

    /// No audio device available on the system.
    #[error("no audio device available")]
    NoDevice,

    /// The requested audio device was not found.
    #[error("device not found: {0}")]
    DeviceNotFound(String),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for the capture layer.
pub type Result<T> = std::result::Result<T, Error>;
