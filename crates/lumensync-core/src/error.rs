//! Pipeline-wide error taxonomy.
//!
//! Each pipeline stage classifies its own failures into one of these kinds
//! before it crosses a stage boundary; only `DeviceError`-shaped and
//! `CaptureError`-shaped variants are surfaced to the embedder as events on
//! the pipeline supervisor's event stream. A failing frame is dropped,
//! never propagated — nothing here poisons a queue.

use crate::device::DeviceId;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No loopback source is available. Reported and retried with back-off.
    #[error("no audio capture source available")]
    CaptureUnavailable,

    /// A downstream queue overflowed and `count` blocks were dropped.
    #[error("capture queue overflow, {count} block(s) dropped")]
    CaptureDropped { count: u64 },

    /// Input was silent (all-zero magnitudes). Never fatal: features are emitted with zeros.
    #[error("analysis input degenerate (silent block)")]
    AnalysisDegenerate,

    /// A preset parameter was unusable; the preset falls back to `Static` black.
    #[error("preset '{preset}' parameter '{key}' is invalid")]
    PresetParameterError { preset: String, key: String },

    /// Transient network failure talking to a device. The scheduler retries.
    #[error("device {0} unreachable")]
    DeviceUnreachable(DeviceId),

    /// A malformed response from a device. Three consecutive occurrences mark it `Degraded`.
    #[error("device {id} protocol error: {detail}")]
    DeviceProtocol { id: DeviceId, detail: String },

    /// The verb is outside the device's static capability bitset. Never retried.
    #[error("device {id} does not support {verb}")]
    DeviceUnsupported { id: DeviceId, verb: String },

    /// Normal cooperative termination, not a failure.
    #[error("shutdown")]
    Shutdown,
}

impl Error {
    pub fn device_id(&self) -> Option<&DeviceId> {
        match self {
            Error::DeviceUnreachable(id) => Some(id),
            Error::DeviceProtocol { id, .. } => Some(id),
            Error::DeviceUnsupported { id, .. } => Some(id),
            _ => None,
        }
    }

    /// Whether a failing call of this kind should be retried by the scheduler.
    pub fn is_retriable(&self) -> bool {
        matches!(self, Error::DeviceUnreachable(_) | Error::DeviceProtocol { .. })
    }
}
