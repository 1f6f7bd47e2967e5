//! Shared data model and error taxonomy for the lumensync audio-to-light pipeline.
//!
//! This crate has no knowledge of audio capture, FFT analysis, preset
//! algorithms, or device wire protocols — it only defines the records that
//! flow between those stages ([`AudioBlock`], [`AudioFeatures`],
//! [`DeviceCommand`], [`Device`], [`Preset`]) and the error kinds each stage
//! classifies its own failures into ([`Error`]).
//!
//! Keeping this vocabulary in one crate with no heavier dependencies lets
//! every other crate in the workspace (`lumensync-analysis`,
//! `lumensync-effects`, `lumensync-devices`, `lumensync-scheduler`,
//! `lumensync-config`) depend on it without pulling in FFT, networking, or
//! TOML parsing transitively.

mod audio;
mod command;
mod device;
mod error;
mod preset;

pub use audio::{AudioBlock, AudioFeatures, BAND_COUNT, DropPolicy};
pub use command::{CommandPriority, CommandVerb, DeviceCommand};
pub use device::{CapabilityBits, Device, DeviceId, DeviceKind, DeviceSnapshot, DeviceState};
pub use error::Error;
pub use preset::{DeviceSelector, Preset, PresetKind};

/// Convenience result type used across the pipeline crates.
pub type Result<T> = std::result::Result<T, Error>;
