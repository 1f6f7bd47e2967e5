//! Preset parameter validation.
//!
//! Delegates the actual range checks to [`lumensync_effects::validate`] — the
//! same check the pipeline runs before building an effect — so a preset
//! rejected at load time is guaranteed to be rejected at evaluation time
//! too, and vice versa.

use crate::preset_file::PresetFile;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("preset '{id}': {detail}")]
    InvalidParameter { id: String, detail: String },
}

pub type ValidationResult = Result<(), ValidationError>;

/// Validate one preset's parameters against the preset algorithm's own rules.
pub fn validate_preset(file: &PresetFile) -> ValidationResult {
    let kind = file.kind.clone().into();
    lumensync_effects::validate(&kind).map_err(|e| ValidationError::InvalidParameter {
        id: file.id.clone(),
        detail: e.to_string(),
    })
}

/// Validate every preset in a set, collecting every failure rather than
/// stopping at the first (a config file with three bad presets reports three).
pub fn validate_all(files: &[PresetFile]) -> Vec<ValidationError> {
    files.iter().filter_map(|f| validate_preset(f).err()).collect()
}
