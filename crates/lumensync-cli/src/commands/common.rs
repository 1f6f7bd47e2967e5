//! Shared CLI helpers used across multiple commands.

use lumensync_config::{PresetFile, find_preset as config_find_preset, get_factory_preset};
use std::path::PathBuf;

/// Load a preset by name or path.
///
/// Searches in this order:
/// 1. Factory presets (by name)
/// 2. User presets (by name)
/// 3. System presets (by name)
/// 4. File path (if it's a path to a .toml file)
pub fn load_preset(name: &str) -> anyhow::Result<PresetFile> {
    if let Some(preset) = get_factory_preset(name) {
        return Ok(preset);
    }

    if let Some(path) = config_find_preset(name) {
        return PresetFile::load(&path).map_err(|e| anyhow::anyhow!("{}", e));
    }

    let path = PathBuf::from(name);
    if path.exists() {
        return PresetFile::load(&path).map_err(|e| anyhow::anyhow!("{}", e));
    }

    anyhow::bail!("preset '{}' not found. Use 'lumensync presets list' to see available presets.", name)
}
