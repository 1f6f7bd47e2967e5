//! Platform-specific directories for lighting presets and pipeline config.
//!
//! `lumensync run` and `lumensync presets` resolve a preset name against
//! these directories in order: user presets first (so a user's own tweak
//! of e.g. `beat_flash` shadows the factory one), then the read-only
//! system presets directory.
//!
//! # Directory Structure
//!
//! - **User presets**: `~/.config/lumensync/presets/` (Linux), `~/Library/Application Support/lumensync/presets/` (macOS), `%APPDATA%\lumensync\presets\` (Windows)
//! - **User config**: `~/.config/lumensync/` (Linux), `~/Library/Application Support/lumensync/` (macOS), `%APPDATA%\lumensync\` (Windows)
//! - **System presets**: `/usr/share/lumensync/presets/` (Linux), `/Library/Application Support/lumensync/presets/` (macOS)
//!
//! # Example
//!
//! ```rust,no_run
//! use lumensync_config::paths;
//!
//! let presets_dir = paths::user_presets_dir();
//! println!("User presets: {:?}", presets_dir);
//!
//! if let Some(path) = paths::find_preset("beat_flash") {
//!     println!("Found preset at: {:?}", path);
//! }
//! ```

use std::path::PathBuf;

/// Application name used for directory paths.
const APP_NAME: &str = "lumensync";

/// Subdirectory name for presets.
const PRESETS_SUBDIR: &str = "presets";

/// Returns the user-specific presets directory.
///
/// # Platform Paths
///
/// - Linux: `~/.config/lumensync/presets/`
/// - macOS: `~/Library/Application Support/lumensync/presets/`
/// - Windows: `%APPDATA%\lumensync\presets\`
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_presets_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
        .join(PRESETS_SUBDIR)
}

/// Returns the user-specific configuration directory.
///
/// # Platform Paths
///
/// - Linux: `~/.config/lumensync/`
/// - macOS: `~/Library/Application Support/lumensync/`
/// - Windows: `%APPDATA%\lumensync\`
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the system-wide presets directory.
///
/// This directory is typically read-only and contains factory presets.
///
/// # Platform Paths
///
/// - Linux: `/usr/share/lumensync/presets/`
/// - macOS: `/Library/Application Support/lumensync/presets/`
/// - Windows: `%PROGRAMDATA%\lumensync\presets\`
pub fn system_presets_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        PathBuf::from("/usr/share").join(APP_NAME).join(PRESETS_SUBDIR)
    }
    #[cfg(target_os = "macos")]
    {
        PathBuf::from("/Library/Application Support").join(APP_NAME).join(PRESETS_SUBDIR)
    }
    #[cfg(target_os = "windows")]
    {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData"))
            .join(APP_NAME)
            .join(PRESETS_SUBDIR)
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_NAME)
            .join(PRESETS_SUBDIR)
    }
}

/// Find a user or system preset file by name.
///
/// Searches in the following order:
/// 1. Current directory (if the path is a valid file)
/// 2. User presets directory
/// 3. System presets directory
///
/// The name can be:
/// - An absolute path to a TOML file
/// - A relative path to a TOML file
/// - A preset name (with or without `.toml` extension)
///
/// Factory presets (the seven built-in algorithms) are not searched here —
/// callers check [`crate::get_factory_preset`] first, since those never
/// touch disk.
///
/// # Example
///
/// ```rust,no_run
/// use lumensync_config::paths::find_preset;
///
/// // Find by name
/// if let Some(path) = find_preset("beat_flash") {
///     println!("Found: {:?}", path);
/// }
///
/// // Find by path
/// if let Some(path) = find_preset("/path/to/my_preset.toml") {
///     println!("Found: {:?}", path);
/// }
/// ```
pub fn find_preset(name: &str) -> Option<PathBuf> {
    let path = PathBuf::from(name);

    // Check if it's already a valid file path
    if path.is_file() {
        return Some(path);
    }

    // Normalize the name (add .toml if not present)
    let filename = if name.ends_with(".toml") {
        name.to_string()
    } else {
        format!("{}.toml", name)
    };

    // Search user presets directory
    let user_path = user_presets_dir().join(&filename);
    if user_path.is_file() {
        return Some(user_path);
    }

    // Search system presets directory
    let system_path = system_presets_dir().join(&filename);
    if system_path.is_file() {
        return Some(system_path);
    }

    None
}

/// List all preset files in the user presets directory.
///
/// Returns an empty vector if the directory doesn't exist or can't be read.
pub fn list_user_presets() -> Vec<PathBuf> {
    list_presets_in_dir(&user_presets_dir())
}

/// Helper to list preset files in a directory.
fn list_presets_in_dir(dir: &PathBuf) -> Vec<PathBuf> {
    if !dir.exists() {
        return Vec::new();
    }

    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .map(|ext| ext == "toml")
                    .unwrap_or(false)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_user_presets_dir() {
        let dir = user_presets_dir();
        let dir_str = dir.to_string_lossy();
        assert!(dir_str.contains("lumensync") || dir_str.contains("presets"));
    }

    #[test]
    fn test_user_config_dir() {
        let dir = user_config_dir();
        let dir_str = dir.to_string_lossy();
        assert!(dir_str.contains("lumensync"));
    }

    #[test]
    fn test_system_presets_dir() {
        let dir = system_presets_dir();
        let dir_str = dir.to_string_lossy();
        assert!(dir_str.contains("lumensync"));
    }

    #[test]
    fn test_find_preset_by_path() {
        let temp_dir = TempDir::new().unwrap();
        let preset_path = temp_dir.path().join("test.toml");
        fs::write(&preset_path, "name = \"test\"").unwrap();

        let found = find_preset(preset_path.to_str().unwrap());
        assert!(found.is_some());
        assert_eq!(found.unwrap(), preset_path);
    }

    #[test]
    fn test_find_preset_not_found() {
        let found = find_preset("nonexistent_preset_12345");
        assert!(found.is_none());
    }

    #[test]
    fn test_list_presets_in_dir() {
        let temp_dir = TempDir::new().unwrap();

        // Create some preset files
        fs::write(temp_dir.path().join("preset1.toml"), "").unwrap();
        fs::write(temp_dir.path().join("preset2.toml"), "").unwrap();
        fs::write(temp_dir.path().join("not_a_preset.txt"), "").unwrap();

        let presets = list_presets_in_dir(&temp_dir.path().to_path_buf());
        assert_eq!(presets.len(), 2);
        assert!(presets.iter().all(|p| p.extension().unwrap() == "toml"));
    }

    #[test]
    fn test_list_presets_empty_dir() {
        let temp_dir = TempDir::new().unwrap();
        let presets = list_presets_in_dir(&temp_dir.path().to_path_buf());
        assert!(presets.is_empty());
    }

    #[test]
    fn test_list_presets_nonexistent_dir() {
        let presets = list_presets_in_dir(&PathBuf::from("/nonexistent/path/12345"));
        assert!(presets.is_empty());
    }

    #[test]
    fn test_find_preset_adds_extension() {
        // Verify that find_preset adds .toml extension when searching
        // (This is a logic test, not a file system test)
        let temp_dir = TempDir::new().unwrap();
        let preset_path = temp_dir.path().join("mypreset.toml");
        fs::write(&preset_path, "name = \"test\"").unwrap();

        // Should find it even without .toml extension when given full path
        let found = find_preset(preset_path.to_str().unwrap());
        assert!(found.is_some());
    }
}
