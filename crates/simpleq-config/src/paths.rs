//! Where presets and saved state live on disk.
//!
//! | Kind | Linux | macOS | Windows |
//! |---|---|---|---|
//! | config | `~/.config/simpleq/` | `~/Library/Application Support/simpleq/` | `%APPDATA%\simpleq\` |
//! | presets | `<config>/presets/` | `<config>/presets/` | `<config>\presets\` |
//! | session state | `<config>/state.json` | `<config>/state.json` | `<config>\state.json` |
//!
//! When no platform config directory exists the current directory stands in.

use std::path::{Path, PathBuf};

const APP_NAME: &str = "simpleq";
const PRESETS_SUBDIR: &str = "presets";
const STATE_FILE: &str = "state.json";
const PRESET_EXTENSION: &str = "toml";

/// User configuration directory.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// User preset directory.
pub fn user_presets_dir() -> PathBuf {
    user_config_dir().join(PRESETS_SUBDIR)
}

/// Default location of the saved session state blob.
pub fn default_state_path() -> PathBuf {
    user_config_dir().join(STATE_FILE)
}

/// Create the user preset directory if needed and return it.
pub fn ensure_user_presets_dir() -> Result<PathBuf, crate::ConfigError> {
    let dir = user_presets_dir();
    std::fs::create_dir_all(&dir).map_err(|e| crate::ConfigError::create_dir(&dir, e))?;
    Ok(dir)
}

/// Resolve a preset argument to a file.
///
/// An existing file path wins; otherwise `name` (with `.toml` appended if
/// missing) is looked up in the user preset directory.
///
/// ```rust,no_run
/// use simpleq_config::paths::find_preset;
///
/// if let Some(path) = find_preset("rumble_filter") {
///     println!("Found: {}", path.display());
/// }
/// ```
pub fn find_preset(name: &str) -> Option<PathBuf> {
    find_preset_in(name, &user_presets_dir())
}

fn find_preset_in(name: &str, dir: &Path) -> Option<PathBuf> {
    let direct = PathBuf::from(name);
    if direct.is_file() {
        return Some(direct);
    }

    let mut candidate = dir.join(name);
    if candidate.extension().is_none_or(|ext| ext != PRESET_EXTENSION) {
        candidate = dir.join(format!("{name}.{PRESET_EXTENSION}"));
    }
    candidate.is_file().then_some(candidate)
}

/// Preset files in the user preset directory, sorted by path.
pub fn list_user_presets() -> Vec<PathBuf> {
    list_presets_in_dir(&user_presets_dir())
}

/// `.toml` files directly inside `dir`, sorted. Unreadable or missing
/// directories yield an empty list.
pub fn list_presets_in_dir(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut presets: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file() && path.extension().is_some_and(|ext| ext == PRESET_EXTENSION)
        })
        .collect();
    presets.sort();
    presets
}

/// File stem of a preset path.
///
/// ```rust
/// use simpleq_config::paths::preset_name_from_path;
/// use std::path::Path;
///
/// let name = preset_name_from_path(Path::new("/path/to/rumble_filter.toml"));
/// assert_eq!(name.as_deref(), Some("rumble_filter"));
/// ```
pub fn preset_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_dirs_are_namespaced() {
        assert!(user_config_dir().ends_with(APP_NAME));
        assert!(user_presets_dir().ends_with(PathBuf::from(APP_NAME).join(PRESETS_SUBDIR)));
        assert_eq!(default_state_path().file_name().unwrap(), STATE_FILE);
    }

    #[test]
    fn test_find_preset_by_path() {
        let temp_dir = TempDir::new().unwrap();
        let preset_path = temp_dir.path().join("test.toml");
        fs::write(&preset_path, "name = \"test\"").unwrap();

        assert_eq!(find_preset(preset_path.to_str().unwrap()), Some(preset_path));
    }

    #[test]
    fn test_find_preset_by_name_adds_extension() {
        let temp_dir = TempDir::new().unwrap();
        let preset_path = temp_dir.path().join("bright.toml");
        fs::write(&preset_path, "name = \"bright\"").unwrap();

        assert_eq!(find_preset_in("bright", temp_dir.path()), Some(preset_path.clone()));
        assert_eq!(find_preset_in("bright.toml", temp_dir.path()), Some(preset_path));
        assert!(find_preset_in("dark", temp_dir.path()).is_none());
    }

    #[test]
    fn test_find_preset_not_found() {
        assert!(find_preset("nonexistent_preset_12345").is_none());
    }

    #[test]
    fn test_list_presets_in_dir() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("b.toml"), "").unwrap();
        fs::write(temp_dir.path().join("a.toml"), "").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "").unwrap();

        let presets = list_presets_in_dir(temp_dir.path());
        assert_eq!(presets.len(), 2);
        assert!(presets[0].ends_with("a.toml"));
    }

    #[test]
    fn test_list_presets_nonexistent_dir() {
        assert!(list_presets_in_dir(Path::new("/nonexistent/path/12345")).is_empty());
    }

    #[test]
    fn test_preset_name_from_path() {
        assert_eq!(
            preset_name_from_path(Path::new("simple.toml")),
            Some("simple".to_string())
        );
    }
}
