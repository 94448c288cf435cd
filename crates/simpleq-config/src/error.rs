//! Error types for persistence and preset operations.

use std::path::PathBuf;

use simpleq_core::EqError;
use thiserror::Error;

/// Errors that can occur while saving or restoring equalizer state.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A state blob could not be decoded. The live parameters are untouched.
    #[error("corrupt state: {0}")]
    CorruptState(String),

    /// Failed to encode a state blob
    #[error("failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create directory
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        /// Path of the directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Preset not found
    #[error("preset not found: {0}")]
    PresetNotFound(String),

    /// A preset or snapshot carried a value the parameter store rejects
    #[error("invalid parameter: {0}")]
    InvalidParameter(#[from] EqError),
}

impl ConfigError {
    /// Create a corrupt state error.
    pub fn corrupt(reason: impl Into<String>) -> Self {
        ConfigError::CorruptState(reason.into())
    }

    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Create a create directory error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::CreateDir {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn mock_io_err() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::NotFound, "mock")
    }

    #[test]
    fn read_file_factory_produces_correct_variant() {
        let err = ConfigError::read_file("/some/path", mock_io_err());
        assert!(matches!(
            err,
            ConfigError::ReadFile { ref path, .. } if path == std::path::Path::new("/some/path")
        ));
        assert!(err.source().is_some(), "ReadFile must expose I/O source");
    }

    #[test]
    fn write_file_display() {
        let err = ConfigError::write_file("/a/state.json", mock_io_err());
        let msg = err.to_string();
        assert!(msg.contains("failed to write file"), "got: {msg}");
        assert!(msg.contains("/a/state.json"), "got: {msg}");
    }

    #[test]
    fn create_dir_display() {
        let err = ConfigError::create_dir("/a/b", mock_io_err());
        assert!(err.to_string().contains("failed to create directory"));
    }

    #[test]
    fn corrupt_state_display() {
        let err = ConfigError::corrupt("not a JSON object");
        assert_eq!(err.to_string(), "corrupt state: not a JSON object");
        assert!(err.source().is_none());
    }

    #[test]
    fn invalid_parameter_wraps_core_error() {
        let err: ConfigError = EqError::UnknownParameter("drive".into()).into();
        assert_eq!(err.to_string(), "invalid parameter: unknown parameter: drive");
    }

    #[test]
    fn preset_not_found_display() {
        let err = ConfigError::PresetNotFound("my-preset".to_string());
        assert_eq!(err.to_string(), "preset not found: my-preset");
    }
}
