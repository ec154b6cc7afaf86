//! Error types for preset operations.

use fdnverb_reverb::ReverbError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, saving or applying presets.
#[derive(Debug, Error)]
pub enum ConfigError {
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

    /// Parameter outside its range
    #[error("invalid value {value} for '{param}': {reason}")]
    InvalidParameter {
        /// Name of the offending field.
        param: &'static str,
        /// Value found in the preset.
        value: f32,
        /// Accepted range.
        reason: &'static str,
    },

    /// Building the reverb failed
    #[error(transparent)]
    Reverb(#[from] ReverbError),
}

impl ConfigError {
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

    /// Create an invalid parameter error.
    pub fn invalid(param: &'static str, value: f32, reason: &'static str) -> Self {
        ConfigError::InvalidParameter {
            param,
            value,
            reason,
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
    fn read_file_display() {
        let err = ConfigError::read_file("/a/b.toml", mock_io_err());
        let msg = err.to_string();
        assert!(msg.contains("failed to read file"), "got: {msg}");
        assert!(msg.contains("/a/b.toml"), "got: {msg}");
        assert!(err.source().is_some());
    }

    #[test]
    fn invalid_parameter_display() {
        let err = ConfigError::invalid("roomsize", 1.5, "expected 0..=1");
        assert_eq!(
            err.to_string(),
            "invalid value 1.5 for 'roomsize': expected 0..=1"
        );
    }

    #[test]
    fn reverb_error_is_transparent() {
        let err = ConfigError::from(ReverbError::InvalidSampleRate(-1.0));
        assert_eq!(err.to_string(), "invalid sample rate: -1");
    }

    #[test]
    fn toml_parse_from() {
        let toml_err = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let err = ConfigError::from(toml_err);
        assert!(err.to_string().starts_with("failed to parse TOML"));
    }
}
