//! Error types for the ms-core crate.
//!
//! This module provides the [`ConfigError`] type for configuration-related
//! failures shared across the workspace.

use camino::Utf8PathBuf;

/// Errors that can occur during configuration loading and validation.
///
/// # Examples
///
/// ```
/// use ms_core::ConfigError;
/// use camino::Utf8PathBuf;
///
/// let error = ConfigError::MissingDirectory(Utf8PathBuf::from("/library/movies"));
/// assert!(error.to_string().contains("/library/movies"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The provided path is invalid or malformed.
    #[error("invalid path '{path}': {reason}")]
    InvalidPath {
        /// The invalid path.
        path: Utf8PathBuf,
        /// Explanation of why the path is invalid.
        reason: String,
    },

    /// A required directory does not exist.
    #[error("missing required directory: {0}")]
    MissingDirectory(Utf8PathBuf),

    /// An I/O error occurred while reading configuration.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_path_display() {
        let error = ConfigError::InvalidPath {
            path: Utf8PathBuf::from("/watch"),
            reason: "not a directory".to_owned(),
        };
        let msg = error.to_string();
        assert!(msg.contains("/watch"));
        assert!(msg.contains("not a directory"));
    }

    #[test]
    fn test_missing_directory_display() {
        let error = ConfigError::MissingDirectory(Utf8PathBuf::from("/missing"));
        assert!(error.to_string().contains("/missing"));
    }
}
