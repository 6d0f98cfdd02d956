//! Error types for the ms-daemon crate.

use camino::Utf8PathBuf;

/// Errors that can occur while running the daemon.
///
/// Per-file failures during a reconciliation pass (vanished sources,
/// destination conflicts, failed moves) are deliberately *not* errors:
/// they are logged and the pass continues. This type covers the failures
/// that stop the daemon itself.
#[derive(Debug, thiserror::Error)]
pub enum DaemonError {
    /// Configuration was invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ms_core::ConfigError),

    /// The file watcher failed.
    #[error("watcher error: {0}")]
    Watch(#[from] ms_watcher::WatchError),

    /// Required directories were still missing after the bounded startup
    /// backoff.
    #[error("required directories still missing after {attempts} attempts: {missing:?}")]
    MissingDirectories {
        /// How many times the check ran.
        attempts: u32,
        /// The directories that never appeared.
        missing: Vec<Utf8PathBuf>,
    },

    /// Walking the watch directory failed during the initial scan.
    #[error("failed to walk watch directory: {0}")]
    Walk(#[from] ignore::Error),

    /// A blocking task panicked or was cancelled.
    #[error("background task failed")]
    TaskFailed,

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_directories_display() {
        let err = DaemonError::MissingDirectories {
            attempts: 10,
            missing: vec![Utf8PathBuf::from("/library/movies")],
        };
        let msg = err.to_string();
        assert!(msg.contains("10 attempts"));
        assert!(msg.contains("/library/movies"));
    }
}
