//! Error types for the ms-watcher crate.

use camino::Utf8PathBuf;

/// Errors that can occur during file watching.
///
/// # Error Recovery Strategy
///
/// - [`WatchError::Notify`], [`WatchError::PathNotFound`],
///   [`WatchError::ChannelClosed`], [`WatchError::Io`]: fatal — watching
///   cannot continue.
/// - [`WatchError::NonUtf8Path`]: recoverable — the offending event is
///   logged and skipped, watching continues.
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    /// Failed to initialize or operate the notify watcher.
    #[error("notify watcher error: {0}")]
    Notify(#[from] notify::Error),

    /// The watch path does not exist.
    #[error("watch path does not exist: {0}")]
    PathNotFound(Utf8PathBuf),

    /// The event channel was closed unexpectedly.
    #[error("event channel closed unexpectedly")]
    ChannelClosed,

    /// A path delivered by the watcher is not valid UTF-8.
    #[error("path is not valid UTF-8: {}", _0.display())]
    NonUtf8Path(std::path::PathBuf),

    /// An I/O error occurred during path validation.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WatchError {
    /// Creates a [`WatchError::PathNotFound`].
    #[inline]
    pub fn path_not_found(path: impl Into<Utf8PathBuf>) -> Self {
        Self::PathNotFound(path.into())
    }

    /// Returns `true` if watching can continue after this error.
    #[inline]
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::NonUtf8Path(_))
    }

    /// Returns `true` if watching must stop.
    #[inline]
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !self.is_recoverable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_path_not_found() {
        let err = WatchError::path_not_found("/watch/missing");
        assert!(err.is_fatal());
        assert!(err.to_string().contains("/watch/missing"));
    }

    #[test]
    fn test_non_utf8_is_recoverable() {
        let err = WatchError::NonUtf8Path(PathBuf::from("odd"));
        assert!(err.is_recoverable());
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_channel_closed_display() {
        assert!(WatchError::ChannelClosed
            .to_string()
            .contains("channel closed"));
    }
}
