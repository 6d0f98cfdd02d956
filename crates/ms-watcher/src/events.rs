//! Event types for file change notifications.

use camino::Utf8PathBuf;
use std::time::Instant;

/// What kind of filesystem change an event describes.
///
/// Only creations and modifications matter to the daemon; removals and
/// access events are filtered out at the watcher callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileEventKind {
    /// A path newly appeared under the watch root.
    Created,
    /// An existing path changed (content or metadata write).
    Modified,
}

/// A single filesystem change event with a UTF-8 path guarantee.
///
/// The `is_directory` flag is delivered with every event so consumers can
/// discard directory events without touching the filesystem again.
///
/// # Examples
///
/// ```
/// use ms_watcher::{FileEvent, FileEventKind};
/// use camino::Utf8PathBuf;
///
/// let event = FileEvent::new(
///     Utf8PathBuf::from("/downloads/episode.mkv"),
///     FileEventKind::Created,
///     false,
/// );
/// assert!(event.is_created());
/// assert_eq!(event.file_name(), Some("episode.mkv"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEvent {
    /// Absolute path of the changed entry.
    pub path: Utf8PathBuf,

    /// Whether the path appeared or changed.
    pub kind: FileEventKind,

    /// Whether the path is a directory.
    pub is_directory: bool,

    /// When this event was received, for monotonic elapsed-time checks.
    pub timestamp: Instant,
}

impl FileEvent {
    /// Creates a new event timestamped now.
    #[inline]
    #[must_use]
    pub fn new(path: Utf8PathBuf, kind: FileEventKind, is_directory: bool) -> Self {
        Self {
            path,
            kind,
            is_directory,
            timestamp: Instant::now(),
        }
    }

    /// Returns `true` for creation events.
    #[inline]
    #[must_use]
    pub const fn is_created(&self) -> bool {
        matches!(self.kind, FileEventKind::Created)
    }

    /// Returns `true` for modification events.
    #[inline]
    #[must_use]
    pub const fn is_modified(&self) -> bool {
        matches!(self.kind, FileEventKind::Modified)
    }

    /// Returns the file name without the directory portion.
    #[inline]
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_predicates() {
        let created = FileEvent::new(
            Utf8PathBuf::from("/watch/a.mkv"),
            FileEventKind::Created,
            false,
        );
        assert!(created.is_created());
        assert!(!created.is_modified());

        let modified = FileEvent::new(
            Utf8PathBuf::from("/watch/a.mkv"),
            FileEventKind::Modified,
            false,
        );
        assert!(modified.is_modified());
    }

    #[test]
    fn test_file_name() {
        let event = FileEvent::new(
            Utf8PathBuf::from("/watch/sub/episode.mkv"),
            FileEventKind::Created,
            false,
        );
        assert_eq!(event.file_name(), Some("episode.mkv"));
    }
}
