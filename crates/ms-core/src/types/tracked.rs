//! A file being watched for quiescence before relocation.

use std::time::{Duration, Instant};

use camino::Utf8PathBuf;

/// A file currently tracked by the registry.
///
/// Created the moment a path is first observed (discovery or creation
/// event); destroyed exactly when the reconciliation loop relocates or
/// deletes it. The registry exclusively owns the collection of these —
/// other components only see transient copies taken during a
/// reconciliation pass.
///
/// # Examples
///
/// ```
/// use ms_core::TrackedFile;
/// use camino::Utf8PathBuf;
/// use std::time::Duration;
///
/// let file = TrackedFile::new(
///     Utf8PathBuf::from("/watch/Alien.1979.1080p.mp4"),
///     "alien 1979.mp4".to_owned(),
///     Utf8PathBuf::from("/movies/Alien (1979)/Alien (1979).mp4"),
/// );
///
/// // Freshly observed: not yet quiet for any real period
/// assert!(!file.is_quiet(Duration::from_secs(60)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedFile {
    /// Absolute path where the file was observed.
    pub source: Utf8PathBuf,

    /// Canonical file name (tag-truncated, lowercase) plus extension.
    pub canonical_name: String,

    /// Canonical destination path in the library layout.
    pub destination: Utf8PathBuf,

    /// When the file was last seen changing.
    ///
    /// Uses [`Instant`] for monotonic timing; wall-clock display is not
    /// needed for the quiet-period comparison.
    pub last_modified: Instant,
}

impl TrackedFile {
    /// Creates a tracked file observed now.
    #[must_use]
    pub fn new(source: Utf8PathBuf, canonical_name: String, destination: Utf8PathBuf) -> Self {
        Self {
            source,
            canonical_name,
            destination,
            last_modified: Instant::now(),
        }
    }

    /// Creates a tracked file with an explicit observation time.
    ///
    /// Useful for testing quiet-period behavior without sleeping.
    #[must_use]
    pub const fn with_last_modified(
        source: Utf8PathBuf,
        canonical_name: String,
        destination: Utf8PathBuf,
        last_modified: Instant,
    ) -> Self {
        Self {
            source,
            canonical_name,
            destination,
            last_modified,
        }
    }

    /// Records a modification event: the quiet timer restarts.
    #[inline]
    pub fn touch(&mut self) {
        self.last_modified = Instant::now();
    }

    /// Returns `true` once at least `quiet_period` has elapsed since the
    /// last observed modification.
    #[inline]
    #[must_use]
    pub fn is_quiet(&self, quiet_period: Duration) -> bool {
        self.last_modified.elapsed() >= quiet_period
    }

    /// Returns the file extension of the source path, if any.
    #[inline]
    #[must_use]
    pub fn source_extension(&self) -> Option<&str> {
        self.source.extension()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(last_modified: Instant) -> TrackedFile {
        TrackedFile::with_last_modified(
            Utf8PathBuf::from("/watch/test.mp4"),
            "test.mp4".to_owned(),
            Utf8PathBuf::from("/misc/test.mp4"),
            last_modified,
        )
    }

    #[test]
    fn test_fresh_file_is_not_quiet() {
        let file = sample(Instant::now());
        assert!(!file.is_quiet(Duration::from_secs(60)));
    }

    #[test]
    fn test_aged_file_is_quiet() {
        let file = sample(Instant::now() - Duration::from_secs(120));
        assert!(file.is_quiet(Duration::from_secs(60)));
    }

    #[test]
    fn test_touch_resets_quiet_timer() {
        let mut file = sample(Instant::now() - Duration::from_secs(120));
        assert!(file.is_quiet(Duration::from_secs(60)));

        file.touch();
        assert!(!file.is_quiet(Duration::from_secs(60)));
    }

    #[test]
    fn test_source_extension() {
        let file = sample(Instant::now());
        assert_eq!(file.source_extension(), Some("mp4"));

        let no_ext = TrackedFile::new(
            Utf8PathBuf::from("/watch/README"),
            "readme".to_owned(),
            Utf8PathBuf::from("/other/readme"),
        );
        assert_eq!(no_ext.source_extension(), None);
    }
}
