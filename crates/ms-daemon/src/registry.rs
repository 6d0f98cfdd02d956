//! The authoritative in-memory set of files being watched for quiescence.
//!
//! The registry is the single mutual-exclusion domain of the daemon: the
//! event-ingestion path (`register`/`touch`) and the reconciliation tick
//! (`take_quiet`) are serialized through one `parking_lot::Mutex`, so no
//! operation ever observes a partially-updated entry. Blocking I/O never
//! happens under the lock — the tick snapshots and removes actionable
//! entries, then acts on them after the lock is released.

use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use parking_lot::Mutex;

use ms_classify::{Planner, RuleSet};
use ms_core::{FxHashMap, LibraryConfig, RuleConfig, TrackedFile};

/// Tracked-file registry keyed by source path.
///
/// # Examples
///
/// ```
/// use ms_daemon::Registry;
/// use ms_core::{LibraryConfig, RuleConfig};
/// use camino::Utf8Path;
///
/// let registry = Registry::new(&RuleConfig::default(), &LibraryConfig::default());
///
/// assert!(registry.register(Utf8Path::new("/watch/test.mp4")));
/// // Re-discovering an already-tracked file is a no-op
/// assert!(!registry.register(Utf8Path::new("/watch/test.mp4")));
/// assert_eq!(registry.len(), 1);
/// ```
#[derive(Debug)]
pub struct Registry {
    planner: Planner,
    files: Mutex<FxHashMap<Utf8PathBuf, TrackedFile>>,
}

impl Registry {
    /// Creates an empty registry that classifies with the given rules and
    /// plans destinations in the given library layout.
    #[must_use]
    pub fn new(rules: &RuleConfig, library: &LibraryConfig) -> Self {
        Self {
            planner: Planner::new(rules, library),
            files: Mutex::new(FxHashMap::default()),
        }
    }

    /// Returns the rule sets used for classification.
    #[inline]
    #[must_use]
    pub const fn rules(&self) -> &RuleSet {
        self.planner.rules()
    }

    /// Classifies and inserts a newly observed path.
    ///
    /// Registration is idempotent: if the path is already tracked nothing
    /// changes and `false` is returned. Paths without a final component
    /// (e.g. a filesystem root) are ignored.
    pub fn register(&self, source: &Utf8Path) -> bool {
        let Some(file_name) = source.file_name() else {
            tracing::warn!(path = %source, "Ignoring path without a file name");
            return false;
        };

        let mut files = self.files.lock();
        if files.contains_key(source) {
            return false;
        }

        let plan = self.planner.plan(file_name);
        tracing::debug!(
            path = %source,
            kind = plan.classification.label(),
            destination = %plan.destination,
            "Tracking file"
        );
        files.insert(
            source.to_owned(),
            TrackedFile::new(source.to_owned(), plan.canonical_name, plan.destination),
        );
        true
    }

    /// Refreshes the quiet timer for a tracked path.
    ///
    /// A touch for an untracked path is ignored — the path may belong to
    /// something outside the tracked set (a directory, or a file already
    /// actioned this tick). Returns whether an entry was refreshed.
    pub fn touch(&self, source: &Utf8Path) -> bool {
        let mut files = self.files.lock();
        match files.get_mut(source) {
            Some(file) => {
                file.touch();
                true
            }
            None => false,
        }
    }

    /// Removes a tracked path, returning its entry if one existed.
    pub fn remove(&self, source: &Utf8Path) -> Option<TrackedFile> {
        self.files.lock().remove(source)
    }

    /// Returns `true` if the path is currently tracked.
    #[must_use]
    pub fn contains(&self, source: &Utf8Path) -> bool {
        self.files.lock().contains_key(source)
    }

    /// Removes and returns every entry quiet for at least `quiet_period`.
    ///
    /// The snapshot and removal happen atomically under the lock; the
    /// caller performs any I/O on the returned entries after the lock has
    /// been released. A modification event racing this call lands either
    /// before the snapshot (refreshing the timer, keeping the entry) or
    /// after it (a no-op touch on the now-absent entry).
    #[must_use]
    pub fn take_quiet(&self, quiet_period: Duration) -> Vec<TrackedFile> {
        let mut files = self.files.lock();
        let quiet_paths: Vec<Utf8PathBuf> = files
            .iter()
            .filter(|(_, file)| file.is_quiet(quiet_period))
            .map(|(path, _)| path.clone())
            .collect();

        quiet_paths
            .into_iter()
            .filter_map(|path| files.remove(&path))
            .collect()
    }

    /// Returns the number of tracked files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.lock().len()
    }

    /// Returns `true` if nothing is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.lock().is_empty()
    }

    /// Rewinds a tracked file's quiet timer by `age`, as if its last
    /// modification happened that long ago. Test helper.
    #[cfg(test)]
    pub(crate) fn backdate(&self, source: &Utf8Path, age: Duration) {
        if let Some(file) = self.files.lock().get_mut(source) {
            file.last_modified = std::time::Instant::now() - age;
        }
    }
}
