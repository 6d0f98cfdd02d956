//! The debounce/reconciliation pass.
//!
//! Each tick takes every quiet entry out of the registry (under the lock)
//! and then acts on the snapshot on tokio's blocking pool (outside the
//! lock): deletable debris is removed in place, everything else is moved
//! to its canonical destination, and conflicts or vanished sources are
//! reported and skipped. A move either completes or fails and is logged —
//! there is no partial-move recovery.

use std::fs;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use camino::Utf8Path;
use ms_classify::RuleSet;
use ms_core::TrackedFile;

use crate::registry::Registry;

/// What the reconciler did with one quiet entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The source was moved to its destination.
    Relocated,
    /// The source had a deletable extension and was removed in place.
    Deleted,
    /// The destination already existed; the source was left untouched.
    Conflict,
    /// The source no longer existed, or the I/O failed.
    Skipped,
}

/// Per-tick summary of reconciliation work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Files moved into the library.
    pub relocated: usize,
    /// Debris files deleted in place.
    pub deleted: usize,
    /// Destination conflicts reported.
    pub conflicts: usize,
    /// Entries skipped (vanished source or failed I/O).
    pub skipped: usize,
}

impl TickSummary {
    /// Total entries acted on this tick.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.relocated + self.deleted + self.conflicts + self.skipped
    }

    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Relocated => self.relocated += 1,
            Outcome::Deleted => self.deleted += 1,
            Outcome::Conflict => self.conflicts += 1,
            Outcome::Skipped => self.skipped += 1,
        }
    }
}

/// Drives quiet tracked files to their terminal state.
#[derive(Debug)]
pub struct Reconciler {
    registry: Arc<Registry>,
    rules: RuleSet,
    quiet_period: Duration,
}

impl Reconciler {
    /// Creates a reconciler over the shared registry.
    #[must_use]
    pub fn new(registry: Arc<Registry>, quiet_period: Duration) -> Self {
        let rules = registry.rules().clone();
        Self {
            registry,
            rules,
            quiet_period,
        }
    }

    /// Runs one reconciliation pass.
    ///
    /// Snapshots quiet entries under the registry lock, then performs all
    /// filesystem work on the blocking pool. Entries selected here are
    /// already out of the registry, so events arriving mid-pass for the
    /// same paths are safe no-ops.
    pub async fn tick(&self) -> TickSummary {
        let actionable = self.registry.take_quiet(self.quiet_period);
        if actionable.is_empty() {
            return TickSummary::default();
        }

        let rules = self.rules.clone();
        let result = tokio::task::spawn_blocking(move || {
            let mut summary = TickSummary::default();
            for file in &actionable {
                summary.record(apply_action(file, &rules));
            }
            summary
        })
        .await;

        match result {
            Ok(summary) => summary,
            Err(error) => {
                tracing::warn!(error = %error, "Reconciliation task failed");
                TickSummary::default()
            }
        }
    }
}

/// Applies the terminal action for one quiet file.
fn apply_action(file: &TrackedFile, rules: &RuleSet) -> Outcome {
    if !file.source.exists() {
        tracing::warn!(path = %file.source, "Tracked file no longer exists, skipping");
        return Outcome::Skipped;
    }

    let deletable = file
        .source_extension()
        .is_some_and(|ext| rules.is_deletable_extension(ext));
    if deletable {
        return match fs::remove_file(file.source.as_std_path()) {
            Ok(()) => {
                tracing::info!(path = %file.source, "Deleted file");
                Outcome::Deleted
            }
            Err(error) => {
                tracing::warn!(path = %file.source, error = %error, "Failed to delete file");
                Outcome::Skipped
            }
        };
    }

    if file.destination.exists() {
        tracing::warn!(
            source = %file.source,
            destination = %file.destination,
            "Destination already exists, leaving source in place"
        );
        return Outcome::Conflict;
    }

    if let Some(parent) = file.destination.parent() {
        if let Err(error) = fs::create_dir_all(parent.as_std_path()) {
            tracing::warn!(path = %parent, error = %error, "Failed to create destination directory");
            return Outcome::Skipped;
        }
    }

    match move_file(&file.source, &file.destination) {
        Ok(()) => {
            tracing::info!(source = %file.source, destination = %file.destination, "Moved file");
            Outcome::Relocated
        }
        Err(error) => {
            tracing::warn!(
                source = %file.source,
                destination = %file.destination,
                error = %error,
                "Failed to move file"
            );
            Outcome::Skipped
        }
    }
}

/// Moves a file, falling back to copy-and-remove when a plain rename
/// fails (destination on another filesystem).
fn move_file(source: &Utf8Path, destination: &Utf8Path) -> io::Result<()> {
    match fs::rename(source.as_std_path(), destination.as_std_path()) {
        Ok(()) => Ok(()),
        Err(_) => {
            fs::copy(source.as_std_path(), destination.as_std_path())?;
            fs::remove_file(source.as_std_path())
        }
    }
}
