//! The daemon orchestrator.
//!
//! Wires the pieces together: startup directory checks, the watcher event
//! stream, the initial scan, the reconciliation tick, and the janitor.

use std::sync::Arc;
use std::time::Duration;

use ms_core::Config;
use ms_watcher::{FileEvent, FileWatcher};
use tokio::time::MissedTickBehavior;

use crate::error::DaemonError;
use crate::janitor;
use crate::reconciler::Reconciler;
use crate::registry::Registry;
use crate::scanner::LibraryWalker;
use crate::startup;

/// The long-running mediasort daemon.
///
/// [`run`](Daemon::run) is perpetual: it watches, reconciles, and prunes
/// until the watcher channel closes or the caller's `select!` drops the
/// future (signal handling lives in the CLI, not here).
///
/// # Examples
///
/// ```no_run
/// use ms_daemon::Daemon;
/// use ms_core::Config;
///
/// # async fn example(config: Config) -> Result<(), ms_daemon::DaemonError> {
/// let daemon = Daemon::new(config);
/// daemon.run().await
/// # }
/// ```
#[derive(Debug)]
pub struct Daemon {
    config: Config,
    registry: Arc<Registry>,
}

impl Daemon {
    /// Creates a daemon for the given configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let registry = Arc::new(Registry::new(&config.rules, &config.library));
        Self { config, registry }
    }

    /// Returns the shared tracked-file registry.
    #[must_use]
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Runs the daemon until the event stream ends.
    ///
    /// 1. Waits for the watch root and destination roots to exist
    ///    (bounded backoff).
    /// 2. Starts the filesystem watcher.
    /// 3. Scans the watch root for files that arrived while the daemon
    ///    was down.
    /// 4. Loops over watcher events and the reconciliation tick.
    ///
    /// # Errors
    ///
    /// Returns an error if required directories never appear, the watcher
    /// cannot start, or the initial scan fails.
    pub async fn run(&self) -> Result<(), DaemonError> {
        startup::wait_for_directories(&self.config).await?;

        let mut watcher = FileWatcher::new(
            &self.config.watch.watch_dir,
            self.config.watch.recursive,
        )
        .await?;

        let tracked = self.scan_existing().await?;
        tracing::info!(
            watch_dir = %self.config.watch.watch_dir,
            tracked,
            "Daemon started, watching directory for changes"
        );

        let reconciler = Reconciler::new(
            Arc::clone(&self.registry),
            Duration::from_secs(self.config.watch.quiet_period_secs),
        );

        let mut tick =
            tokio::time::interval(Duration::from_millis(self.config.watch.tick_interval_ms));
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                maybe_event = watcher.recv() => {
                    match maybe_event {
                        Some(event) => self.handle_event(&event),
                        None => {
                            tracing::info!("Watcher event stream closed, stopping daemon");
                            break;
                        }
                    }
                }
                _ = tick.tick() => {
                    let summary = reconciler.tick().await;
                    if summary.total() > 0 {
                        tracing::debug!(
                            relocated = summary.relocated,
                            deleted = summary.deleted,
                            conflicts = summary.conflicts,
                            skipped = summary.skipped,
                            "Reconciliation pass complete"
                        );
                    }
                    self.prune_empty_directories().await;
                }
            }
        }

        watcher.shutdown().await?;
        tracing::info!("Daemon stopped");
        Ok(())
    }

    /// Routes one watcher event into the registry.
    ///
    /// Directory events are ignored entirely; only plain files are
    /// tracked.
    fn handle_event(&self, event: &FileEvent) {
        if event.is_directory {
            return;
        }

        if event.is_created() {
            tracing::info!(path = %event.path, "New file detected");
            self.registry.register(&event.path);
        } else {
            tracing::debug!(path = %event.path, "Modification detected");
            self.registry.touch(&event.path);
        }
    }

    /// Registers every file already present under the watch root.
    async fn scan_existing(&self) -> Result<usize, DaemonError> {
        let walker = LibraryWalker::new(&self.config.watch.watch_dir)?;
        let registry = Arc::clone(&self.registry);

        tokio::task::spawn_blocking(move || -> Result<usize, DaemonError> {
            let mut tracked = 0;
            for path in walker.collect_files()? {
                tracing::info!(path = %path, "File found during initial scan");
                if registry.register(&path) {
                    tracked += 1;
                }
            }
            Ok(tracked)
        })
        .await
        .map_err(|_| DaemonError::TaskFailed)?
    }

    /// Removes directory subtrees under the watch root left empty by
    /// moves and deletions.
    async fn prune_empty_directories(&self) {
        let watch_dir = self.config.watch.watch_dir.clone();
        let result =
            tokio::task::spawn_blocking(move || janitor::clean(&watch_dir)).await;
        if let Err(error) = result {
            tracing::warn!(error = %error, "Janitor task failed");
        }
    }
}
