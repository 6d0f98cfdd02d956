//! File watcher with async event streaming.
//!
//! [`FileWatcher`] bridges the synchronous `notify` watcher to the tokio
//! runtime: the `RecommendedWatcher` runs on tokio's blocking pool, its
//! callback maps raw events to [`FileEvent`]s and forwards them through a
//! bounded mpsc channel, and a oneshot channel signals shutdown.
//!
//! No debouncing happens here — the daemon's quiet-period timers consume
//! every modification event (see the crate docs).

use camino::{Utf8Path, Utf8PathBuf};
use notify::event::CreateKind;
use notify::{Event, EventKind, RecursiveMode, Watcher};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::error::WatchError;
use crate::events::{FileEvent, FileEventKind};

/// Default channel capacity for file events.
const DEFAULT_CHANNEL_CAPACITY: usize = 100;

/// A file watcher that streams events to an async context.
///
/// # Lifecycle
///
/// 1. **Creation**: [`FileWatcher::new`] validates the path, creates the
///    channels, and spawns a blocking task that owns the notify watcher.
/// 2. **Event reception**: [`recv`](FileWatcher::recv) /
///    [`try_recv`](FileWatcher::try_recv) yield events already converted
///    to UTF-8 paths with their kind and directory flag.
/// 3. **Shutdown**: [`shutdown`](FileWatcher::shutdown) for a graceful
///    stop; dropping the watcher also signals the blocking task.
pub struct FileWatcher {
    /// Sending on this channel signals the blocking task to stop.
    shutdown_tx: Option<oneshot::Sender<()>>,

    /// Handle to the blocking watcher task, awaited during shutdown.
    task_handle: Option<JoinHandle<Result<(), WatchError>>>,

    /// Event receiver for async consumption.
    event_rx: mpsc::Receiver<FileEvent>,

    /// The canonicalized path being watched.
    watch_path: Utf8PathBuf,
}

impl std::fmt::Debug for FileWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWatcher")
            .field("watch_path", &self.watch_path)
            .field("is_running", &self.is_running())
            .finish_non_exhaustive()
    }
}

impl FileWatcher {
    /// Creates a new file watcher for the specified path.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::PathNotFound`] if the path doesn't exist and
    /// [`WatchError::Notify`] if the watcher fails to initialize.
    #[allow(clippy::unused_async)] // Async for API consistency with shutdown()
    pub async fn new(path: &Utf8Path, recursive: bool) -> Result<Self, WatchError> {
        Self::with_capacity(path, recursive, DEFAULT_CHANNEL_CAPACITY).await
    }

    /// Creates a file watcher with a custom event channel capacity.
    ///
    /// Use a larger capacity when bursts of changes (e.g. a torrent
    /// client finalizing many files at once) must not block the watcher
    /// thread.
    #[allow(clippy::unused_async)] // Async for API consistency with shutdown()
    pub async fn with_capacity(
        path: &Utf8Path,
        recursive: bool,
        channel_capacity: usize,
    ) -> Result<Self, WatchError> {
        if !path.exists() {
            return Err(WatchError::path_not_found(path));
        }

        let watch_path = path.canonicalize_utf8().map_err(WatchError::Io)?;

        let (event_tx, event_rx) = mpsc::channel(channel_capacity);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let task_path = watch_path.clone();
        let task_handle = tokio::task::spawn_blocking(move || {
            run_watcher_loop(task_path, recursive, event_tx, shutdown_rx)
        });

        Ok(Self {
            shutdown_tx: Some(shutdown_tx),
            task_handle: Some(task_handle),
            event_rx,
            watch_path,
        })
    }

    /// Receives the next file event asynchronously.
    ///
    /// Returns `None` when the watcher has been shut down or the channel
    /// is closed.
    pub async fn recv(&mut self) -> Option<FileEvent> {
        self.event_rx.recv().await
    }

    /// Tries to receive a file event without blocking.
    pub fn try_recv(&mut self) -> Result<FileEvent, mpsc::error::TryRecvError> {
        self.event_rx.try_recv()
    }

    /// Returns the path being watched.
    #[must_use]
    pub fn watch_path(&self) -> &Utf8Path {
        &self.watch_path
    }

    /// Returns `true` if the blocking watcher task is still running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.shutdown_tx.is_some() && self.task_handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Gracefully shuts down the watcher and awaits the blocking task.
    ///
    /// # Errors
    ///
    /// Returns any error the watcher thread hit during operation.
    pub async fn shutdown(mut self) -> Result<(), WatchError> {
        if let Some(tx) = self.shutdown_tx.take() {
            // Ignore error if receiver is already dropped
            let _ = tx.send(());
        }

        if let Some(handle) = self.task_handle.take() {
            match handle.await {
                Ok(result) => result?,
                Err(_join_error) => return Err(WatchError::ChannelClosed),
            }
        }

        Ok(())
    }
}

impl Drop for FileWatcher {
    fn drop(&mut self) {
        // Signal shutdown; the blocking task stops on its own. Drop is
        // sync, so the task cannot be awaited here.
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Maps a raw notify event kind to the two kinds the daemon consumes.
///
/// Access and removal events carry no signal for the quiet-period state
/// machine and are dropped.
fn map_event_kind(kind: &EventKind) -> Option<FileEventKind> {
    match kind {
        EventKind::Create(_) => Some(FileEventKind::Created),
        EventKind::Modify(_) => Some(FileEventKind::Modified),
        EventKind::Access(_) | EventKind::Remove(_) | EventKind::Any | EventKind::Other => None,
    }
}

/// Runs the notify watcher loop in a blocking context.
fn run_watcher_loop(
    path: Utf8PathBuf,
    recursive: bool,
    event_tx: mpsc::Sender<FileEvent>,
    shutdown_rx: oneshot::Receiver<()>,
) -> Result<(), WatchError> {
    let tx = event_tx;
    let mut watcher =
        notify::recommended_watcher(move |res: Result<Event, notify::Error>| match res {
            Ok(event) => {
                let Event { kind, paths, .. } = event;
                let Some(mapped) = map_event_kind(&kind) else {
                    return;
                };

                for raw_path in paths {
                    let utf8_path = match Utf8PathBuf::try_from(raw_path) {
                        Ok(p) => p,
                        Err(e) => {
                            let invalid = e.into_path_buf();
                            tracing::warn!(
                                path = %invalid.display(),
                                "Skipping non-UTF-8 path in file event"
                            );
                            continue;
                        }
                    };

                    // Folder creations announce themselves in the kind;
                    // everything else needs a metadata check.
                    let is_directory = matches!(kind, EventKind::Create(CreateKind::Folder))
                        || utf8_path.is_dir();

                    let file_event = FileEvent::new(utf8_path, mapped, is_directory);

                    if tx.blocking_send(file_event).is_err() {
                        tracing::debug!("Event channel closed, stopping watcher");
                        return;
                    }
                }
            }
            Err(error) => {
                tracing::warn!(error = %error, "Watcher error");
            }
        })?;

    let mode = if recursive {
        RecursiveMode::Recursive
    } else {
        RecursiveMode::NonRecursive
    };

    watcher.watch(path.as_std_path(), mode)?;

    tracing::info!(path = %path, recursive, "File watcher started");

    // Block until shutdown; blocking_recv since this is a sync context
    let _ = shutdown_rx.blocking_recv();

    tracing::info!(path = %path, "File watcher stopped");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    fn create_temp_dir() -> TempDir {
        TempDir::new().expect("Failed to create temp directory")
    }

    #[tokio::test]
    async fn test_watcher_creation() {
        let temp_dir = create_temp_dir();
        let path = Utf8Path::from_path(temp_dir.path()).expect("Invalid path");

        let watcher = FileWatcher::new(path, true).await;

        assert!(watcher.is_ok());
        let watcher = watcher.expect("Watcher should be created");
        assert!(watcher.is_running());
    }

    #[tokio::test]
    async fn test_watcher_path_not_found() {
        let result = FileWatcher::new(Utf8Path::new("/nonexistent/watch/path"), true).await;

        match result {
            Err(WatchError::PathNotFound(_)) => {}
            other => panic!("Expected PathNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_watcher_shutdown() {
        let temp_dir = create_temp_dir();
        let path = Utf8Path::from_path(temp_dir.path()).expect("Invalid path");

        let watcher = FileWatcher::new(path, true)
            .await
            .expect("Failed to create watcher");

        assert!(watcher.shutdown().await.is_ok());
    }

    #[tokio::test]
    async fn test_watcher_receives_create_event() {
        let temp_dir = create_temp_dir();
        let path = Utf8Path::from_path(temp_dir.path()).expect("Invalid path");

        let mut watcher = FileWatcher::new(path, true)
            .await
            .expect("Failed to create watcher");

        let file_path = temp_dir.path().join("episode.mkv");
        fs::write(&file_path, "data").expect("Failed to write file");

        let event = tokio::time::timeout(Duration::from_secs(2), watcher.recv()).await;

        watcher.shutdown().await.expect("Shutdown failed");

        // Event delivery is timing-dependent; assert on content only when
        // one arrived.
        if let Ok(Some(event)) = event {
            assert!(event.path.as_str().contains("episode.mkv"));
            assert!(!event.is_directory);
        }
    }

    #[test]
    fn test_map_event_kind() {
        use notify::event::{AccessKind, ModifyKind, RemoveKind};

        assert_eq!(
            map_event_kind(&EventKind::Create(CreateKind::File)),
            Some(FileEventKind::Created)
        );
        assert_eq!(
            map_event_kind(&EventKind::Modify(ModifyKind::Any)),
            Some(FileEventKind::Modified)
        );
        assert_eq!(map_event_kind(&EventKind::Remove(RemoveKind::File)), None);
        assert_eq!(map_event_kind(&EventKind::Access(AccessKind::Any)), None);
    }
}
