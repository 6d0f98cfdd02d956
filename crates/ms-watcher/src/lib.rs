//! Filesystem event bridge from `notify` to the tokio runtime.
//!
//! This crate delivers raw `Created`/`Modified` events from the operating
//! system's change-notification mechanism to async consumers. It does
//! **not** debounce: the daemon's quiet-period state machine is the
//! debouncer, and it needs every modification event to reset its timers,
//! along with the event kind and the is-directory flag that a coalescing
//! layer would erase.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │               Blocking Thread (spawn_blocking)             │
//! │  ┌───────────────────┐    ┌──────────────────────────┐     │
//! │  │ RecommendedWatcher│ -> │ kind mapping + UTF-8     │     │
//! │  │ (notify)          │    │ conversion (callback)    │     │
//! │  └───────────────────┘    └───────────┬──────────────┘     │
//! └───────────────────────────────────────│────────────────────┘
//!                            blocking_send│
//!                                         ▼
//! ┌────────────────────────────────────────────────────────────┐
//! │               Async Runtime (tokio)                        │
//! │  ┌───────────────────┐    ┌────────────────┐               │
//! │  │ FileWatcher       │    │ mpsc::Receiver │ -> Daemon     │
//! │  │ (shutdown ctrl)   │    │ (events)       │    select loop│
//! │  └───────────────────┘    └────────────────┘               │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use ms_watcher::FileWatcher;
//! use camino::Utf8Path;
//!
//! # async fn example() -> Result<(), ms_watcher::WatchError> {
//! let mut watcher = FileWatcher::new(Utf8Path::new("/downloads"), true).await?;
//!
//! while let Some(event) = watcher.recv().await {
//!     if event.is_directory {
//!         continue;
//!     }
//!     println!("{:?}: {}", event.kind, event.path);
//! }
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod error;
pub mod events;
pub mod watcher;

// Re-export error types
pub use error::WatchError;

// Re-export event types
pub use events::{FileEvent, FileEventKind};

// Re-export watcher types
pub use watcher::FileWatcher;
