//! Tracked-file registry, reconciliation loop, and janitor for mediasort.
//!
//! This crate is the lifecycle engine of the daemon: it decides *when* and
//! *how* a discovered file is finally moved, deleted, or left alone.
//!
//! # Overview
//!
//! - [`Registry`]: the authoritative set of files being watched for
//!   quiescence, keyed by source path, behind one mutex.
//! - [`Reconciler`]: the fixed-interval pass that takes quiet entries out
//!   of the registry and relocates or deletes them on the blocking pool.
//! - [`janitor`]: prunes directory subtrees left empty by those actions.
//! - [`LibraryWalker`]: the one-shot startup scan for files that arrived
//!   while the daemon was down.
//! - [`Daemon`]: ties the watcher event stream and the tick together in a
//!   `tokio::select!` loop.
//!
//! # State machine
//!
//! ```text
//! Discovered ──register──► Watching ──quiet period──► Quiet
//!                             ▲                         │
//!                             └──────touch──────────────┤
//!                                                       ▼
//!                                        { Relocated | Deleted }
//!                                           (entry removed)
//! ```
//!
//! # Example
//!
//! ```no_run
//! use ms_core::Config;
//! use ms_daemon::Daemon;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ms_daemon::DaemonError> {
//!     let config = Config::default();
//!     Daemon::new(config).run().await
//! }
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod daemon;
pub mod error;
pub mod janitor;
pub mod reconciler;
pub mod registry;
pub mod scanner;
pub mod startup;

// Re-export the main entry points
pub use daemon::Daemon;
pub use error::DaemonError;
pub use reconciler::{Outcome, Reconciler, TickSummary};
pub use registry::Registry;
pub use scanner::LibraryWalker;
pub use startup::wait_for_directories;
