//! Core types, configuration, and errors for the mediasort daemon.
//!
//! This crate provides the foundational pieces shared across the workspace:
//!
//! - [`Config`] and its component configurations ([`RuleConfig`],
//!   [`LibraryConfig`], [`WatchConfig`])
//! - [`ConfigError`] for configuration failures
//! - Domain types ([`Classification`], [`TrackedFile`])
//! - Type aliases for `FxHashMap`/`FxHashSet` (faster than std for the
//!   string-keyed maps used throughout)
//!
//! # Crate Dependencies
//!
//! ```text
//! ms-cli ──► ms-daemon ──► ms-classify ──► ms-core
//!                     ├──► ms-watcher
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod hash;
pub mod types;

// Re-export configuration types
pub use config::{Config, LibraryConfig, RuleConfig, WatchConfig};

// Re-export error types
pub use error::ConfigError;

// Re-export hash aliases
pub use hash::{FxBuildHasher, FxHashMap, FxHashSet};

// Re-export domain types
pub use types::{Classification, TrackedFile};
