//! Pure filename classification and canonical path synthesis.
//!
//! This crate turns a release-style filename into a semantic
//! [`Classification`](ms_core::Classification) and a canonical destination
//! path, with no I/O anywhere: every function is a deterministic, total
//! computation over the filename string and the configured rule sets.
//!
//! # Pipeline
//!
//! ```text
//! "Stranger.Things.S01E01.1080p.BluRay.mp4"
//!        │ tokenize
//!        ▼
//! [Stranger, Things, S01E01, 1080p, BluRay] + ext "mp4"
//!        │ RuleSet::find_episode_info / find_year
//!        ▼
//! Show { title: "Stranger Things", season: "s01", episode: "e01" }
//!        │ Layout::destination
//!        ▼
//! {show_dir}/Stranger Things/Season 01/Stranger Things - s01e01.mp4
//! ```
//!
//! # Example
//!
//! ```
//! use ms_classify::Planner;
//! use ms_core::{LibraryConfig, RuleConfig};
//! use camino::Utf8PathBuf;
//!
//! let rules = RuleConfig::default();
//! let mut library = LibraryConfig::default();
//! library.movie_dir = Utf8PathBuf::from("/library/movies");
//!
//! let planner = Planner::new(&rules, &library);
//! let plan = planner.plan("Alien.1979.PROPER.1080p.mp4");
//!
//! assert_eq!(plan.canonical_name, "alien 1979.mp4");
//! assert_eq!(
//!     plan.destination.as_str(),
//!     "/library/movies/Alien (1979)/Alien (1979).mp4"
//! );
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod classifier;
pub mod matcher;
pub mod path;
pub mod planner;
pub mod tokenizer;

// Re-export the main entry points
pub use classifier::Classifier;
pub use matcher::{EpisodeInfo, RuleSet, YearMatch};
pub use path::{canonical_name, Layout};
pub use planner::{Plan, Planner};
pub use tokenizer::{tokenize, Tokenized};
