//! Configuration structures for the mediasort daemon.
//!
//! This module provides configuration types for all components of the
//! application:
//!
//! - [`RuleConfig`] - Classification rules (extensions, release tags)
//! - [`LibraryConfig`] - Destination roots for the library layout
//! - [`WatchConfig`] - Watch directory, quiet period, and tick settings
//! - [`Config`] - Root configuration combining all settings
//!
//! All configuration types implement [`Default`] with values matching a
//! typical torrent-drop / Plex-style library setup, and deserialize with
//! `#[serde(default)]` so a partial JSON file only overrides what it names.
//!
//! Configuration is an explicit value passed by reference into each
//! component's constructor; nothing in the workspace reads ambient global
//! state.

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// Classification rules: which extensions are video, which files are
/// debris to delete, and which tokens mark the end of a title.
///
/// All membership checks performed against these lists are
/// case-insensitive; entries are lower-cased when the rule sets are built.
///
/// # Examples
///
/// ```
/// use ms_core::RuleConfig;
///
/// let rules = RuleConfig::default();
/// assert!(rules.video_extensions.iter().any(|e| e == "mkv"));
/// assert!(rules.deletable_extensions.iter().any(|e| e == "txt"));
/// assert!(rules.tags.iter().any(|t| t == "1080p"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// File extensions treated as video (without the leading dot).
    pub video_extensions: Vec<String>,

    /// File extensions deleted in place instead of relocated.
    ///
    /// These model sidecar debris such as stray `.txt` notes or partial
    /// download remnants.
    pub deletable_extensions: Vec<String>,

    /// Release tags (resolution, codec, group conventions) that signal
    /// "the title has ended" in a filename.
    ///
    /// An empty list is accepted: no truncation ever occurs and titles are
    /// never shortened.
    pub tags: Vec<String>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            video_extensions: [
                "mkv", "mp4", "mov", "avi", "wmv", "flv", "webm", "vob", "ogv", "ogg", "drc",
                "mng", "mts", "m2ts", "ts", "3gp", "m4v", "mpg", "mpeg", "f4v", "f4p", "f4a",
                "f4b",
            ]
            .map(String::from)
            .to_vec(),
            deletable_extensions: ["txt", "exe", "parts"].map(String::from).to_vec(),
            tags: [
                "av1", "x264", "hdtv", "bluray", "bdrip", "dvdrip", "brrip", "4k", "2160",
                "2160p", "1080", "1080p", "720", "720p", "webrip", "amzn", "h264", "hevc", "h",
                "264", "265", "h265", "proper", "remastered", "theatrical", "rarbg",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

/// Destination roots for the canonical library layout.
///
/// Each classification variant maps to exactly one of these directories;
/// the path templates themselves live in `ms-classify`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Root for `Movie` destinations (`{movie_dir}/Title (Year)/...`).
    pub movie_dir: Utf8PathBuf,

    /// Root for `Show` destinations (`{show_dir}/Title/Season NN/...`).
    pub show_dir: Utf8PathBuf,

    /// Root for video files that match neither pattern.
    pub misc_dir: Utf8PathBuf,

    /// Root for files whose extension is not in the video set.
    pub non_video_dir: Utf8PathBuf,
}

impl LibraryConfig {
    /// Returns all four destination roots.
    #[must_use]
    pub fn roots(&self) -> [&Utf8PathBuf; 4] {
        [
            &self.movie_dir,
            &self.show_dir,
            &self.misc_dir,
            &self.non_video_dir,
        ]
    }
}

/// Configuration for the watch/reconciliation loop.
///
/// # Examples
///
/// ```
/// use ms_core::WatchConfig;
///
/// let config = WatchConfig::default();
/// assert_eq!(config.quiet_period_secs, 60);
/// assert_eq!(config.tick_interval_ms, 1000);
/// assert!(config.recursive);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Directory watched for new and changed files.
    pub watch_dir: Utf8PathBuf,

    /// Minimum seconds since the last modification before a tracked file
    /// is considered stable enough to act on.
    pub quiet_period_secs: u64,

    /// Interval between reconciliation passes, in milliseconds.
    pub tick_interval_ms: u64,

    /// Whether to watch subdirectories recursively.
    pub recursive: bool,

    /// How many times to re-check for missing required directories at
    /// startup before giving up.
    pub startup_max_attempts: u32,

    /// Seconds to wait between startup directory re-checks.
    pub startup_backoff_secs: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            watch_dir: Utf8PathBuf::new(),
            quiet_period_secs: 60,
            tick_interval_ms: 1000,
            recursive: true,
            startup_max_attempts: 10,
            startup_backoff_secs: 10,
        }
    }
}

/// Root configuration for the mediasort daemon.
///
/// # Examples
///
/// ```
/// use ms_core::Config;
///
/// let config = Config::default();
/// let json = serde_json::to_string_pretty(&config).unwrap();
/// let parsed: Config = serde_json::from_str(&json).unwrap();
/// assert_eq!(config, parsed);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Classification rules.
    pub rules: RuleConfig,

    /// Destination library layout.
    pub library: LibraryConfig,

    /// Watch loop settings.
    pub watch: WatchConfig,
}

impl Config {
    /// Returns every directory that must exist before the daemon can start:
    /// the watch root and all four destination roots.
    #[must_use]
    pub fn required_directories(&self) -> Vec<&Utf8PathBuf> {
        let mut dirs = vec![&self.watch.watch_dir];
        dirs.extend(self.library.roots());
        dirs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_config_defaults() {
        let rules = RuleConfig::default();
        assert!(rules.video_extensions.iter().any(|e| e == "mp4"));
        assert!(rules.video_extensions.iter().any(|e| e == "m2ts"));
        assert_eq!(rules.deletable_extensions, vec!["txt", "exe", "parts"]);
        assert!(rules.tags.iter().any(|t| t == "rarbg"));
    }

    #[test]
    fn test_watch_config_defaults() {
        let config = WatchConfig::default();
        assert_eq!(config.quiet_period_secs, 60);
        assert_eq!(config.tick_interval_ms, 1000);
        assert!(config.recursive);
        assert_eq!(config.startup_max_attempts, 10);
        assert_eq!(config.startup_backoff_secs, 10);
    }

    #[test]
    fn test_required_directories() {
        let mut config = Config::default();
        config.watch.watch_dir = Utf8PathBuf::from("/watch");
        config.library.movie_dir = Utf8PathBuf::from("/movies");
        config.library.show_dir = Utf8PathBuf::from("/shows");
        config.library.misc_dir = Utf8PathBuf::from("/misc");
        config.library.non_video_dir = Utf8PathBuf::from("/other");

        let dirs = config.required_directories();
        assert_eq!(dirs.len(), 5);
        assert_eq!(dirs[0].as_str(), "/watch");
    }

    #[test]
    fn test_config_deserialize_with_missing_fields() {
        let json = r#"{"watch": {"quiet_period_secs": 5}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.watch.quiet_period_secs, 5);
        // Other fields fall back to defaults
        assert_eq!(config.watch.tick_interval_ms, 1000);
        assert!(config.rules.video_extensions.iter().any(|e| e == "mkv"));
    }

    #[test]
    fn test_config_serialization_round_trip() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(config, parsed);
    }
}
