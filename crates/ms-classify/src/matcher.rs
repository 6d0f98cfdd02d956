//! Tag, year, and season/episode pattern matching over token sequences.
//!
//! All matching operates on the lowercased view of the tokens produced by
//! [`tokenize`](crate::tokenizer::tokenize) and is a short-circuiting
//! linear scan with explicit index tracking — the patterns here are
//! fixed-width (`1979`, `s01`, `e01`, `s01e01`), so set membership plus
//! character-class checks cover the whole grammar.

use ms_core::{FxHashSet, RuleConfig};

/// Immutable membership sets built once from [`RuleConfig`].
///
/// Entries are lowercased at construction so every later membership test
/// is a single hash lookup on an already-lowercased token.
///
/// # Examples
///
/// ```
/// use ms_classify::RuleSet;
/// use ms_core::RuleConfig;
///
/// let rules = RuleSet::new(&RuleConfig::default());
/// assert!(rules.is_tag("1080p"));
/// assert!(rules.is_tag("RARBG"));
/// assert!(rules.is_video_extension("MKV"));
/// assert!(rules.is_deletable_extension("txt"));
/// assert!(!rules.is_tag("alien"));
/// ```
#[derive(Debug, Clone)]
pub struct RuleSet {
    tags: FxHashSet<String>,
    video_extensions: FxHashSet<String>,
    deletable_extensions: FxHashSet<String>,
}

/// A year token located within a token sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearMatch {
    /// The four digits, as found.
    pub year: String,
    /// Index of the year token within the sequence.
    pub index: usize,
}

/// Season/episode markers located within a token sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeInfo {
    /// Lowercase season marker, `sNN`.
    pub season: String,
    /// Lowercase episode marker, `eNN`.
    pub episode: String,
    /// Index of the token the season marker came from. For the combined
    /// `sNNeNN` form this is the combined token's index.
    pub season_index: usize,
}

impl RuleSet {
    /// Builds the rule sets from configuration, lowercasing every entry.
    #[must_use]
    pub fn new(config: &RuleConfig) -> Self {
        fn to_set(entries: &[String]) -> FxHashSet<String> {
            entries.iter().map(|e| e.to_ascii_lowercase()).collect()
        }

        Self {
            tags: to_set(&config.tags),
            video_extensions: to_set(&config.video_extensions),
            deletable_extensions: to_set(&config.deletable_extensions),
        }
    }

    /// Returns `true` if `token` is a configured release tag.
    #[inline]
    #[must_use]
    pub fn is_tag(&self, token: &str) -> bool {
        self.tags.contains(&token.to_ascii_lowercase())
    }

    /// Returns `true` if `ext` is a configured video extension.
    #[inline]
    #[must_use]
    pub fn is_video_extension(&self, ext: &str) -> bool {
        self.video_extensions.contains(&ext.to_ascii_lowercase())
    }

    /// Returns `true` if files with extension `ext` are deleted in place
    /// rather than relocated.
    #[inline]
    #[must_use]
    pub fn is_deletable_extension(&self, ext: &str) -> bool {
        self.deletable_extensions
            .contains(&ext.to_ascii_lowercase())
    }

    /// Scans for the first plausible release year.
    ///
    /// The first token is skipped — it is assumed to be part of the title
    /// and never a year. A candidate must be exactly four ASCII digits and
    /// must not itself be a recognized tag (guards against 4-digit
    /// resolution tags such as `2160` being misread as a year).
    #[must_use]
    pub fn find_year(&self, tokens: &[String]) -> Option<YearMatch> {
        for (index, token) in tokens.iter().enumerate().skip(1) {
            let lower = token.to_ascii_lowercase();
            if lower.len() == 4
                && lower.bytes().all(|b| b.is_ascii_digit())
                && !self.tags.contains(&lower)
            {
                return Some(YearMatch { year: lower, index });
            }
        }
        None
    }

    /// Scans for season/episode markers in a single left-to-right pass.
    ///
    /// A 6-character combined `sNNeNN` token wins immediately. Otherwise
    /// 3-character `sNN` and `eNN` tokens are collected (a later sighting
    /// overwrites an earlier one) and the pair is returned the moment both
    /// have been seen. A lone season or lone episode marker is not a
    /// match.
    #[must_use]
    pub fn find_episode_info(&self, tokens: &[String]) -> Option<EpisodeInfo> {
        let mut season: Option<(String, usize)> = None;
        let mut episode: Option<String> = None;

        for (index, token) in tokens.iter().enumerate() {
            let lower = token.to_ascii_lowercase();
            let bytes = lower.as_bytes();
            match bytes.len() {
                3 => {
                    if bytes[1].is_ascii_digit() && bytes[2].is_ascii_digit() {
                        if bytes[0] == b's' {
                            season = Some((lower, index));
                        } else if bytes[0] == b'e' {
                            episode = Some(lower);
                        }
                    }
                    if let (Some((s, s_index)), Some(e)) = (&season, &episode) {
                        return Some(EpisodeInfo {
                            season: s.clone(),
                            episode: e.clone(),
                            season_index: *s_index,
                        });
                    }
                }
                6 => {
                    if bytes[0] == b's'
                        && bytes[1].is_ascii_digit()
                        && bytes[2].is_ascii_digit()
                        && bytes[3] == b'e'
                        && bytes[4].is_ascii_digit()
                        && bytes[5].is_ascii_digit()
                    {
                        return Some(EpisodeInfo {
                            season: lower[..3].to_owned(),
                            episode: lower[3..].to_owned(),
                            season_index: index,
                        });
                    }
                }
                _ => {}
            }
        }

        None
    }
}
