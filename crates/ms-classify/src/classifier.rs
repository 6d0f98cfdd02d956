//! Filename classification.

use ms_core::{Classification, RuleConfig};

use crate::matcher::RuleSet;
use crate::tokenizer::{tokenize, Tokenized};

/// Classifies filenames into movie / show / misc / non-video.
///
/// Classification is total and deterministic: every filename produces
/// exactly one [`Classification`], malformed input included. Show
/// detection takes priority over movie detection — a filename carrying
/// both a year and a season/episode pattern classifies as a show.
///
/// Tag truncation is *not* part of classification; it only shapes the
/// canonical display name (see [`canonical_name`](crate::path::canonical_name)).
/// A year appearing after a release tag therefore still classifies the
/// file as a movie.
///
/// # Examples
///
/// ```
/// use ms_classify::Classifier;
/// use ms_core::{Classification, RuleConfig};
///
/// let classifier = Classifier::new(&RuleConfig::default());
///
/// let c = classifier.classify("Stranger.Things.S01E01.1080p.mp4");
/// assert_eq!(
///     c,
///     Classification::Show {
///         title: "Stranger Things".to_owned(),
///         season: "s01".to_owned(),
///         episode: "e01".to_owned(),
///     }
/// );
///
/// assert_eq!(classifier.classify("readme.txt"), Classification::NonVideo);
/// assert_eq!(classifier.classify("test.mp4"), Classification::Misc);
/// ```
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: RuleSet,
}

impl Classifier {
    /// Builds a classifier from the configured rules.
    #[must_use]
    pub fn new(config: &RuleConfig) -> Self {
        Self {
            rules: RuleSet::new(config),
        }
    }

    /// Returns the underlying rule sets.
    #[inline]
    #[must_use]
    pub const fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Classifies a filename.
    #[must_use]
    pub fn classify(&self, filename: &str) -> Classification {
        self.classify_tokens(&tokenize(filename))
    }

    /// Classifies an already-tokenized filename.
    ///
    /// Useful when the caller also needs the tokens for name formatting
    /// and wants to tokenize only once.
    #[must_use]
    pub fn classify_tokens(&self, tokenized: &Tokenized) -> Classification {
        let is_video = tokenized
            .extension
            .as_deref()
            .is_some_and(|ext| self.rules.is_video_extension(ext));
        if !is_video {
            return Classification::NonVideo;
        }

        if let Some(info) = self.rules.find_episode_info(&tokenized.tokens) {
            return Classification::Show {
                title: title_case(&tokenized.tokens[..info.season_index]),
                season: info.season,
                episode: info.episode,
            };
        }

        if let Some(found) = self.rules.find_year(&tokenized.tokens) {
            return Classification::Movie {
                title: title_case(&tokenized.tokens[..found.index]),
                year: found.year,
            };
        }

        Classification::Misc
    }
}

/// Title-cases a token slice: first character of each token uppercased,
/// the rest lowercased, tokens joined by single spaces.
///
/// An empty slice yields an empty title — permitted (the marker token was
/// the first meaningful token in the filename).
#[must_use]
pub fn title_case(tokens: &[String]) -> String {
    let mut title = String::new();
    for token in tokens {
        if !title.is_empty() {
            title.push(' ');
        }
        let mut chars = token.chars();
        if let Some(first) = chars.next() {
            title.extend(first.to_uppercase());
            title.push_str(chars.as_str().to_lowercase().as_str());
        }
    }
    title
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> Classifier {
        Classifier::new(&RuleConfig::default())
    }

    #[test]
    fn test_movie_classification() {
        let c = classifier().classify("Alien.1979.PROPER.REMASTERED.1080p.mp4");
        assert_eq!(
            c,
            Classification::Movie {
                title: "Alien".to_owned(),
                year: "1979".to_owned(),
            }
        );
    }

    #[test]
    fn test_show_classification() {
        let c = classifier().classify("Stranger.Things.S01E01.1080p.BluRay.x265-RARBG.mp4");
        assert_eq!(
            c,
            Classification::Show {
                title: "Stranger Things".to_owned(),
                season: "s01".to_owned(),
                episode: "e01".to_owned(),
            }
        );
    }

    #[test]
    fn test_show_beats_movie_when_both_match() {
        // Year and episode markers in the same name: show wins
        let c = classifier().classify("The.Expanse.2015.S02E05.720p.mkv");
        assert_eq!(
            c,
            Classification::Show {
                title: "The Expanse 2015".to_owned(),
                season: "s02".to_owned(),
                episode: "e05".to_owned(),
            }
        );
    }

    #[test]
    fn test_misc_when_no_pattern_matches() {
        assert_eq!(classifier().classify("test.mp4"), Classification::Misc);
    }

    #[test]
    fn test_non_video_extension() {
        assert_eq!(classifier().classify("readme.txt"), Classification::NonVideo);
        assert_eq!(classifier().classify("Makefile"), Classification::NonVideo);
    }

    #[test]
    fn test_year_as_first_meaningful_token_gives_empty_title() {
        // The first token is never a year candidate, so the year must sit
        // later; an empty title only arises for the show path here.
        let c = classifier().classify("s01e01.mp4");
        assert_eq!(
            c,
            Classification::Show {
                title: String::new(),
                season: "s01".to_owned(),
                episode: "e01".to_owned(),
            }
        );
    }

    #[test]
    fn test_classification_is_total_on_odd_input() {
        let classifier = classifier();
        for name in ["", ".", "...", "???.mp4", ".mp4", "    .mkv"] {
            // Must not panic; must produce exactly one variant
            let _ = classifier.classify(name);
        }
    }

    #[test]
    fn test_title_case() {
        let tokens: Vec<String> = ["stranger", "THINGS"].map(String::from).to_vec();
        assert_eq!(title_case(&tokens), "Stranger Things");
        assert_eq!(title_case(&[]), "");
    }
}
