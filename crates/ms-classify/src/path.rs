//! Canonical name formatting and destination path synthesis.
//!
//! Everything here is pure string/path composition: no existence checks,
//! no I/O. The library layout follows the usual media-server conventions:
//!
//! ```text
//! {movie_dir}/Title (Year)/Title (Year).ext
//! {show_dir}/Title/Season NN/Title - sNNeNN.ext
//! {misc_dir}/canonical name.ext
//! {non_video_dir}/canonical name.ext
//! ```

use camino::Utf8PathBuf;
use ms_core::{Classification, LibraryConfig};

use crate::matcher::RuleSet;
use crate::tokenizer::Tokenized;

/// Formats the canonical display name for a tokenized filename.
///
/// Tokens are lowercased, truncated at (and excluding) the first token
/// recognized as a tag, joined with single spaces, and the original
/// extension is re-appended with its dot. This truncation — not the
/// classification title — is what strips release-group and quality noise
/// from the visible name.
///
/// # Examples
///
/// ```
/// use ms_classify::{canonical_name, tokenize, RuleSet};
/// use ms_core::RuleConfig;
///
/// let rules = RuleSet::new(&RuleConfig::default());
/// let t = tokenize("Alien.1979.PROPER.REMASTERED.1080p.mp4");
/// assert_eq!(canonical_name(&t, &rules), "alien 1979.mp4");
/// ```
#[must_use]
pub fn canonical_name(tokenized: &Tokenized, rules: &RuleSet) -> String {
    let mut name = String::new();
    for token in &tokenized.tokens {
        let lower = token.to_ascii_lowercase();
        if rules.is_tag(&lower) {
            break;
        }
        if !name.is_empty() {
            name.push(' ');
        }
        name.push_str(&lower);
    }

    if let Some(ext) = &tokenized.extension {
        name.push('.');
        name.push_str(ext);
    }
    name
}

/// Synthesizes destination paths for classified files.
///
/// Owns a copy of the destination roots; `destination` is the only
/// operation.
///
/// # Examples
///
/// ```
/// use ms_classify::{Classifier, Layout, canonical_name, tokenize};
/// use ms_core::{LibraryConfig, RuleConfig};
/// use camino::Utf8PathBuf;
///
/// let rules = RuleConfig::default();
/// let mut library = LibraryConfig::default();
/// library.show_dir = Utf8PathBuf::from("/library/shows");
///
/// let classifier = Classifier::new(&rules);
/// let layout = Layout::new(&library);
///
/// let filename = "Stranger.Things.S01E01.1080p.mp4";
/// let tokenized = tokenize(filename);
/// let classification = classifier.classify_tokens(&tokenized);
/// let name = canonical_name(&tokenized, classifier.rules());
///
/// let dest = layout.destination(&classification, &name, tokenized.extension.as_deref());
/// assert_eq!(
///     dest.as_str(),
///     "/library/shows/Stranger Things/Season 01/Stranger Things - s01e01.mp4"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Layout {
    library: LibraryConfig,
}

impl Layout {
    /// Builds a layout over the configured destination roots.
    #[must_use]
    pub fn new(library: &LibraryConfig) -> Self {
        Self {
            library: library.clone(),
        }
    }

    /// Computes the canonical destination path for a classification.
    ///
    /// `canonical_name` and `extension` come from the same tokenization
    /// that produced the classification. Degenerate inputs (empty titles)
    /// still produce a path; nothing here fails.
    #[must_use]
    pub fn destination(
        &self,
        classification: &Classification,
        canonical_name: &str,
        extension: Option<&str>,
    ) -> Utf8PathBuf {
        let dot_ext = extension.map(|e| format!(".{e}")).unwrap_or_default();

        match classification {
            Classification::Movie { title, year } => {
                let folder = format!("{title} ({year})");
                let file = format!("{folder}{dot_ext}");
                self.library.movie_dir.join(folder).join(file)
            }
            Classification::Show {
                title,
                season,
                episode,
            } => {
                let season_number = season.strip_prefix('s').unwrap_or(season);
                let file = format!("{title} - {season}{episode}{dot_ext}");
                self.library
                    .show_dir
                    .join(title)
                    .join(format!("Season {season_number}"))
                    .join(file)
            }
            Classification::Misc => self.library.misc_dir.join(canonical_name),
            Classification::NonVideo => self.library.non_video_dir.join(canonical_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;
    use ms_core::RuleConfig;

    fn rules() -> RuleSet {
        RuleSet::new(&RuleConfig::default())
    }

    fn layout() -> Layout {
        Layout::new(&LibraryConfig {
            movie_dir: Utf8PathBuf::from("/movie"),
            show_dir: Utf8PathBuf::from("/show"),
            misc_dir: Utf8PathBuf::from("/misc"),
            non_video_dir: Utf8PathBuf::from("/non_video"),
        })
    }

    #[test]
    fn test_canonical_name_truncates_at_first_tag() {
        let t = tokenize("Alien.1979.PROPER.REMASTERED.THEATRICAL.1080p.BluRay.x265-RARBG.mp4");
        assert_eq!(canonical_name(&t, &rules()), "alien 1979.mp4");
    }

    #[test]
    fn test_canonical_name_without_tags() {
        let t = tokenize("Stranger.Things.S01E01.mp4");
        assert_eq!(canonical_name(&t, &rules()), "stranger things s01e01.mp4");
    }

    #[test]
    fn test_canonical_name_empty_tag_set_never_truncates() {
        let empty = RuleSet::new(&RuleConfig {
            tags: Vec::new(),
            ..RuleConfig::default()
        });
        let t = tokenize("Alien.1979.PROPER.mp4");
        assert_eq!(canonical_name(&t, &empty), "alien 1979 proper.mp4");
    }

    #[test]
    fn test_canonical_name_no_extension() {
        let t = tokenize("some file");
        assert_eq!(canonical_name(&t, &rules()), "some file");
    }

    #[test]
    fn test_movie_destination() {
        let dest = layout().destination(
            &Classification::Movie {
                title: "Alien".to_owned(),
                year: "1979".to_owned(),
            },
            "alien 1979.mp4",
            Some("mp4"),
        );
        assert_eq!(dest.as_str(), "/movie/Alien (1979)/Alien (1979).mp4");
    }

    #[test]
    fn test_show_destination() {
        let dest = layout().destination(
            &Classification::Show {
                title: "Stranger Things".to_owned(),
                season: "s01".to_owned(),
                episode: "e01".to_owned(),
            },
            "stranger things s01e01.mp4",
            Some("mp4"),
        );
        assert_eq!(
            dest.as_str(),
            "/show/Stranger Things/Season 01/Stranger Things - s01e01.mp4"
        );
    }

    #[test]
    fn test_misc_destination_uses_canonical_name() {
        let dest = layout().destination(&Classification::Misc, "test.mp4", Some("mp4"));
        assert_eq!(dest.as_str(), "/misc/test.mp4");
    }

    #[test]
    fn test_non_video_destination_uses_canonical_name() {
        let dest = layout().destination(
            &Classification::NonVideo,
            "alien 1979.exe",
            Some("exe"),
        );
        assert_eq!(dest.as_str(), "/non_video/alien 1979.exe");
    }
}
