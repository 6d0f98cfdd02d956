//! One-shot planning: filename in, classification + canonical name +
//! destination out.

use camino::Utf8PathBuf;
use ms_core::{Classification, LibraryConfig, RuleConfig};

use crate::classifier::Classifier;
use crate::matcher::RuleSet;
use crate::path::{canonical_name, Layout};
use crate::tokenizer::tokenize;

/// Everything the registry needs to track a newly observed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    /// The semantic classification of the filename.
    pub classification: Classification,

    /// Canonical display name (tag-truncated, lowercase) plus extension.
    pub canonical_name: String,

    /// Canonical destination path in the library layout.
    pub destination: Utf8PathBuf,
}

/// Combines [`Classifier`] and [`Layout`] so callers tokenize each
/// filename exactly once.
///
/// # Examples
///
/// ```
/// use ms_classify::Planner;
/// use ms_core::{Classification, LibraryConfig, RuleConfig};
/// use camino::Utf8PathBuf;
///
/// let mut library = LibraryConfig::default();
/// library.misc_dir = Utf8PathBuf::from("/library/misc");
///
/// let planner = Planner::new(&RuleConfig::default(), &library);
/// let plan = planner.plan("test.mp4");
///
/// assert_eq!(plan.classification, Classification::Misc);
/// assert_eq!(plan.destination.as_str(), "/library/misc/test.mp4");
/// ```
#[derive(Debug, Clone)]
pub struct Planner {
    classifier: Classifier,
    layout: Layout,
}

impl Planner {
    /// Builds a planner from the rule and library configuration.
    #[must_use]
    pub fn new(rules: &RuleConfig, library: &LibraryConfig) -> Self {
        Self {
            classifier: Classifier::new(rules),
            layout: Layout::new(library),
        }
    }

    /// Returns the underlying rule sets.
    #[inline]
    #[must_use]
    pub const fn rules(&self) -> &RuleSet {
        self.classifier.rules()
    }

    /// Plans a single filename: classification, canonical name, and
    /// destination, tokenizing once.
    #[must_use]
    pub fn plan(&self, filename: &str) -> Plan {
        let tokenized = tokenize(filename);
        let classification = self.classifier.classify_tokens(&tokenized);
        let name = canonical_name(&tokenized, self.classifier.rules());
        let destination =
            self.layout
                .destination(&classification, &name, tokenized.extension.as_deref());

        Plan {
            classification,
            canonical_name: name,
            destination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planner() -> Planner {
        Planner::new(
            &RuleConfig::default(),
            &LibraryConfig {
                movie_dir: Utf8PathBuf::from("/movie"),
                show_dir: Utf8PathBuf::from("/show"),
                misc_dir: Utf8PathBuf::from("/misc"),
                non_video_dir: Utf8PathBuf::from("/non_video"),
            },
        )
    }

    #[test]
    fn test_plan_movie() {
        let plan = planner().plan("Alien.1979.PROPER.REMASTERED.THEATRICAL.1080p.BluRay.x265-RARBG.mp4");
        assert_eq!(plan.canonical_name, "alien 1979.mp4");
        assert_eq!(
            plan.destination.as_str(),
            "/movie/Alien (1979)/Alien (1979).mp4"
        );
    }

    #[test]
    fn test_plan_show() {
        let plan = planner().plan("Stranger.Things.S01E01.1080p.BluRay.x265-RARBG.mp4");
        assert_eq!(plan.canonical_name, "stranger things s01e01.mp4");
        assert_eq!(
            plan.destination.as_str(),
            "/show/Stranger Things/Season 01/Stranger Things - s01e01.mp4"
        );
    }

    #[test]
    fn test_plan_non_video_keeps_canonical_name() {
        let plan = planner().plan("Alien.1979.PROPER.REMASTERED.THEATRICAL.1080p.BluRay.x265-RARBG.exe");
        assert_eq!(plan.canonical_name, "alien 1979.exe");
        assert_eq!(plan.destination.as_str(), "/non_video/alien 1979.exe");
        assert_eq!(plan.classification, Classification::NonVideo);
    }

    #[test]
    fn test_plan_misc_when_nothing_matches() {
        let plan = planner().plan("Alien.PROPER.REMASTERED.THEATRICAL.1080p.BluRay.x265-RARBG.mp4");
        assert_eq!(plan.canonical_name, "alien.mp4");
        assert_eq!(plan.destination.as_str(), "/misc/alien.mp4");
        assert_eq!(plan.classification, Classification::Misc);
    }
}
