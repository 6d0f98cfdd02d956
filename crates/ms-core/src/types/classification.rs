//! Classification of a media filename.

use serde::{Deserialize, Serialize};

/// The semantic classification of a single filename.
///
/// Classification is a pure function of the filename and the configured
/// rule sets: exactly one variant is produced per filename, with the fields
/// needed to name it in the library layout. There is no error variant — a
/// filename that matches neither the movie nor the show pattern is the
/// defined [`Misc`](Classification::Misc) outcome.
///
/// # Examples
///
/// ```
/// use ms_core::Classification;
///
/// let show = Classification::Show {
///     title: "Stranger Things".to_owned(),
///     season: "s01".to_owned(),
///     episode: "e01".to_owned(),
/// };
/// assert!(show.is_video());
/// assert_eq!(show.label(), "show");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classification {
    /// A movie: a video filename carrying a plausible release year.
    Movie {
        /// Title-cased movie title (may be empty when the year is the
        /// first meaningful token).
        title: String,
        /// Four-digit release year, as it appeared in the filename.
        year: String,
    },

    /// A TV episode: a video filename carrying season/episode markers.
    ///
    /// Show detection takes priority over movie detection when a filename
    /// carries both a year and a season/episode pattern.
    Show {
        /// Title-cased show title (may be empty).
        title: String,
        /// Lowercase season marker, `sNN`.
        season: String,
        /// Lowercase episode marker, `eNN`.
        episode: String,
    },

    /// A video file matching neither the movie nor the show pattern.
    Misc,

    /// A file whose extension is not in the video extension set.
    NonVideo,
}

impl Classification {
    /// Returns `true` for the three video variants.
    #[inline]
    #[must_use]
    pub const fn is_video(&self) -> bool {
        !matches!(self, Self::NonVideo)
    }

    /// Short lowercase label for logs and reports.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Movie { .. } => "movie",
            Self::Show { .. } => "show",
            Self::Misc => "misc",
            Self::NonVideo => "non-video",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_video() {
        let movie = Classification::Movie {
            title: "Alien".to_owned(),
            year: "1979".to_owned(),
        };
        assert!(movie.is_video());
        assert!(Classification::Misc.is_video());
        assert!(!Classification::NonVideo.is_video());
    }

    #[test]
    fn test_labels() {
        assert_eq!(Classification::Misc.label(), "misc");
        assert_eq!(Classification::NonVideo.label(), "non-video");
    }

    #[test]
    fn test_serialization_tagging() {
        let show = Classification::Show {
            title: "Stranger Things".to_owned(),
            season: "s01".to_owned(),
            episode: "e01".to_owned(),
        };
        let json = serde_json::to_string(&show).unwrap();
        assert!(json.contains(r#""kind":"show""#));

        let parsed: Classification = serde_json::from_str(&json).unwrap();
        assert_eq!(show, parsed);
    }
}
