//! Filename tokenization.
//!
//! Release-style filenames use either whitespace or dots as word
//! separators (`Alien.1979.PROPER.mp4` vs `Alien 1979 PROPER.mp4`). The
//! tokenizer picks the divider per filename, strips every token down to
//! its ASCII alphanumerics, and splits off the extension.

use smallvec::SmallVec;

/// Token storage: release names rarely exceed 16 meaningful words.
pub type TokenVec = SmallVec<[String; 16]>;

/// The result of tokenizing a filename.
///
/// Tokens keep their original case for display purposes; matching always
/// happens on an ASCII-lowercased view (see
/// [`RuleSet`](crate::matcher::RuleSet)).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenized {
    /// Ordered alphanumeric fragments of the name portion.
    pub tokens: TokenVec,

    /// Everything after the last `.`, unaltered. `None` when the filename
    /// has no dot at all (not an error).
    pub extension: Option<String>,
}

impl Tokenized {
    /// Returns the tokens lowercased for matching.
    #[must_use]
    pub fn lowercase_tokens(&self) -> TokenVec {
        self.tokens
            .iter()
            .map(|t| t.to_ascii_lowercase())
            .collect()
    }
}

/// Splits a filename into its name portion and extension.
///
/// The extension is the substring after the last `.`; a filename without a
/// dot has no extension.
#[must_use]
pub fn split_extension(filename: &str) -> (&str, Option<&str>) {
    match filename.rsplit_once('.') {
        Some((name, ext)) => (name, Some(ext)),
        None => (filename, None),
    }
}

/// Tokenizes a filename into ordered alphanumeric tokens plus an optional
/// extension.
///
/// The divider is chosen per filename: when splitting the name portion on
/// whitespace yields fewer pieces than splitting on `.`, dots are the word
/// separators; otherwise whitespace is. Each piece is then reduced to its
/// ASCII alphanumeric characters, and pieces that end up empty are dropped
/// (they carry no classification signal).
///
/// Tokenizing is deterministic and locale-independent: only ASCII
/// alphanumeric tests are used.
///
/// # Examples
///
/// ```
/// use ms_classify::tokenize;
///
/// let t = tokenize("Alien.1979.PROPER.REMASTERED.1080p.mp4");
/// assert_eq!(t.tokens.as_slice(), ["Alien", "1979", "PROPER", "REMASTERED", "1080p"]);
/// assert_eq!(t.extension.as_deref(), Some("mp4"));
///
/// let t = tokenize("Alien 1979 [x265-GROUP].mkv");
/// assert_eq!(t.tokens.as_slice(), ["Alien", "1979", "x265GROUP"]);
/// ```
#[must_use]
pub fn tokenize(filename: &str) -> Tokenized {
    let (name, extension) = split_extension(filename);

    let whitespace_pieces = name.split_whitespace().count();
    let dot_pieces = name.split('.').count();

    let tokens: TokenVec = if whitespace_pieces < dot_pieces {
        collect_tokens(name.split('.'))
    } else {
        collect_tokens(name.split_whitespace())
    };

    Tokenized {
        tokens,
        extension: extension.map(ToOwned::to_owned),
    }
}

/// Strips each piece to its ASCII alphanumerics, dropping empty results.
fn collect_tokens<'a>(pieces: impl Iterator<Item = &'a str>) -> TokenVec {
    pieces
        .map(|piece| {
            piece
                .chars()
                .filter(char::is_ascii_alphanumeric)
                .collect::<String>()
        })
        .filter(|token| !token.is_empty())
        .collect()
}
