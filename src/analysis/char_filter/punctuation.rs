//! Punctuation removal char filter.
//!
//! ```
//! use veracity::analysis::char_filter::CharFilter;
//! use veracity::analysis::char_filter::punctuation::PunctuationFilter;
//!
//! let filter = PunctuationFilter::new();
//! assert_eq!(filter.filter("Don't buy it!!"), "Dont buy it");
//! ```

use ahash::AHashSet;

use super::CharFilter;

/// The ASCII punctuation set.
pub const ASCII_PUNCTUATION: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

/// A char filter that deletes every punctuation character.
///
/// Nothing is inserted in place of a removed character, so `"well-made"`
/// becomes `"wellmade"`. Casing and whitespace are left untouched.
#[derive(Clone, Debug)]
pub struct PunctuationFilter {
    punctuation: AHashSet<char>,
}

impl PunctuationFilter {
    /// Create a filter that removes ASCII punctuation.
    pub fn new() -> Self {
        Self::with_chars(ASCII_PUNCTUATION.chars())
    }

    /// Create a filter that removes the given characters.
    pub fn with_chars<I: IntoIterator<Item = char>>(chars: I) -> Self {
        PunctuationFilter {
            punctuation: chars.into_iter().collect(),
        }
    }

    /// Check whether a character is removed by this filter.
    pub fn is_punctuation(&self, c: char) -> bool {
        self.punctuation.contains(&c)
    }
}

impl Default for PunctuationFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl CharFilter for PunctuationFilter {
    fn filter(&self, input: &str) -> String {
        input.chars().filter(|c| !self.is_punctuation(*c)).collect()
    }

    fn name(&self) -> &'static str {
        "punctuation"
    }
}
