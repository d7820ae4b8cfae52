//! Single-space tokenizer implementation.

use super::Tokenizer;

use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;

/// A tokenizer that splits text on the single space character.
///
/// Unlike whitespace tokenization, runs of spaces are not collapsed: two
/// adjacent spaces yield an empty word between them. Models trained on this
/// segmentation see the empty word as a feature, so it is kept by default.
/// Tabs and newlines are ordinary characters and stay inside words.
#[derive(Clone, Debug)]
pub struct SpaceTokenizer {
    keep_empty: bool,
}

impl SpaceTokenizer {
    /// Create a new space tokenizer that keeps empty fragments.
    pub fn new() -> Self {
        SpaceTokenizer { keep_empty: true }
    }

    /// Set whether empty fragments between consecutive spaces are emitted.
    pub fn keep_empty(mut self, keep: bool) -> Self {
        self.keep_empty = keep;
        self
    }
}

impl Default for SpaceTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for SpaceTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        if text.is_empty() {
            return Ok(Box::new(std::iter::empty()));
        }

        let mut tokens = Vec::new();
        let mut offset = 0;
        let mut position = 0;

        for word in text.split(' ') {
            let start = offset;
            let end = start + word.len();
            offset = end + 1;

            if word.is_empty() && !self.keep_empty {
                continue;
            }

            tokens.push(Token::with_offsets(word, position, start, end));
            position += 1;
        }

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "space"
    }
}
