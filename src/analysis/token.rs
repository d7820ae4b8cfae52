//! Tokens flowing through the review analysis chain.
//!
//! The tokenizer emits [`TokenType::Word`] tokens carrying byte offsets into
//! the normalized text. Filters rewrite or drop them, and the
//! bigram filter joins neighbours into [`TokenType::Bigram`] tokens.
//!
//! # Examples
//!
//! ```
//! use veracity::analysis::token::{Token, TokenType};
//!
//! let first = Token::with_offsets("product", 0, 0, 7);
//! let second = Token::with_offsets("amazing", 1, 8, 15);
//! let pair = Token::bigram(&first, &second, " ");
//!
//! assert_eq!(pair.text, "product amazing");
//! assert_eq!(pair.token_type, TokenType::Bigram);
//! assert_eq!((pair.start_offset, pair.end_offset), (0, 15));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A word, or pair of words, produced by analysis.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,

    /// Index of the (first) word in the tokenizer output.
    pub position: usize,

    /// Byte range in the normalized text.
    pub start_offset: usize,
    pub end_offset: usize,

    pub token_type: TokenType,
}

/// What a token represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenType {
    Word,
    Bigram,
}

impl Token {
    /// Word token without offsets, mostly for tests and hand-built streams.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Self::with_offsets(text, position, 0, 0)
    }

    /// Word token covering `start_offset..end_offset`.
    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset,
            end_offset,
            token_type: TokenType::Word,
        }
    }

    /// Join two word tokens into a bigram spanning both.
    pub fn bigram(first: &Token, second: &Token, separator: &str) -> Self {
        Token {
            text: format!("{}{separator}{}", first.text, second.text),
            position: first.position,
            start_offset: first.start_offset,
            end_offset: second.end_offset,
            token_type: TokenType::Bigram,
        }
    }

    /// Replace the text, keeping position, offsets and type.
    pub fn map_text<F: FnOnce(&str) -> String>(mut self, f: F) -> Self {
        self.text = f(&self.text);
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Lazily evaluated sequence of tokens passed between analysis stages.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;
