//! Bigram (word shingle) filter implementation.
//!
//! Bigrams are computed once, over the complete sequence of surviving word
//! tokens, and emitted as a block ahead of the unigrams:
//!
//! ```text
//! [product, amazing, great]
//!   → [product amazing, amazing great, product, amazing, great]
//! ```
//!
//! For `U` word tokens the output holds `U + max(U - 1, 0)` tokens.

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Separator placed between the two words of a bigram.
pub const BIGRAM_SEPARATOR: &str = " ";

/// A filter that prepends adjacent-word bigrams to the token stream.
#[derive(Clone, Debug)]
pub struct BigramFilter {
    output_unigrams: bool,
}

impl BigramFilter {
    /// Create a bigram filter that keeps the unigrams after the bigrams.
    pub fn new() -> Self {
        BigramFilter {
            output_unigrams: true,
        }
    }

    /// Set whether the unigram block is emitted.
    pub fn output_unigrams(mut self, output: bool) -> Self {
        self.output_unigrams = output;
        self
    }
}

impl Default for BigramFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for BigramFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let words: Vec<Token> = tokens.collect();

        let mut output = Vec::with_capacity(words.len() * 2);

        output.extend(
            words
                .windows(2)
                .map(|pair| Token::bigram(&pair[0], &pair[1], BIGRAM_SEPARATOR)),
        );

        if self.output_unigrams {
            output.extend(words);
        }

        Ok(Box::new(output.into_iter()))
    }

    fn name(&self) -> &'static str {
        "bigram"
    }
}
