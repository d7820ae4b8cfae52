//! Tokenizer implementations for text analysis.
//!
//! Tokenizers are the first token-producing step of the pipeline, splitting
//! (already char-filtered) text into word tokens.
//!
//! # Examples
//!
//! ```
//! use veracity::analysis::tokenizer::Tokenizer;
//! use veracity::analysis::tokenizer::space::SpaceTokenizer;
//!
//! let tokenizer = SpaceTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("Works great").unwrap().collect();
//! assert_eq!(tokens.len(), 2);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so one tokenizer can serve concurrent
/// predictions.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod space;

pub use space::SpaceTokenizer;
