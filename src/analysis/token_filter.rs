//! Token filter implementations for token transformation.
//!
//! Filters transform the token streams produced by tokenizers. The review
//! pipeline chains them as:
//!
//! ```text
//! Tokenizer → Lowercase → Stop → Lemma → Bigram
//! ```
//!
//! # Examples
//!
//! ```
//! use veracity::analysis::token_filter::Filter;
//! use veracity::analysis::token_filter::lowercase::LowercaseFilter;
//! use veracity::analysis::token::Token;
//!
//! let filter = LowercaseFilter::new();
//! let tokens = vec![Token::new("Sturdy", 0), Token::new("BLENDER", 1)];
//! let filtered: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(filtered[0].text, "sturdy");
//! assert_eq!(filtered[1].text, "blender");
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
///
/// Filters receive a stream of tokens and produce a new stream, allowing
/// them to modify, remove, or add tokens.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod bigram;
pub mod lemma;
pub mod lowercase;
pub mod stop;

pub use bigram::BigramFilter;
pub use lemma::{IdentityLemmatizer, LemmaFilter, Lemmatizer, MorphyLemmatizer};
pub use lowercase::LowercaseFilter;
pub use stop::StopFilter;
