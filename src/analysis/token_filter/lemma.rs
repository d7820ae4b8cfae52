//! Lemmatizing token filter and lemmatizer implementations.

use super::Filter;
use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;

/// Trait for lemmatization algorithms.
///
/// A lemmatizer reduces a lowercase word to its dictionary base form. It is
/// total: words it cannot reduce are returned unchanged.
pub trait Lemmatizer: Send + Sync {
    /// Reduce a word to its base form.
    fn lemmatize(&self, word: &str) -> String;

    /// Get the name of this lemmatizer.
    fn name(&self) -> &'static str;
}

pub mod identity;
pub mod morphy;

pub use identity::IdentityLemmatizer;
pub use morphy::MorphyLemmatizer;

/// Filter that applies lemmatization to tokens.
pub struct LemmaFilter {
    lemmatizer: Box<dyn Lemmatizer>,
}

impl std::fmt::Debug for LemmaFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LemmaFilter")
            .field("lemmatizer", &self.lemmatizer.name())
            .finish()
    }
}

impl LemmaFilter {
    /// Create a new lemma filter with the morphy lemmatizer.
    pub fn new() -> Self {
        LemmaFilter {
            lemmatizer: Box::new(MorphyLemmatizer::new()),
        }
    }

    /// Create a lemma filter with a custom lemmatizer.
    pub fn with_lemmatizer(lemmatizer: Box<dyn Lemmatizer>) -> Self {
        LemmaFilter { lemmatizer }
    }
}

impl Default for LemmaFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for LemmaFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        // Lemmas are computed eagerly: the returned stream cannot borrow
        // the lemmatizer.
        let lemmatized: Vec<Token> = tokens
            .map(|token| token.map_text(|text| self.lemmatizer.lemmatize(text)))
            .collect();

        Ok(Box::new(lemmatized.into_iter()))
    }

    fn name(&self) -> &'static str {
        "lemma"
    }
}
