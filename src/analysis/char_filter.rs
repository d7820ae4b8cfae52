//! Char filters that normalize text before tokenization.
//!
//! - [`punctuation::PunctuationFilter`] - Deletes punctuation characters

/// Trait for character filters that transform text before tokenization.
///
/// Char filters are total: every input string maps to an output string, and
/// the empty string is a valid result.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod punctuation;
