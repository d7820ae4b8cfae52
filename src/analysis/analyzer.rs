//! Analyzers combine a char filter chain, a tokenizer and token filters.
//!
//! ```text
//! Raw Text → Analyzer → Token Stream → Feature Vector
//!             ↓
//!         Char Filters
//!             ↓
//!         Tokenizer
//!             ↓
//!         Filter 1 … Filter N
//! ```
//!
//! - [`pipeline::PipelineAnalyzer`] - Custom tokenizer + filter chains
//! - [`review::ReviewAnalyzer`] - The fixed chain review classification uses

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
///
/// The trait requires `Send + Sync` so a single analyzer can be shared by
/// concurrent predictions.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod pipeline;
pub mod review;

pub use pipeline::PipelineAnalyzer;
pub use review::ReviewAnalyzer;
