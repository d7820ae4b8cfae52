//! Lowercase filter implementation.

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Case-folds word tokens so stop word lookup and feature keys are
/// case-insensitive.
///
/// Folding uses Unicode lowercase mapping (`"ÉCRAN"` → `"écran"`, a final
/// capital sigma becomes `ς`).
#[derive(Clone, Debug, Default)]
pub struct LowercaseFilter;

impl LowercaseFilter {
    /// Create a new lowercase filter.
    pub fn new() -> Self {
        LowercaseFilter
    }
}

impl Filter for LowercaseFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(tokens.map(|token| token.map_text(str::to_lowercase))))
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}
