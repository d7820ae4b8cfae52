//! Staged analyzer: text rewrites, then segmentation, then token filters.
//!
//! Each stage is a trait object, so one pipeline can be shared by every
//! prediction thread. Stages run in the order they were attached.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use veracity::analysis::analyzer::Analyzer;
//! use veracity::analysis::analyzer::pipeline::PipelineAnalyzer;
//! use veracity::analysis::char_filter::punctuation::PunctuationFilter;
//! use veracity::analysis::token_filter::lowercase::LowercaseFilter;
//! use veracity::analysis::tokenizer::space::SpaceTokenizer;
//!
//! let analyzer = PipelineAnalyzer::new("words", Arc::new(SpaceTokenizer::new()))
//!     .with_char_filter(Arc::new(PunctuationFilter::new()))
//!     .with_filter(Arc::new(LowercaseFilter::new()));
//!
//! let words: Vec<String> = analyzer
//!     .analyze("Works, GREAT!")
//!     .unwrap()
//!     .map(|token| token.text)
//!     .collect();
//!
//! assert_eq!(words, vec!["works", "great"]);
//! assert_eq!(analyzer.stages(), vec!["punctuation", "space", "lowercase"]);
//! ```

use std::fmt;
use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::char_filter::CharFilter;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// Analyzer assembled from a tokenizer and ordered char and token filters.
#[derive(Clone)]
pub struct PipelineAnalyzer {
    label: String,
    char_filters: Vec<Arc<dyn CharFilter>>,
    tokenizer: Arc<dyn Tokenizer>,
    filters: Vec<Arc<dyn Filter>>,
}

impl PipelineAnalyzer {
    /// Start a pipeline around `tokenizer` with no filters.
    pub fn new<S: Into<String>>(label: S, tokenizer: Arc<dyn Tokenizer>) -> Self {
        PipelineAnalyzer {
            label: label.into(),
            char_filters: Vec::new(),
            tokenizer,
            filters: Vec::new(),
        }
    }

    /// Append a text rewrite applied before tokenization.
    pub fn with_char_filter(mut self, char_filter: Arc<dyn CharFilter>) -> Self {
        self.char_filters.push(char_filter);
        self
    }

    /// Append a token filter.
    pub fn with_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Label given at construction.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Names of every stage in execution order.
    pub fn stages(&self) -> Vec<&'static str> {
        self.char_filters
            .iter()
            .map(|c| c.name())
            .chain(std::iter::once(self.tokenizer.name()))
            .chain(self.filters.iter().map(|f| f.name()))
            .collect()
    }

    /// Apply only the char filters.
    pub fn normalize(&self, text: &str) -> String {
        let mut current = text.to_string();
        for char_filter in &self.char_filters {
            current = char_filter.filter(&current);
        }
        current
    }
}

impl Analyzer for PipelineAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        let normalized = self.normalize(text);
        self.filters
            .iter()
            .try_fold(self.tokenizer.tokenize(&normalized)?, |stream, filter| {
                filter.filter(stream)
            })
    }

    fn name(&self) -> &'static str {
        "pipeline"
    }
}

impl fmt::Debug for PipelineAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineAnalyzer")
            .field("label", &self.label)
            .field("stages", &self.stages())
            .finish()
    }
}
