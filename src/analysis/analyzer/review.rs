//! Review text analyzer.
//!
//! The fixed analysis chain used to turn review text into classifier tokens:
//! punctuation removal, single-space splitting, lowercasing, stop word
//! removal, noun lemmatization and finally bigram expansion.

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::char_filter::punctuation::PunctuationFilter;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::bigram::BigramFilter;
use crate::analysis::token_filter::lemma::{LemmaFilter, Lemmatizer, MorphyLemmatizer};
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::space::SpaceTokenizer;
use crate::error::Result;

/// Analyzer producing the token sequence a review classifier consumes.
///
/// # Examples
///
/// ```
/// use veracity::analysis::analyzer::review::ReviewAnalyzer;
///
/// let analyzer = ReviewAnalyzer::new();
/// let tokens = analyzer.tokenize("This product is amazing and great").unwrap();
///
/// assert_eq!(
///     tokens,
///     vec!["product amazing", "amazing great", "product", "amazing", "great"]
/// );
/// ```
#[derive(Clone)]
pub struct ReviewAnalyzer {
    inner: PipelineAnalyzer,
}

impl ReviewAnalyzer {
    /// Create the analyzer with the default stop words and morphy lemmatizer.
    pub fn new() -> Self {
        Self::with_components(StopFilter::new(), Box::new(MorphyLemmatizer::new()))
    }

    /// Create the analyzer with a custom lemmatizer.
    pub fn with_lemmatizer(lemmatizer: Box<dyn Lemmatizer>) -> Self {
        Self::with_components(StopFilter::new(), lemmatizer)
    }

    /// Create the analyzer with a custom stop filter and lemmatizer.
    pub fn with_components(stop_filter: StopFilter, lemmatizer: Box<dyn Lemmatizer>) -> Self {
        let inner = PipelineAnalyzer::new("review", Arc::new(SpaceTokenizer::new()))
            .with_char_filter(Arc::new(PunctuationFilter::new()))
            .with_filter(Arc::new(LowercaseFilter::new()))
            .with_filter(Arc::new(stop_filter))
            .with_filter(Arc::new(LemmaFilter::with_lemmatizer(lemmatizer)))
            .with_filter(Arc::new(BigramFilter::new()));

        ReviewAnalyzer { inner }
    }

    /// Strip punctuation, leaving casing and spacing as they are.
    pub fn normalize(&self, text: &str) -> String {
        self.inner.normalize(text)
    }

    /// Analyze raw text into token strings: the bigram block followed by
    /// the unigram block.
    pub fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        Ok(self
            .analyze(text)?
            .map(|token| token.text)
            .collect())
    }
}

impl Default for ReviewAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for ReviewAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "review"
    }
}

impl Debug for ReviewAnalyzer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewAnalyzer")
            .field("inner", &self.inner)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::TokenType;
    use crate::analysis::token_filter::lemma::IdentityLemmatizer;

    #[test]
    fn test_review_example() {
        let analyzer = ReviewAnalyzer::new();
        let tokens = analyzer.tokenize("This product is amazing and great").unwrap();

        assert_eq!(
            tokens,
            vec![
                "product amazing",
                "amazing great",
                "product",
                "amazing",
                "great"
            ]
        );
    }

    #[test]
    fn test_token_types() {
        let analyzer = ReviewAnalyzer::new();
        let tokens: Vec<_> = analyzer.analyze("sturdy boxes").unwrap().collect();

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].text, "sturdy box");
        assert_eq!(tokens[0].token_type, TokenType::Bigram);
        assert_eq!(tokens[2].text, "box");
        assert_eq!(tokens[2].token_type, TokenType::Word);
    }

    #[test]
    fn test_punctuation_and_case() {
        let analyzer = ReviewAnalyzer::new();

        assert_eq!(analyzer.normalize("Don't BUY, it's junk!"), "Dont BUY its junk");
        let tokens = analyzer.tokenize("Don't BUY, it's junk!").unwrap();
        assert_eq!(
            tokens,
            vec!["dont buy", "buy junk", "dont", "buy", "junk"]
        );
    }

    #[test]
    fn test_all_stop_words() {
        let analyzer = ReviewAnalyzer::new();
        assert!(analyzer.tokenize("is the a").unwrap().is_empty());
        assert!(analyzer.tokenize("").unwrap().is_empty());
        assert!(analyzer.tokenize("?!").unwrap().is_empty());
    }

    #[test]
    fn test_bigrams_span_removed_stop_words() {
        let analyzer = ReviewAnalyzer::new();
        let tokens = analyzer.tokenize("cheap and flimsy").unwrap();

        assert_eq!(tokens, vec!["cheap flimsy", "cheap", "flimsy"]);
    }

    #[test]
    fn test_double_space_yields_empty_word() {
        let analyzer = ReviewAnalyzer::new();
        let tokens = analyzer.tokenize("good  value").unwrap();

        assert_eq!(
            tokens,
            vec!["good ", " value", "good", "", "value"]
        );
    }

    #[test]
    fn test_custom_lemmatizer() {
        let analyzer = ReviewAnalyzer::with_lemmatizer(Box::new(IdentityLemmatizer::new()));
        let tokens = analyzer.tokenize("Products").unwrap();

        assert_eq!(tokens, vec!["products"]);
        assert_eq!(analyzer.name(), "review");
        assert_eq!(
            format!("{analyzer:?}"),
            "ReviewAnalyzer { inner: PipelineAnalyzer { label: \"review\", stages: [\"punctuation\", \"space\", \"lowercase\", \"stop\", \"lemma\", \"bigram\"] } }"
        );
    }
}
