//! Text analysis for review classification.
//!
//! Review text flows through a fixed chain before it becomes features:
//!
//! ```text
//! Raw Text → CharFilter (punctuation) → Tokenizer (single space)
//!          → Lowercase → Stop → Lemma → Bigram → TokenStream
//! ```
//!
//! [`ReviewAnalyzer`](analyzer::review::ReviewAnalyzer) assembles the chain
//! with its default components; [`PipelineAnalyzer`](analyzer::pipeline::PipelineAnalyzer)
//! allows other combinations.

pub mod analyzer;
pub mod char_filter;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
