use std::collections::BTreeSet;

use veracity::analysis::analyzer::review::ReviewAnalyzer;
use veracity::analysis::token_filter::StopFilter;
use veracity::ml::FeatureVectorBuilder;

const SAMPLES: &[&str] = &[
    "This product is amazing and great",
    "Terrible. Broke after two days!!!",
    "is the a",
    "",
    "one",
    "Boxes arrived crushed; the knives were dull",
    "good  value",
    "I would NOT buy this again -- avoid",
];

fn unigram_count(analyzer: &ReviewAnalyzer, text: &str) -> usize {
    let normalized = analyzer.normalize(text);
    if normalized.is_empty() {
        return 0;
    }
    let stop = StopFilter::new();
    normalized
        .split(' ')
        .filter(|word| !stop.is_stop_word(&word.to_lowercase()))
        .count()
}

#[test]
fn test_token_count_law() {
    let analyzer = ReviewAnalyzer::new();

    for text in SAMPLES {
        let tokens = analyzer.tokenize(text).unwrap();
        let u = unigram_count(&analyzer, text);
        assert_eq!(tokens.len(), u + u.saturating_sub(1), "{text:?}");
    }
}

#[test]
fn test_bigrams_join_adjacent_unigrams() {
    let analyzer = ReviewAnalyzer::new();

    for text in SAMPLES {
        let tokens = analyzer.tokenize(text).unwrap();
        let u = unigram_count(&analyzer, text);
        let (bigrams, unigrams) = tokens.split_at(tokens.len() - u);

        for (i, bigram) in bigrams.iter().enumerate() {
            assert_eq!(bigram, &format!("{} {}", unigrams[i], unigrams[i + 1]));
        }
    }
}

#[test]
fn test_vector_shape() {
    let analyzer = ReviewAnalyzer::new();
    let builder = FeatureVectorBuilder::new();

    for text in SAMPLES {
        let tokens = analyzer.tokenize(text).unwrap();
        let vector = builder.build(4, true, "garden", &tokens);

        assert_eq!(vector.get("R"), Some(1));
        assert_eq!(vector.get("VP"), Some(1));
        assert!(vector.get("garden").unwrap_or(0) >= 1);

        let distinct: BTreeSet<&str> = tokens.iter().map(String::as_str).collect();
        for token in &distinct {
            assert!(vector.get(token).unwrap_or(0) >= 1, "{token:?}");
        }
        let reserved = ["R", "VP", "garden"];
        let extra = distinct.iter().filter(|t| !reserved.contains(t)).count();
        assert_eq!(vector.len(), 3 + extra, "{text:?}");
    }
}

#[test]
fn test_purity() {
    let analyzer = ReviewAnalyzer::new();
    let builder = FeatureVectorBuilder::new();

    for text in SAMPLES {
        let first = builder.build(2, false, "toys", &analyzer.tokenize(text).unwrap());
        let second = builder.build(2, false, "toys", &analyzer.tokenize(text).unwrap());
        assert_eq!(first, second);
    }
}

#[test]
fn test_rating_is_not_encoded() {
    let analyzer = ReviewAnalyzer::new();
    let builder = FeatureVectorBuilder::new();
    let tokens = analyzer.tokenize("solid hammer").unwrap();

    let low = builder.build(1, true, "tools", &tokens);
    let high = builder.build(5, true, "tools", &tokens);
    assert_eq!(low, high);
}

#[test]
fn test_all_stop_words_leave_only_metadata() {
    let analyzer = ReviewAnalyzer::new();
    let tokens = analyzer.tokenize("is the a").unwrap();
    let vector = FeatureVectorBuilder::new().build(3, false, "books", &tokens);

    let keys: Vec<&str> = vector.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["R", "VP", "books"]);
    assert_eq!(vector.get("VP"), Some(0));
}

#[test]
fn test_category_shares_token_counter() {
    let analyzer = ReviewAnalyzer::new();
    let tokens = analyzer.tokenize("garden hose for the garden").unwrap();
    let vector = FeatureVectorBuilder::new().build(5, true, "garden", &tokens);

    // two occurrences in the text plus the category
    assert_eq!(vector.get("garden"), Some(3));
    assert_eq!(vector.get("hose"), Some(1));
}

#[test]
fn test_stop_list_is_fixed() {
    let filter = StopFilter::new();
    assert_eq!(filter.len(), 179);
    for word in ["i", "the", "and", "isn't", "wouldn", "y"] {
        assert!(filter.is_stop_word(word), "{word}");
    }
    for word in ["amazing", "product", "dont", ""] {
        assert!(!filter.is_stop_word(word), "{word:?}");
    }
}
