//! Sparse feature vectors for review classification.

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::{Deserialize, Serialize};

/// Key marking that a rating was supplied. Always 1; the rating value itself
/// is not encoded.
pub const RATING_KEY: &str = "R";

/// Key holding the verified-purchase flag as 1 or 0.
pub const VERIFIED_PURCHASE_KEY: &str = "VP";

/// Sparse mapping from feature key to occurrence count.
///
/// Category names and tokens share a single flat key space, so a category
/// spelled like a token accumulates into the same counter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector {
    counts: BTreeMap<String, u32>,
}

impl FeatureVector {
    /// Create an empty feature vector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a key to an explicit value.
    pub fn set<S: Into<String>>(&mut self, key: S, value: u32) {
        self.counts.insert(key.into(), value);
    }

    /// Add one to the counter at `key`, creating it at 1.
    pub fn increment(&mut self, key: &str) {
        match self.counts.get_mut(key) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(key.to_string(), 1);
            }
        }
    }

    /// Get the count for a key.
    pub fn get(&self, key: &str) -> Option<u32> {
        self.counts.get(key).copied()
    }

    /// Check whether a key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.counts.contains_key(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if the vector has no keys.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate over `(key, count)` pairs in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, u32> {
        self.counts.iter()
    }
}

impl<'a> IntoIterator for &'a FeatureVector {
    type Item = (&'a String, &'a u32);
    type IntoIter = btree_map::Iter<'a, String, u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}

impl FromIterator<(String, u32)> for FeatureVector {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        FeatureVector {
            counts: iter.into_iter().collect(),
        }
    }
}

/// Builds feature vectors from review metadata and analyzed tokens.
#[derive(Debug, Clone, Default)]
pub struct FeatureVectorBuilder;

impl FeatureVectorBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        FeatureVectorBuilder
    }

    /// Build the feature vector for one review.
    ///
    /// `R` is set to 1 whatever the rating is; models trained on this
    /// encoding only ever saw the presence marker.
    ///
    /// # Examples
    ///
    /// ```
    /// use veracity::ml::features::FeatureVectorBuilder;
    ///
    /// let tokens = vec!["great".to_string()];
    /// let vector = FeatureVectorBuilder::new().build(4, false, "books", &tokens);
    ///
    /// assert_eq!(vector.get("R"), Some(1));
    /// assert_eq!(vector.get("VP"), Some(0));
    /// assert_eq!(vector.get("books"), Some(1));
    /// assert_eq!(vector.get("great"), Some(1));
    /// ```
    pub fn build<S: AsRef<str>>(
        &self,
        _rating: u8,
        verified_purchase: bool,
        category: &str,
        tokens: &[S],
    ) -> FeatureVector {
        let mut vector = FeatureVector::new();

        vector.set(RATING_KEY, 1);
        vector.set(VERIFIED_PURCHASE_KEY, u32::from(verified_purchase));
        vector.increment(category);

        for token in tokens {
            vector.increment(token.as_ref());
        }

        vector
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_reference_example() {
        let tokens = strings(&[
            "product amazing",
            "amazing great",
            "product",
            "amazing",
            "great",
        ]);
        let vector = FeatureVectorBuilder::new().build(5, true, "electronics", &tokens);

        let expected: FeatureVector = [
            ("R", 1),
            ("VP", 1),
            ("electronics", 1),
            ("product amazing", 1),
            ("amazing great", 1),
            ("product", 1),
            ("amazing", 1),
            ("great", 1),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        assert_eq!(vector, expected);
    }

    #[test]
    fn test_rating_value_is_discarded() {
        let builder = FeatureVectorBuilder::new();
        let low = builder.build(1, false, "toys", &strings(&["fun"]));
        let high = builder.build(5, false, "toys", &strings(&["fun"]));

        assert_eq!(low, high);
        assert_eq!(low.get(RATING_KEY), Some(1));
    }

    #[test]
    fn test_unverified_purchase_is_zero() {
        let vector = FeatureVectorBuilder::new().build(3, false, "toys", &Vec::<String>::new());

        assert_eq!(vector.get(VERIFIED_PURCHASE_KEY), Some(0));
        assert_eq!(vector.len(), 3);
    }

    #[test]
    fn test_repeated_tokens_accumulate() {
        let vector =
            FeatureVectorBuilder::new().build(2, true, "kitchen", &strings(&["bad", "bad", "pan"]));

        assert_eq!(vector.get("bad"), Some(2));
        assert_eq!(vector.get("pan"), Some(1));
    }

    #[test]
    fn test_category_and_token_share_counter() {
        let vector =
            FeatureVectorBuilder::new().build(4, true, "book", &strings(&["book", "good book"]));

        assert_eq!(vector.get("book"), Some(2));
        assert_eq!(vector.len(), 4);
    }

    #[test]
    fn test_token_named_like_reserved_key() {
        // A lowercased token can never be "R" or "VP", but the builder does
        // not special-case them either way.
        let vector = FeatureVectorBuilder::new().build(4, true, "VP", &Vec::<String>::new());
        assert_eq!(vector.get(VERIFIED_PURCHASE_KEY), Some(2));
    }

    #[test]
    fn test_serializes_as_flat_map() {
        let vector = FeatureVectorBuilder::new().build(4, true, "garden", &strings(&["hose"]));
        let json = serde_json::to_string(&vector).unwrap();

        assert_eq!(json, r#"{"R":1,"VP":1,"garden":1,"hose":1}"#);
        let back: FeatureVector = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vector);
    }
}
