//! WordNet-style noun lemmatizer.
//!
//! Words are treated as nouns. An irregular form is looked up in an
//! exception table first; otherwise the WordNet detachment rules strip an
//! inflectional suffix. With a lexicon every candidate (including the word
//! itself) must be a known lemma and the shortest survivor wins. Without a
//! lexicon a set of guards stands in for the dictionary check.

use std::fs;
use std::path::Path;

use ahash::{AHashMap, AHashSet};

use crate::analysis::token_filter::lemma::Lemmatizer;
use crate::error::Result;

/// Noun detachment rules as `(suffix, replacement)`.
const NOUN_DETACHMENT_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

/// Rules tried in order when no lexicon is available. `ses`, `zes` and `men`
/// are left out: without a dictionary they damage more words than they fix.
const GUARDED_RULES: &[(&str, &str)] = &[
    ("sses", "ss"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("xes", "x"),
    ("ies", "y"),
    ("s", ""),
];

const NOUN_EXCEPTIONS: &[(&str, &str)] = &[
    ("analyses", "analysis"),
    ("bonuses", "bonus"),
    ("brownies", "brownie"),
    ("buses", "bus"),
    ("cacti", "cactus"),
    ("calories", "calorie"),
    ("calves", "calf"),
    ("children", "child"),
    ("cookies", "cookie"),
    ("crises", "crisis"),
    ("criteria", "criterion"),
    ("data", "datum"),
    ("dice", "die"),
    ("feet", "foot"),
    ("freebies", "freebie"),
    ("fungi", "fungus"),
    ("geese", "goose"),
    ("halves", "half"),
    ("indices", "index"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("lice", "louse"),
    ("lives", "life"),
    ("loaves", "loaf"),
    ("matrices", "matrix"),
    ("men", "man"),
    ("mice", "mouse"),
    ("movies", "movie"),
    ("oxen", "ox"),
    ("phenomena", "phenomenon"),
    ("selfies", "selfie"),
    ("shelves", "shelf"),
    ("smoothies", "smoothie"),
    ("teeth", "tooth"),
    ("theses", "thesis"),
    ("thieves", "thief"),
    ("viruses", "virus"),
    ("wives", "wife"),
    ("wolves", "wolf"),
    ("women", "woman"),
    ("zombies", "zombie"),
];

/// Words ending in `s` that are already base forms.
const INVARIANT_WORDS: &[&str] = &[
    "afterwards", "always", "besides", "canvas", "christmas", "clothes", "does", "electronics",
    "goes", "headquarters", "lens", "mathematics", "means", "news", "nevertheless", "perhaps",
    "physics", "series", "sometimes", "species", "thanks", "towards", "whereas", "yes",
];

/// Lemmatizer applying WordNet noun morphology.
#[derive(Debug, Clone)]
pub struct MorphyLemmatizer {
    exceptions: AHashMap<String, String>,
    invariant: AHashSet<String>,
    lexicon: Option<AHashSet<String>>,
}

impl MorphyLemmatizer {
    /// Create a lemmatizer with the built-in exception table and no lexicon.
    pub fn new() -> Self {
        MorphyLemmatizer {
            exceptions: NOUN_EXCEPTIONS
                .iter()
                .map(|&(form, lemma)| (form.to_string(), lemma.to_string()))
                .collect(),
            invariant: INVARIANT_WORDS.iter().map(|&w| w.to_string()).collect(),
            lexicon: None,
        }
    }

    /// Validate candidates against a lexicon of known lemmas.
    pub fn with_lexicon<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lexicon = Some(words.into_iter().map(|w| w.into()).collect());
        self
    }

    /// Load a lexicon file with one lemma per line.
    ///
    /// Blank lines and lines starting with `#` are skipped; entries are
    /// lowercased.
    pub fn with_lexicon_file<P: AsRef<Path>>(self, path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let words = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_lowercase)
            .collect::<Vec<_>>();
        log::debug!(
            "loaded {} lexicon entries from {}",
            words.len(),
            path.as_ref().display()
        );
        Ok(self.with_lexicon(words))
    }

    /// Add an irregular form to the exception table.
    pub fn add_exception<S: Into<String>>(&mut self, form: S, lemma: S) {
        self.exceptions.insert(form.into(), lemma.into());
    }

    /// Whether a lexicon is in use.
    pub fn has_lexicon(&self) -> bool {
        self.lexicon.is_some()
    }

    fn lemmatize_with_lexicon(&self, word: &str, lexicon: &AHashSet<String>) -> String {
        let mut best: Option<String> = None;
        let candidates = std::iter::once(word.to_string()).chain(
            NOUN_DETACHMENT_RULES
                .iter()
                .filter_map(|&(suffix, replacement)| detach(word, suffix, replacement)),
        );

        for candidate in candidates {
            if !lexicon.contains(&candidate) {
                continue;
            }
            let shorter = best
                .as_ref()
                .is_none_or(|current| candidate.len() < current.len());
            if shorter {
                best = Some(candidate);
            }
        }

        best.unwrap_or_else(|| word.to_string())
    }

    fn lemmatize_guarded(&self, word: &str) -> String {
        if word.chars().count() <= 3
            || self.invariant.contains(word)
            || ["ss", "us", "is"].iter().any(|end| word.ends_with(end))
        {
            return word.to_string();
        }

        for &(suffix, replacement) in GUARDED_RULES {
            if suffix == "ies" && word.len() <= 4 {
                continue;
            }
            if let Some(candidate) = detach(word, suffix, replacement) {
                return candidate;
            }
        }

        word.to_string()
    }
}

/// Replace `suffix` with `replacement`, keeping at least two characters.
fn detach(word: &str, suffix: &str, replacement: &str) -> Option<String> {
    let stem = word.strip_suffix(suffix)?;
    if stem.chars().count() + replacement.chars().count() < 2 {
        return None;
    }
    Some(format!("{stem}{replacement}"))
}

impl Default for MorphyLemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lemmatizer for MorphyLemmatizer {
    fn lemmatize(&self, word: &str) -> String {
        if word.is_empty() {
            return String::new();
        }
        if let Some(lemma) = self.exceptions.get(word) {
            return lemma.clone();
        }

        match &self.lexicon {
            Some(lexicon) => self.lemmatize_with_lexicon(word, lexicon),
            None => self.lemmatize_guarded(word),
        }
    }

    fn name(&self) -> &'static str {
        "morphy"
    }
}
