//! Context tables: word bigram corrections and whole-sentence memory.

use crate::text::script::normalize_whitespace;
use std::collections::HashMap;

/// Corrections that only apply after a specific preceding word.
///
/// Maps `(previous word, word)` to the replacement for `word`.
#[derive(Debug, Clone, Default)]
pub struct BigramTable {
    pairs: HashMap<(String, String), String>,
}

impl BigramTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pair. Returns `false` if the pair was already present (the table
    /// is left unchanged).
    pub fn insert(
        &mut self,
        previous: impl Into<String>,
        word: impl Into<String>,
        correction: impl Into<String>,
    ) -> bool {
        let key = (previous.into(), word.into());
        if self.pairs.contains_key(&key) {
            return false;
        }
        self.pairs.insert(key, correction.into());
        true
    }

    pub fn get(&self, previous: &str, word: &str) -> Option<&str> {
        // HashMap<(String, String), _> cannot be queried with borrowed tuples.
        self.pairs
            .get(&(previous.to_string(), word.to_string()))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Known incorrect sentences and their corrections.
///
/// Keys are whitespace-normalized, so spacing differences in the input do not
/// prevent a match.
#[derive(Debug, Clone, Default)]
pub struct SentenceMemory {
    sentences: HashMap<String, String>,
}

impl SentenceMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a sentence pair. Returns `false` for a duplicate key.
    pub fn insert(&mut self, incorrect: &str, correct: impl Into<String>) -> bool {
        let key = normalize_whitespace(incorrect);
        if self.sentences.contains_key(&key) {
            return false;
        }
        self.sentences.insert(key, correct.into());
        true
    }

    /// Correction for an exactly matching sentence.
    pub fn exact(&self, sentence: &str) -> Option<&str> {
        self.sentences
            .get(&normalize_whitespace(sentence))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}
