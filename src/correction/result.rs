//! Output types of a correction call.

use crate::correction::mode::Mode;
use serde::{Deserialize, Serialize};

/// What produced a token replacement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EditSource {
    /// One or more substitution rules, in application order.
    Rule { rules: Vec<String> },
    /// A contextual correction keyed on the previous word.
    Bigram { previous: String },
    /// Exact lexicon hit on a known misspelling.
    Lexicon,
    /// Closest vocabulary word within the mode's distance bound.
    Fuzzy { distance: usize },
    /// The whole sentence matched a stored correction.
    SentenceMemory,
}

/// One changed token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenEdit {
    /// Position among the sentence's word tokens (separators not counted).
    pub index: usize,
    pub original: String,
    pub corrected: String,
    pub source: EditSource,
}

/// Result of correcting one sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionResult {
    pub original: String,
    pub corrected: String,
    pub edit_distance: usize,
    pub score: f64,
    pub mode: Mode,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub edits: Vec<TokenEdit>,
}

impl CorrectionResult {
    /// Whether anything was changed.
    pub fn is_changed(&self) -> bool {
        self.original != self.corrected
    }

    /// Number of word tokens that were replaced.
    ///
    /// A sentence-memory hit counts as a single change.
    pub fn tokens_changed(&self) -> usize {
        self.edits.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CorrectionResult {
        CorrectionResult {
            original: "তিনি একজন বীজ্ঞানী।".into(),
            corrected: "তিনি একজন বিজ্ঞানী।".into(),
            edit_distance: 1,
            score: 0.95,
            mode: Mode::Conservative,
            edits: vec![TokenEdit {
                index: 2,
                original: "বীজ্ঞানী".into(),
                corrected: "বিজ্ঞানী".into(),
                source: EditSource::Lexicon,
            }],
        }
    }

    #[test]
    fn reports_changes() {
        let result = sample();
        assert!(result.is_changed());
        assert_eq!(result.tokens_changed(), 1);
    }

    #[test]
    fn serializes_to_json() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["mode"], "conservative");
        assert_eq!(json["edit_distance"], 1);
        assert_eq!(json["edits"][0]["source"]["kind"], "lexicon");
    }

    #[test]
    fn fuzzy_source_carries_distance() {
        let json = serde_json::to_value(EditSource::Fuzzy { distance: 2 }).unwrap();
        assert_eq!(json["kind"], "fuzzy");
        assert_eq!(json["distance"], 2);
    }

    #[test]
    fn empty_edits_are_omitted() {
        let mut result = sample();
        result.edits.clear();
        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("edits"));
        let back: CorrectionResult = serde_json::from_str(&json).unwrap();
        assert!(back.edits.is_empty());
    }
}
