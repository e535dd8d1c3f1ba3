//! Immutable lexicon: surface forms → canonical forms, plus a length-bucketed
//! vocabulary for fuzzy search.

use crate::text::distance::bounded_distance_chars;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// One row of the lexicon artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub surface: String,
    pub canonical: String,
    pub weight: f64,
}

impl LexiconEntry {
    pub fn new(surface: impl Into<String>, canonical: impl Into<String>, weight: f64) -> Self {
        Self {
            surface: surface.into(),
            canonical: canonical.into(),
            weight,
        }
    }
}

/// Two rows share a surface form.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("duplicate surface form '{0}'")]
pub struct DuplicateSurface(pub String);

/// Result of a fuzzy lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match<'a> {
    pub canonical: &'a str,
    pub distance: usize,
    pub weight: f64,
}

#[derive(Debug, Clone)]
struct VocabWord {
    text: String,
    chars: Vec<char>,
    weight: f64,
}

impl VocabWord {
    /// Ordering among candidates at equal distance: heavier first, then
    /// shorter, then lexicographic.
    fn tie_break(&self, other: &VocabWord) -> Ordering {
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| self.chars.len().cmp(&other.chars.len()))
            .then_with(|| self.text.cmp(&other.text))
    }
}

/// Read-only word store.
///
/// Built once from artifact rows and shared across threads afterwards.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: HashMap<String, LexiconEntry>,
    vocabulary: Vec<VocabWord>,
    /// Character length → indices into `vocabulary`.
    by_length: BTreeMap<usize, Vec<usize>>,
    explicit_entries: usize,
}

impl Lexicon {
    /// Build a lexicon from artifact rows.
    ///
    /// Every canonical form joins the vocabulary. A canonical form that is not
    /// listed as a surface gets an implicit identity entry so exact lookup of a
    /// correct word succeeds.
    pub fn from_entries<I>(rows: I) -> Result<Self, DuplicateSurface>
    where
        I: IntoIterator<Item = LexiconEntry>,
    {
        let mut entries: HashMap<String, LexiconEntry> = HashMap::new();
        let mut vocab_weights: BTreeMap<String, f64> = BTreeMap::new();

        for row in rows {
            if entries.contains_key(&row.surface) {
                return Err(DuplicateSurface(row.surface));
            }
            let weight = vocab_weights.entry(row.canonical.clone()).or_insert(row.weight);
            if row.weight > *weight {
                *weight = row.weight;
            }
            entries.insert(row.surface.clone(), row);
        }

        let explicit_entries = entries.len();

        for (canonical, weight) in &vocab_weights {
            entries
                .entry(canonical.clone())
                .or_insert_with(|| LexiconEntry::new(canonical.clone(), canonical.clone(), *weight));
        }

        let mut vocabulary = Vec::with_capacity(vocab_weights.len());
        let mut by_length: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (text, weight) in vocab_weights {
            let chars: Vec<char> = text.chars().collect();
            by_length.entry(chars.len()).or_default().push(vocabulary.len());
            vocabulary.push(VocabWord {
                text,
                chars,
                weight,
            });
        }

        Ok(Self {
            entries,
            vocabulary,
            by_length,
            explicit_entries,
        })
    }

    /// Canonical form for an exact surface match.
    pub fn lookup(&self, token: &str) -> Option<&str> {
        self.entries.get(token).map(|e| e.canonical.as_str())
    }

    /// Closest vocabulary word within `max_distance` edits of `token`.
    ///
    /// Ties on distance go to the highest weight, then the shortest word, then
    /// the lexicographically smallest, so the answer never depends on
    /// insertion order.
    pub fn nearest(&self, token: &str, max_distance: usize) -> Option<Match<'_>> {
        let chars: Vec<char> = token.chars().collect();
        let lo = chars.len().saturating_sub(max_distance);
        let hi = chars.len() + max_distance;

        let mut best: Option<(usize, &VocabWord)> = None;
        for ids in self.by_length.range(lo..=hi).map(|(_, ids)| ids) {
            for &id in ids {
                let word = &self.vocabulary[id];
                let bound = best.map_or(max_distance, |(d, _)| d);
                let Some(d) = bounded_distance_chars(&chars, &word.chars, bound) else {
                    continue;
                };
                let better = match best {
                    None => true,
                    Some((best_d, best_word)) => {
                        d < best_d || (d == best_d && word.tie_break(best_word) == Ordering::Less)
                    }
                };
                if better {
                    best = Some((d, word));
                }
            }
        }

        best.map(|(distance, word)| Match {
            canonical: word.text.as_str(),
            distance,
            weight: word.weight,
        })
    }

    /// Whether `word` is a known-correct form.
    pub fn contains(&self, word: &str) -> bool {
        self.vocabulary
            .binary_search_by(|w| w.text.as_str().cmp(word))
            .is_ok()
    }

    /// Every entry, including the implicit identity rows, in no particular
    /// order.
    pub fn entries(&self) -> impl Iterator<Item = &LexiconEntry> {
        self.entries.values()
    }

    /// Number of rows read from the artifact.
    pub fn len(&self) -> usize {
        self.explicit_entries
    }

    pub fn is_empty(&self) -> bool {
        self.explicit_entries == 0
    }

    /// Number of distinct canonical forms.
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Iterate over canonical forms in lexicographic order.
    pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
        self.vocabulary.iter().map(|w| w.text.as_str())
    }
}
