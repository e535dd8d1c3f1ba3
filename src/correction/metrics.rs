//! Sentence-level correction metrics.

use crate::text::distance::distance;
use serde::{Deserialize, Serialize};

/// Distance between the original and corrected sentence, and a normalized
/// similarity in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub edit_distance: usize,
    pub score: f64,
}

/// Character-level distance of the two full sentences, and
/// `1 - distance / max(chars(original), 1)` clamped to `[0, 1]`.
pub fn report(original: &str, corrected: &str) -> Metrics {
    let edit_distance = distance(original, corrected);
    let len = original.chars().count().max(1);
    let score = (1.0 - edit_distance as f64 / len as f64).clamp(0.0, 1.0);
    Metrics {
        edit_distance,
        score,
    }
}
