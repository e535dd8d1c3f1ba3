//! Default configuration constants for shuddho.
//!
//! Shared between `Config` defaults and the correction engine so the two never
//! drift apart.

/// Maximum edit distance for fuzzy lexicon matches in conservative mode.
///
/// A single edit catches the common vowel-sign and nasal mix-ups without
/// rewriting rare but valid words.
pub const CONSERVATIVE_MAX_DISTANCE: usize = 1;

/// Maximum edit distance for fuzzy lexicon matches in aggressive mode.
pub const AGGRESSIVE_MAX_DISTANCE: usize = 2;

/// Minimum rule confidence applied in conservative mode.
///
/// Aggressive mode applies every rule regardless of confidence.
pub const CONSERVATIVE_RULE_CONFIDENCE: f32 = 0.9;

/// Weight given to lexicon rows that omit the weight column.
pub const DEFAULT_ENTRY_WEIGHT: f64 = 1.0;

/// Artifact format identifier expected in the manifest.
pub const ARTIFACT_FORMAT: &str = "shuddho-artifact";

/// Artifact format version understood by this build.
pub const ARTIFACT_VERSION: u32 = 1;

/// Manifest filename inside the data directory.
pub const ARTIFACT_MANIFEST: &str = "artifact.toml";
