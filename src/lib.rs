//! shuddho - Bengali sentence spelling correction
//!
//! Deterministic rules, a weighted lexicon and bounded edit-distance search,
//! loaded from an on-disk artifact and run in a conservative or aggressive
//! mode.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod artifact;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod correction;
pub mod defaults;
pub mod error;
pub mod lexicon;
#[cfg(feature = "cli")]
pub mod logging;
#[cfg(feature = "cli")]
pub mod output;
pub mod rules;
pub mod text;

// Engine
pub use correction::{CorrectionResult, Corrector, CorrectorOptions, EngineHandle, Mode};

// Artifact parts
pub use artifact::Artifact;
pub use lexicon::Lexicon;
pub use rules::RuleSet;

// Error handling
pub use error::{Result, ShuddhoError};

// Config
pub use config::Config;

/// Build version string with optional git commit hash.
///
/// Returns `"0.1.0+abc1234"` when git hash is available, `"0.1.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}
