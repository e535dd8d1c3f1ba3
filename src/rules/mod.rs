//! Deterministic substitution rules for common spelling errors.
//!
//! Rules run before any dictionary lookup.

pub mod engine;
pub mod rule;

pub use engine::{RuleOutcome, RuleSet};
pub use rule::{PatternKind, Rule, RuleError, RuleSpec, Scope};
