//! Word lexicon and contextual tables loaded from the artifact.

pub mod context;
pub mod store;

pub use context::{BigramTable, SentenceMemory};
pub use store::{DuplicateSurface, Lexicon, LexiconEntry, Match};
