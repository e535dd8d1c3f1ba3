//! Text primitives: edit distance and script-aware segmentation.

pub mod distance;
pub mod script;

pub use distance::{bounded_distance, distance};
pub use script::{Segment, SegmentKind, is_single_word, same_layout, segments};
