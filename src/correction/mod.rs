//! Sentence correction: modes, the token pipeline, results and concurrency.

pub mod batch;
pub mod handle;
pub mod metrics;
pub mod mode;
pub mod pipeline;
pub mod result;

pub use handle::EngineHandle;
pub use metrics::{Metrics, report};
pub use mode::{Mode, Thresholds};
pub use pipeline::{Corrector, CorrectorOptions};
pub use result::{CorrectionResult, EditSource, TokenEdit};
