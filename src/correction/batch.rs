//! Parallel batch correction over a fixed worker pool.

use crate::correction::mode::Mode;
use crate::correction::pipeline::Corrector;
use crate::correction::result::CorrectionResult;
use crossbeam_channel::{bounded, unbounded};
use std::thread;

/// Worker count for a requested value; `0` means one per available core.
pub fn resolve_workers(requested: usize) -> usize {
    if requested > 0 {
        return requested;
    }
    thread::available_parallelism().map_or(1, |n| n.get())
}

/// Correct every sentence on `workers` threads.
///
/// Results come back in input order regardless of which worker finished
/// first.
pub fn correct_all(
    corrector: &Corrector,
    sentences: &[String],
    mode: Mode,
    workers: usize,
) -> Vec<CorrectionResult> {
    if sentences.is_empty() {
        return Vec::new();
    }
    let workers = resolve_workers(workers).min(sentences.len());
    tracing::debug!(sentences = sentences.len(), workers, "batch started");

    let (job_tx, job_rx) = bounded::<(usize, &str)>(workers * 2);
    let (result_tx, result_rx) = unbounded::<(usize, CorrectionResult)>();

    thread::scope(|scope| {
        for _ in 0..workers {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            scope.spawn(move || {
                for (index, sentence) in job_rx {
                    if result_tx
                        .send((index, corrector.correct(sentence, mode)))
                        .is_err()
                    {
                        break;
                    }
                }
            });
        }
        drop(job_rx);
        drop(result_tx);

        for (index, sentence) in sentences.iter().enumerate() {
            if job_tx.send((index, sentence.as_str())).is_err() {
                break;
            }
        }
        drop(job_tx);
    });

    let mut slots: Vec<Option<CorrectionResult>> = (0..sentences.len()).map(|_| None).collect();
    for (index, result) in result_rx {
        slots[index] = Some(result);
    }
    slots.into_iter().flatten().collect()
}
