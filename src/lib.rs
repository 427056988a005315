//! Per-key min/mean/max over `<key>;<value>\n` files, scanned in parallel
//! over a memory-mapped view.

pub mod chunk;
pub mod decimal;
pub mod error;
pub mod format;
pub mod generate;
pub mod key;
pub mod mapped;
pub mod merge;
pub mod scan;
pub mod stats;

use std::num::NonZeroUsize;

use crossbeam_channel::unbounded;
use log::{debug, info};

pub use crate::chunk::{plan_chunks, Chunk};
pub use crate::decimal::Decimal;
pub use crate::error::{BrcError, Result};
pub use crate::format::{render, write_report};
pub use crate::mapped::MappedFile;
pub use crate::merge::{merge_mappings, FinalMapping};
pub use crate::scan::{scan_chunk, LocalMapping};
pub use crate::stats::Statistics;

/// Aggregates `data` using `workers` parallel scanners.
///
/// Every worker runs to completion. If any of them hits a malformed value
/// the first error received is returned and all partial tables are dropped.
pub fn aggregate(data: &[u8], workers: usize) -> Result<FinalMapping> {
    let workers = NonZeroUsize::new(workers).ok_or(BrcError::InvalidWorkerCount)?;
    let chunks = plan_chunks(data, workers);

    // Chunks are tasks; the pool never grows past the machine's parallelism.
    let threads = std::thread::available_parallelism()
        .map_or(1, NonZeroUsize::get)
        .min(workers.get());
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("brc-worker-{i}"))
        .build()?;

    let (tx, rx) = unbounded();
    pool.scope(|scope| {
        for (index, &chunk) in chunks.iter().enumerate() {
            let tx = tx.clone();
            scope.spawn(move |_| {
                let result = scan_chunk(data, chunk);
                debug!(
                    "worker {} scanned bytes {}..{} ({})",
                    index,
                    chunk.start,
                    chunk.end,
                    if result.is_ok() { "ok" } else { "failed" }
                );
                // The receiver outlives the scope.
                let _ = tx.send((index, result));
            });
        }
    });
    drop(tx);

    let mut slots: Vec<Option<LocalMapping<'_>>> = (0..chunks.len()).map(|_| None).collect();
    let mut first_error = None;
    for (index, result) in rx {
        match result {
            Ok(local) => slots[index] = Some(local),
            Err(err) => {
                first_error.get_or_insert(err);
            }
        }
    }
    if let Some(err) = first_error {
        return Err(err);
    }

    let locals = slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| slot.ok_or(BrcError::WorkerLost(index)))
        .collect::<Result<Vec<_>>>()?;

    let merged = merge_mappings(locals);
    info!(
        "aggregated {} rows into {} keys with {} workers",
        merged.rows(),
        merged.len(),
        workers
    );
    Ok(merged)
}
