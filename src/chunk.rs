//! Splits the input into line-aligned byte ranges, one per worker.

use std::num::NonZeroUsize;
use std::ops::Range;

use log::debug;
use memchr::memchr;

/// Half-open byte range `[start, end)` of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    pub start: u64,
    pub end: u64,
}

impl Chunk {
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start as usize..self.end as usize
    }
}

/// Plans `workers` chunks over `data`.
///
/// Chunks are contiguous and cover the whole input. Every internal boundary
/// sits right after a `\n`, and the last chunk always ends at `data.len()`.
/// Workers beyond the number of lines get empty chunks.
pub fn plan_chunks(data: &[u8], workers: NonZeroUsize) -> Vec<Chunk> {
    let size = data.len() as u64;
    let workers = workers.get();
    let target = size / workers as u64;

    let mut chunks = Vec::with_capacity(workers);
    let mut start = 0u64;
    for _ in 0..workers {
        let mut end = start + target;
        if end >= size {
            end = size;
        } else {
            end = match memchr(b'\n', &data[end as usize..]) {
                Some(offset) => end + offset as u64 + 1,
                None => size,
            };
        }
        chunks.push(Chunk { start, end });
        start = end;
    }

    if let Some(last) = chunks.last_mut() {
        last.end = size;
    }

    debug!("planned {} chunks over {} bytes (target {} bytes)", workers, size, target);
    chunks
}
