//! Per-worker scan of one chunk into a private key → statistics table.

use ahash::AHashMap;
use memchr::memchr;

use crate::chunk::Chunk;
use crate::decimal::Decimal;
use crate::error::{BrcError, Result};
use crate::key::extract_key;
use crate::stats::Statistics;

const EXPECTED_KEYS: usize = 10_000;
// Shortest possible line: `;0.00\n`.
const MIN_LINE_LEN: usize = 6;

/// Keys borrow from the input view and stay valid while it is held.
pub type LocalMapping<'a> = AHashMap<&'a [u8], Statistics>;

/// Scans every line of `chunk`.
///
/// A trailing fragment without a `;` ends the scan silently. A value that is
/// not `[-]D{1,3}.DD` fails the whole chunk.
///
/// Lines are not validated beyond that: a blank line becomes part of the
/// next key (`"\nb"` for `a;1.00\n\nb;2.00`).
pub fn scan_chunk(data: &[u8], chunk: Chunk) -> Result<LocalMapping<'_>> {
    let range = chunk.range();
    let capacity = EXPECTED_KEYS.min(range.len() / MIN_LINE_LEN);
    let mut stations = LocalMapping::with_capacity(capacity);
    let end = range.end;
    let mut i = range.start;

    while i < end {
        let remaining = &data[i..end];
        let Some(key) = extract_key(remaining) else {
            break;
        };
        i += key.len() + 1;

        let value_end = memchr(b'\n', &data[i..end]).map_or(end, |offset| i + offset);
        let raw = &data[i..value_end];
        let value = Decimal::parse(raw).ok_or_else(|| BrcError::malformed(raw))?;
        i = if value_end < end { value_end + 1 } else { end };

        match stations.get_mut(key) {
            Some(stats) => stats.record(value),
            None => {
                stations.insert(key, Statistics::new(value));
            }
        }
    }

    Ok(stations)
}
