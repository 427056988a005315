//! Key extraction: everything before the first `;` of a line.

use memchr::memchr;

pub const DELIMITER: u8 = b';';

/// Returns the key at the start of `line`, or `None` when `line` holds no
/// delimiter at all.
#[inline]
pub fn extract_key(line: &[u8]) -> Option<&[u8]> {
    memchr(DELIMITER, line).map(|pos| &line[..pos])
}
