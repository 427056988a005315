//! Renders a [`FinalMapping`] as `{key=min/avg/max, ...}\n`.
//!
//! `min` and `max` are exact. `avg` goes through `{:.2}`, which rounds the
//! binary value to nearest with ties to even.

use std::io::{self, Write};

use crate::merge::FinalMapping;

pub fn write_report<W: Write>(mapping: &FinalMapping, out: &mut W) -> io::Result<()> {
    out.write_all(b"{")?;
    for (i, (station, stats)) in mapping.sorted().into_iter().enumerate() {
        if i > 0 {
            out.write_all(b", ")?;
        }
        out.write_all(station)?;
        write!(out, "={}/{:.2}/{}", stats.min, stats.mean(), stats.max)?;
    }
    out.write_all(b"}\n")
}

/// Same as [`write_report`], with keys decoded lossily as UTF-8.
pub fn render(mapping: &FinalMapping) -> String {
    let mut buf = Vec::with_capacity(mapping.len() * 32 + 3);
    write_report(mapping, &mut buf).expect("writing to a Vec cannot fail");
    match String::from_utf8(buf) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    }
}
