//! Read-only byte view over the input file.

use std::fs::File;
use std::path::Path;

use log::{debug, warn};
use memmap2::Mmap;

use crate::error::{BrcError, Result};

enum View {
    Mapped(Mmap),
    // Zero-length files cannot be mapped on every platform.
    Buffered(Vec<u8>),
}

pub struct MappedFile {
    view: View,
}

impl MappedFile {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(BrcError::MissingInput {
                path: path.to_path_buf(),
            });
        }

        let file = File::open(path).map_err(|e| BrcError::io(path, e))?;
        let len = file.metadata().map_err(|e| BrcError::io(path, e))?.len();
        if len == 0 {
            warn!("{} is empty, nothing to map", path.display());
            return Ok(MappedFile {
                view: View::Buffered(Vec::new()),
            });
        }

        // SAFETY: the mapping is read-only and the input is assumed not to be
        // modified while a run holds it.
        let mmap = unsafe { Mmap::map(&file) }.map_err(|e| BrcError::io(path, e))?;
        debug!("mapped {} ({} bytes)", path.display(), mmap.len());
        Ok(MappedFile {
            view: View::Mapped(mmap),
        })
    }

    pub fn bytes(&self) -> &[u8] {
        match &self.view {
            View::Mapped(mmap) => &mmap[..],
            View::Buffered(buf) => &buf[..],
        }
    }

    pub fn len(&self) -> u64 {
        self.bytes().len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes().is_empty()
    }

    /// Drops the view. Unmapping errors are not surfaced by `memmap2`.
    pub fn release(self) {
        let len = self.len();
        drop(self.view);
        debug!("released input view ({} bytes)", len);
    }
}
