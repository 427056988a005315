use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrcError {
    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("file {} does not exist, generate data first with --generate", path.display())]
    MissingInput { path: PathBuf },

    #[error("malformed number: {raw:?}")]
    MalformedValue { raw: String },

    #[error("worker count must be at least 1")]
    InvalidWorkerCount,

    #[error("building worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    #[error("worker {0} exited without reporting a result")]
    WorkerLost(usize),

    #[error("generating data: {message}")]
    Generate { message: String },
}

impl BrcError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        BrcError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(raw: &[u8]) -> Self {
        BrcError::MalformedValue {
            raw: String::from_utf8_lossy(raw).into_owned(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BrcError>;
