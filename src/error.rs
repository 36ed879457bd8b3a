use std::path::PathBuf;

use thiserror::Error;

/// Failure to read a dataset from disk.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot parse {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("no {0} found under the data directory")]
    NotFound(&'static str),
}
