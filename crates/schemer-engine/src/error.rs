//! `schemer-engine`'s own error type: wraps the one thing this crate adds
//! on top of `schemer_heap::SchemeError` — failures reading a source file
//! off disk before it ever reaches the reader.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Scheme(#[from] schemer_heap::SchemeError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
