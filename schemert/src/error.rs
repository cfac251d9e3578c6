//! Error handling for the `schemert` CLI.
//!
//! One leaf error type, following the same `thiserror` pattern as the
//! rest of the workspace; everything below the command layer returns
//! this, and the command layer itself reaches for `anyhow::Context`
//! when it needs to attach a message to an I/O or config failure.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemertError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Engine(#[from] schemer_engine::EngineError),
}

pub type Result<T> = std::result::Result<T, SchemertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = SchemertError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "configuration error: missing field");
    }

    #[test]
    fn engine_error_converts_via_from() {
        let engine_err = schemer_engine::EngineError::Io {
            path: PathBuf::from("/tmp/missing.scm"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let err: SchemertError = engine_err.into();
        assert!(matches!(err, SchemertError::Engine(_)));
    }
}
