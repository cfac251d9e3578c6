//! Leaf error types for `schemer-util`.
//!
//! These are intentionally narrow: each describes failures that can occur
//! within this crate alone. Higher layers (`schemer-heap`, `schemer-eval`,
//! ...) wrap these into their own error enums rather than propagating them
//! directly, so that a caller never needs to know this crate exists.

use thiserror::Error;

/// Errors from the symbol interner.
#[derive(Debug, Error)]
pub enum SymbolError {
    #[error("symbol not found: index {index}")]
    NotFound { index: u32 },
}

/// Errors from source map lookups.
#[derive(Debug, Error)]
pub enum SourceMapError {
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("invalid span: start {start} > end {end}")]
    InvalidSpan { start: usize, end: usize },

    #[error("span out of bounds: file has {file_len} bytes, span is {span_start}..{span_end}")]
    SpanOutOfBounds {
        file_len: usize,
        span_start: usize,
        span_end: usize,
    },
}

/// Errors from diagnostic construction.
#[derive(Debug, Error)]
pub enum DiagnosticError {
    #[error("invalid diagnostic code: {0}")]
    InvalidCode(String),
}

pub type SymbolResult<T> = std::result::Result<T, SymbolError>;
pub type SourceMapResult<T> = std::result::Result<T, SourceMapError>;
pub type DiagnosticResult<T> = std::result::Result<T, DiagnosticError>;
