//! The single error family used throughout the interpreter: one
//! `thiserror` enum discriminated by kind, each variant carrying the
//! [`Span`] of the form that triggered it when one is available.

use schemer_util::diagnostic::DiagnosticCode;
use schemer_util::Span;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemeError {
    #[error("{span}: lexical error: {message}")]
    Lexical { message: String, span: Span },

    #[error("{span}: parse error: {message}")]
    Parse { message: String, span: Span },

    #[error("unbound variable: {name}")]
    UnboundVariable { name: String },

    #[error("type error: {message}")]
    Type { message: String },

    #[error("arity error: {message}")]
    Arity { message: String },

    #[error("arithmetic error: {message}")]
    Arithmetic { message: String },

    #[error("read-only: {message}")]
    ReadOnly { message: String },

    #[error("evaluation error: {message}")]
    Eval { message: String },
}

impl SchemeError {
    pub fn unbound_variable(name: impl Into<String>) -> Self {
        SchemeError::UnboundVariable { name: name.into() }
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        SchemeError::Type { message: message.into() }
    }

    pub fn arity_error(message: impl Into<String>) -> Self {
        SchemeError::Arity { message: message.into() }
    }

    pub fn arithmetic_error(message: impl Into<String>) -> Self {
        SchemeError::Arithmetic { message: message.into() }
    }

    pub fn read_only(message: impl Into<String>) -> Self {
        SchemeError::ReadOnly { message: message.into() }
    }

    pub fn eval_error(message: impl Into<String>) -> Self {
        SchemeError::Eval { message: message.into() }
    }

    pub fn lexical(message: impl Into<String>, span: Span) -> Self {
        SchemeError::Lexical { message: message.into(), span }
    }

    pub fn parse(message: impl Into<String>, span: Span) -> Self {
        SchemeError::Parse { message: message.into(), span }
    }

    /// The stable diagnostic code for this error's kind, used when a
    /// [`Handler`](schemer_util::diagnostic::Handler) renders it.
    pub fn code(&self) -> DiagnosticCode {
        use schemer_util::diagnostic::*;
        match self {
            SchemeError::Lexical { .. } => E_LEXER_UNEXPECTED_CHAR,
            SchemeError::Parse { .. } => E_PARSER_UNEXPECTED_TOKEN,
            SchemeError::UnboundVariable { .. } => E_EVAL_UNBOUND_VARIABLE,
            SchemeError::Type { .. } => E_EVAL_TYPE_ERROR,
            SchemeError::Arity { .. } => E_EVAL_ARITY_ERROR,
            SchemeError::Arithmetic { .. } => E_EVAL_ARITHMETIC_ERROR,
            SchemeError::ReadOnly { .. } => E_EVAL_READ_ONLY,
            SchemeError::Eval { .. } => E_EVAL_TYPE_ERROR,
        }
    }
}

pub type Result<T> = std::result::Result<T, SchemeError>;
