//! Diagnostic reporting: errors, warnings, and the [`Handler`] that collects
//! them over the lifetime of one read-eval cycle.
//!
//! ```
//! use schemer_util::diagnostic::{Handler, Level};
//! use schemer_util::span::Span;
//!
//! let handler = Handler::new();
//! handler.build_error(Span::dummy(), "unexpected token").emit(&handler);
//! assert_eq!(handler.error_count(), 1);
//! ```

mod builder;
mod codes;
mod level;

pub use builder::{DiagnosticBuilder, SourceSnippet};
pub use codes::{
    DiagnosticCode, E_EVAL_ARITHMETIC_ERROR, E_EVAL_ARITY_ERROR, E_EVAL_READ_ONLY,
    E_EVAL_TYPE_ERROR, E_EVAL_UNBOUND_VARIABLE, E_LEXER_INVALID_NUMBER,
    E_LEXER_UNEXPECTED_CHAR, E_LEXER_UNKNOWN_HASH, E_LEXER_UNTERMINATED_STRING,
    E_PARSER_BAD_CLAUSE, E_PARSER_BAD_DOTTED_LIST, E_PARSER_UNEXPECTED_EOF,
    E_PARSER_UNEXPECTED_TOKEN,
};
pub use level::Level;

use crate::span::Span;
use std::cell::RefCell;

/// One error, warning, note, or help message with an attached location.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub span: Span,
    pub code: Option<DiagnosticCode>,
    pub notes: Vec<String>,
    pub helps: Vec<String>,
    pub snippets: Vec<SourceSnippet>,
}

impl Diagnostic {
    pub fn new(level: Level, message: impl Into<String>, span: Span) -> Self {
        Self {
            level,
            message: message.into(),
            span,
            code: None,
            notes: Vec::new(),
            helps: Vec::new(),
            snippets: Vec::new(),
        }
    }

    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Error, message, span)
    }

    pub fn warning(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Warning, message, span)
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.span, self.message)?;
        if let Some(code) = &self.code {
            write!(f, " [{code}]")?;
        }
        Ok(())
    }
}

/// Collects diagnostics emitted over the course of one lexing/parsing pass.
/// Shared by reference (`&Handler`, not `&mut Handler`) since every lexer
/// and parser method needs to report without taking exclusive access to the
/// rest of its owning struct, backed by a `RefCell`.
pub struct Handler {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl Handler {
    pub fn new() -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
        }
    }

    pub fn emit_diagnostic(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    pub fn build_error(&self, span: Span, message: impl Into<String>) -> DiagnosticBuilder {
        DiagnosticBuilder::error(message).span(span)
    }

    pub fn build_warning(&self, span: Span, message: impl Into<String>) -> DiagnosticBuilder {
        DiagnosticBuilder::warning(message).span(span)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.borrow().iter().any(|d| d.level == Level::Error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level == Level::Error)
            .count()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    pub fn clear(&self) {
        self.diagnostics.borrow_mut().clear();
    }
}

impl Default for Handler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_handler_has_no_errors() {
        let handler = Handler::new();
        assert!(!handler.has_errors());
        assert_eq!(handler.error_count(), 0);
    }

    #[test]
    fn emitting_an_error_is_counted() {
        let handler = Handler::new();
        handler.build_error(Span::dummy(), "oops").emit(&handler);
        assert!(handler.has_errors());
        assert_eq!(handler.error_count(), 1);
    }

    #[test]
    fn warnings_do_not_count_as_errors() {
        let handler = Handler::new();
        handler.build_warning(Span::dummy(), "unused").emit(&handler);
        assert!(!handler.has_errors());
    }

    #[test]
    fn clear_removes_all_diagnostics() {
        let handler = Handler::new();
        handler.build_error(Span::dummy(), "oops").emit(&handler);
        handler.clear();
        assert_eq!(handler.error_count(), 0);
    }
}
