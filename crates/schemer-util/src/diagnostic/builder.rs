use super::codes::DiagnosticCode;
use super::level::Level;
use super::{Diagnostic, Handler};
use crate::span::Span;

/// A source snippet attached to a diagnostic for display by the CLI.
#[derive(Clone, Debug)]
pub struct SourceSnippet {
    pub span: Span,
    pub line_text: String,
}

/// Fluent builder for [`Diagnostic`]s.
///
/// ```
/// use schemer_util::diagnostic::{DiagnosticBuilder, Handler};
/// use schemer_util::span::Span;
///
/// let handler = Handler::new();
/// DiagnosticBuilder::error("unbound variable: x")
///     .span(Span::dummy())
///     .help("did you forget a `define`?")
///     .emit(&handler);
/// assert!(handler.has_errors());
/// ```
pub struct DiagnosticBuilder {
    diagnostic: Diagnostic,
}

impl DiagnosticBuilder {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            diagnostic: Diagnostic::new(Level::Error, message, Span::dummy()),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            diagnostic: Diagnostic::new(Level::Warning, message, Span::dummy()),
        }
    }

    pub fn span(mut self, span: Span) -> Self {
        self.diagnostic.span = span;
        self
    }

    pub fn code(mut self, code: DiagnosticCode) -> Self {
        self.diagnostic.code = Some(code);
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.diagnostic.notes.push(note.into());
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.diagnostic.helps.push(help.into());
        self
    }

    pub fn snippet(mut self, snippet: SourceSnippet) -> Self {
        self.diagnostic.snippets.push(snippet);
        self
    }

    pub fn build(self) -> Diagnostic {
        self.diagnostic
    }

    pub fn emit(self, handler: &Handler) {
        handler.emit_diagnostic(self.build());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_a_fully_populated_diagnostic() {
        let diag = DiagnosticBuilder::error("bad token")
            .span(Span::dummy())
            .code(DiagnosticCode::new(1, "test"))
            .note("context")
            .help("fix it")
            .build();

        assert_eq!(diag.level, Level::Error);
        assert_eq!(diag.notes, vec!["context".to_string()]);
        assert_eq!(diag.helps, vec!["fix it".to_string()]);
        assert!(diag.code.is_some());
    }
}
