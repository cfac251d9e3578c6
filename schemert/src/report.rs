//! Turns a `SchemeError` into terminal output: errors propagate out of
//! `eval` to the driver, which prints a message via the `Diagnostic`/
//! `Handler` machinery when a `Span` is available, or a plain message
//! otherwise.

use schemer_heap::SchemeError;
use schemer_util::diagnostic::Handler;
use schemer_util::span::Span;

/// Prints `err` to stderr and returns whether it carried a source span.
pub fn report_scheme_error(err: &SchemeError) -> bool {
    match span_of(err) {
        Some(span) => {
            let handler = Handler::new();
            handler
                .build_error(span, message_of(err))
                .code(err.code())
                .emit(&handler);
            for diag in handler.diagnostics() {
                eprintln!("error[{}]: {} ({})", diag.code.unwrap(), diag.message, diag.span);
            }
            true
        }
        None => {
            eprintln!("error: {err}");
            false
        }
    }
}

fn span_of(err: &SchemeError) -> Option<Span> {
    match err {
        SchemeError::Lexical { span, .. } | SchemeError::Parse { span, .. } => Some(span.clone()),
        _ => None,
    }
}

fn message_of(err: &SchemeError) -> String {
    match err {
        SchemeError::Lexical { message, .. } | SchemeError::Parse { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbound_variable_has_no_span() {
        let err = SchemeError::unbound_variable("x");
        assert!(span_of(&err).is_none());
    }

    #[test]
    fn parse_error_carries_its_span() {
        let span = Span::new(std::rc::Rc::from("<test>"), 3, 4);
        let err = SchemeError::parse("unexpected )", span.clone());
        assert_eq!(span_of(&err), Some(span));
    }
}
