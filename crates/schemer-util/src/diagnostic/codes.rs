//! Stable diagnostic codes, grouped by the phase that raises them. The
//! `E####`/`W####` numbering convention means a code printed in a message
//! can be grepped straight back to this file.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiagnosticCode {
    pub number: u32,
    pub name: &'static str,
}

impl DiagnosticCode {
    pub const fn new(number: u32, name: &'static str) -> Self {
        Self { number, name }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.number)
    }
}

pub const E_LEXER_UNEXPECTED_CHAR: DiagnosticCode = DiagnosticCode::new(1001, "lexer_unexpected_char");
pub const E_LEXER_UNTERMINATED_STRING: DiagnosticCode = DiagnosticCode::new(1002, "lexer_unterminated_string");
pub const E_LEXER_INVALID_NUMBER: DiagnosticCode = DiagnosticCode::new(1003, "lexer_invalid_number");
pub const E_LEXER_UNKNOWN_HASH: DiagnosticCode = DiagnosticCode::new(1004, "lexer_unknown_hash_prefix");

pub const E_PARSER_UNEXPECTED_TOKEN: DiagnosticCode = DiagnosticCode::new(2001, "parser_unexpected_token");
pub const E_PARSER_UNEXPECTED_EOF: DiagnosticCode = DiagnosticCode::new(2002, "parser_unexpected_eof");
pub const E_PARSER_BAD_DOTTED_LIST: DiagnosticCode = DiagnosticCode::new(2003, "parser_bad_dotted_list");
pub const E_PARSER_BAD_CLAUSE: DiagnosticCode = DiagnosticCode::new(2004, "parser_bad_clause");

pub const E_EVAL_UNBOUND_VARIABLE: DiagnosticCode = DiagnosticCode::new(3001, "eval_unbound_variable");
pub const E_EVAL_TYPE_ERROR: DiagnosticCode = DiagnosticCode::new(3002, "eval_type_error");
pub const E_EVAL_ARITY_ERROR: DiagnosticCode = DiagnosticCode::new(3003, "eval_arity_error");
pub const E_EVAL_ARITHMETIC_ERROR: DiagnosticCode = DiagnosticCode::new(3004, "eval_arithmetic_error");
pub const E_EVAL_READ_ONLY: DiagnosticCode = DiagnosticCode::new(3005, "eval_read_only");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_leading_zeroes() {
        assert_eq!(E_LEXER_UNEXPECTED_CHAR.to_string(), "E1001");
    }
}
