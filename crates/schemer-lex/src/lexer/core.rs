//! Core lexer implementation: the `Lexer` struct and its dispatch table.

use std::rc::Rc;

use schemer_util::diagnostic::{DiagnosticBuilder, Handler};
use schemer_util::Span;

use crate::char_class::is_initial;
use crate::cursor::Cursor;
use crate::token::Token;

/// Lexer for Scheme source text.
///
/// Transforms source code into a stream of [`Token`]s, skipping whitespace
/// and `;`-to-end-of-line comments. Errors (unterminated strings, unknown
/// `#`-prefixes, malformed numbers) are reported to `handler` and surfaced
/// in-band as `Token::Invalid`; `schemer-reader` is responsible for turning
/// those into a hard `SchemeError::Lexical`.
pub struct Lexer<'a> {
    pub(crate) cursor: Cursor<'a>,
    pub(crate) handler: &'a Handler,
    pub(crate) file: Rc<str>,
    pub(crate) token_start: usize,
    pub(crate) token_start_line: u32,
    pub(crate) token_start_column: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, file: Rc<str>, handler: &'a Handler) -> Self {
        Self {
            cursor: Cursor::new(source),
            handler,
            file,
            token_start: 0,
            token_start_line: 1,
            token_start_column: 1,
        }
    }

    /// Like [`Lexer::next_token`] but also returns the `Span` where the
    /// token started, for callers (the reader) that need to attach
    /// positions to parse errors.
    pub fn next_token_with_span(&mut self) -> (Token, Span) {
        let token = self.next_token();
        let span = self.current_span();
        (token, span)
    }

    /// Returns the next token from the source code.
    ///
    /// Skips whitespace and comments, records the token's start position,
    /// then dispatches on the current character.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();

        self.token_start = self.cursor.position();
        self.token_start_line = self.cursor.line();
        self.token_start_column = self.cursor.column();

        if self.cursor.is_at_end() {
            return Token::Eof;
        }

        match self.cursor.current_char() {
            '(' => {
                self.cursor.advance();
                Token::LParen
            }
            ')' => {
                self.cursor.advance();
                Token::RParen
            }
            '\'' => {
                self.cursor.advance();
                Token::Quote
            }
            '`' => {
                self.cursor.advance();
                Token::Quasiquote
            }
            ',' => {
                self.cursor.advance();
                if self.cursor.current_char() == '@' {
                    self.cursor.advance();
                    Token::UnquoteSplicing
                } else {
                    Token::Unquote
                }
            }
            '"' => self.lex_string(),
            '#' => self.lex_hash(),
            '.' => self.lex_dot_or_identifier(),
            c if c.is_ascii_digit() => self.lex_number(),
            c if c == '+' || c == '-' => self.lex_signed_token(),
            c if is_initial(c) => self.lex_identifier(),
            c => {
                self.report_error(format!("unexpected character '{c}'"));
                self.cursor.advance();
                Token::Invalid(c.to_string())
            }
        }
    }

    /// Dispatches the `#`-prefixed tokens: `#(`, `#t`/`#f`, `#\char`, and
    /// numeric radix/exactness prefixes (`#b`, `#o`, `#d`, `#x`, `#e`, `#i`).
    fn lex_hash(&mut self) -> Token {
        match self.cursor.peek_char(1) {
            '(' => {
                self.cursor.advance_n(2);
                Token::VectorOpen
            }
            't' | 'T' => {
                self.cursor.advance_n(2);
                Token::Bool(true)
            }
            'f' | 'F' => {
                self.cursor.advance_n(2);
                Token::Bool(false)
            }
            '\\' => self.lex_char(),
            'b' | 'B' | 'o' | 'O' | 'd' | 'D' | 'x' | 'X' | 'e' | 'E' | 'i' | 'I' => {
                self.lex_number()
            }
            other => {
                self.cursor.advance();
                self.report_error(format!("unknown # syntax '#{other}'"));
                Token::Invalid(format!("#{other}"))
            }
        }
    }

    /// `+`/`-` may start the peculiar identifiers `+`/`-`, a signed number,
    /// or (for `-`) nothing else valid — disambiguated by what follows.
    fn lex_signed_token(&mut self) -> Token {
        let next = self.cursor.peek_char(1);
        if next.is_ascii_digit() || next == '.' {
            self.lex_number()
        } else {
            self.lex_identifier()
        }
    }

    /// A lone `.` is the dotted-pair marker; a `.` followed by a digit
    /// begins a real literal (`.5`); anything else (chiefly `...`) is the
    /// peculiar identifier rule.
    fn lex_dot_or_identifier(&mut self) -> Token {
        let next = self.cursor.peek_char(1);
        if next.is_ascii_digit() {
            self.lex_number()
        } else if next == '\0' || crate::char_class::is_delimiter(next) {
            self.cursor.advance();
            Token::Dot
        } else {
            self.lex_identifier()
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            self.cursor.skip_whitespace();
            if self.cursor.current_char() == ';' {
                while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
                    self.cursor.advance();
                }
                continue;
            }
            break;
        }
    }

    pub(crate) fn current_span(&self) -> Span {
        Span::new(Rc::clone(&self.file), self.token_start_line, self.token_start_column)
    }

    pub(crate) fn report_error(&self, message: String) {
        DiagnosticBuilder::error(message)
            .span(self.current_span())
            .emit(self.handler);
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        if token.is_eof() {
            None
        } else {
            Some(token)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(src: &str) -> Vec<Token> {
        let handler = Handler::new();
        let mut lexer = Lexer::new(src, Rc::from("<test>"), &handler);
        let mut out = Vec::new();
        loop {
            let t = lexer.next_token();
            if t.is_eof() {
                break;
            }
            out.push(t);
        }
        out
    }

    #[test]
    fn lexes_parens_and_dot() {
        let toks = tokens("(a . b)");
        assert!(matches!(toks[0], Token::LParen));
        assert!(matches!(toks[2], Token::Dot));
        assert!(matches!(toks[4], Token::RParen));
    }

    #[test]
    fn lexes_quote_family() {
        assert!(matches!(tokens("'x")[0], Token::Quote));
        assert!(matches!(tokens("`x")[0], Token::Quasiquote));
        assert!(matches!(tokens(",x")[0], Token::Unquote));
        assert!(matches!(tokens(",@x")[0], Token::UnquoteSplicing));
    }

    #[test]
    fn lexes_vector_open() {
        assert!(matches!(tokens("#(1 2)")[0], Token::VectorOpen));
    }

    #[test]
    fn lexes_booleans() {
        assert!(matches!(tokens("#t")[0], Token::Bool(true)));
        assert!(matches!(tokens("#f")[0], Token::Bool(false)));
        assert!(matches!(tokens("#T")[0], Token::Bool(true)));
    }

    #[test]
    fn skips_line_comments() {
        let toks = tokens("; a comment\n42");
        assert_eq!(toks.len(), 1);
    }

    #[test]
    fn unknown_hash_reports_error() {
        let handler = Handler::new();
        let mut lexer = Lexer::new("#z", Rc::from("<test>"), &handler);
        lexer.next_token();
        assert!(handler.has_errors());
    }
}
