//! String and character literal lexing.

use super::core::Lexer;
use crate::token::Token;

impl Lexer<'_> {
    /// `"`-delimited string literal. Recognizes `\\` and `\"`; any other
    /// backslash is silently dropped.
    pub(super) fn lex_string(&mut self) -> Token {
        self.cursor.advance(); // opening quote
        let mut bytes = Vec::new();
        loop {
            if self.cursor.is_at_end() {
                self.report_error("unterminated string literal".to_string());
                return Token::Invalid(String::from_utf8_lossy(&bytes).into_owned());
            }
            match self.cursor.current_char() {
                '"' => {
                    self.cursor.advance();
                    break;
                }
                '\\' => {
                    self.cursor.advance();
                    match self.cursor.current_char() {
                        '\\' => bytes.push(b'\\'),
                        '"' => bytes.push(b'"'),
                        // Any other backslash is silently dropped; only the
                        // character it precedes is kept.
                        c if c != '\0' => {
                            let mut buf = [0u8; 4];
                            bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                        }
                        _ => {
                            self.report_error("unterminated string literal".to_string());
                            return Token::Invalid(String::from_utf8_lossy(&bytes).into_owned());
                        }
                    }
                    self.cursor.advance();
                }
                c => {
                    let mut buf = [0u8; 4];
                    bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                    self.cursor.advance();
                }
            }
        }
        Token::Str(bytes)
    }

    /// `#\` followed by a single character or a name (`space`, `newline`;
    /// case-insensitive). Only ASCII is addressed directly; anything past a
    /// single codepoint after `#\` that isn't alphabetic is treated as the
    /// literal character (matching R5RS's "`#\` followed by a single
    /// character" fallback).
    pub(super) fn lex_char(&mut self) -> Token {
        self.cursor.advance_n(2); // consume "#\"
        if self.cursor.is_at_end() {
            self.report_error("unterminated character literal".to_string());
            return Token::Invalid("#\\".to_string());
        }

        let first = self.cursor.current_char();
        if first.is_ascii_alphabetic()
            && self.cursor.peek_char(1).is_ascii_alphabetic()
        {
            let start = self.cursor.position();
            while self.cursor.current_char().is_ascii_alphabetic() {
                self.cursor.advance();
            }
            let name = self.cursor.slice_from(start);
            return match name.to_ascii_lowercase().as_str() {
                "space" => Token::Char(b' '),
                "newline" => Token::Char(b'\n'),
                "tab" => Token::Char(b'\t'),
                "return" => Token::Char(b'\r'),
                "null" | "nul" => Token::Char(0),
                "delete" | "rubout" => Token::Char(0x7f),
                "backspace" => Token::Char(0x08),
                _ => {
                    self.report_error(format!("unknown character name '{name}'"));
                    Token::Invalid(name.to_string())
                }
            };
        }

        self.cursor.advance();
        if first.is_ascii() {
            Token::Char(first as u8)
        } else {
            // Non-ASCII codepoints don't fit the single-byte `Char` slot;
            // reported rather than silently truncated.
            self.report_error(format!("character literal '{first}' is not ASCII"));
            Token::Invalid(first.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::core::Lexer;
    use crate::token::Token;
    use schemer_util::diagnostic::Handler;
    use std::rc::Rc;

    fn lex_one(src: &str) -> Token {
        let handler = Handler::new();
        let mut lexer = Lexer::new(src, Rc::from("<test>"), &handler);
        lexer.next_token()
    }

    #[test]
    fn lexes_simple_string() {
        assert_eq!(lex_one("\"hi\""), Token::Str(b"hi".to_vec()));
    }

    #[test]
    fn lexes_string_with_escapes() {
        assert_eq!(lex_one("\"a\\\"b\\\\c\""), Token::Str(b"a\"b\\c".to_vec()));
    }

    #[test]
    fn unterminated_string_reports_error() {
        let handler = Handler::new();
        let mut lexer = Lexer::new("\"abc", Rc::from("<test>"), &handler);
        lexer.next_token();
        assert!(handler.has_errors());
    }

    #[test]
    fn lexes_named_characters() {
        assert_eq!(lex_one("#\\space"), Token::Char(b' '));
        assert_eq!(lex_one("#\\newline"), Token::Char(b'\n'));
    }

    #[test]
    fn lexes_literal_character() {
        assert_eq!(lex_one("#\\a"), Token::Char(b'a'));
    }
}
