//! Numeric literal lexing: radix prefixes (`#b`/`#o`/`#d`/`#x`), exactness
//! prefixes (`#e`/`#i`), signed integers, and reals with a fractional part
//! and/or an exponent marker (`e`/`s`/`f`/`d`/`l`, all double precision).

use super::core::Lexer;
use crate::token::{NumberToken, Token};

fn is_digit_or_wildcard(c: char, radix: u32) -> bool {
    c == '#' || c.is_digit(radix)
}

impl Lexer<'_> {
    /// Consumes one numeric literal. Called only when the dispatch in
    /// `core` has already confirmed the current position starts a number
    /// (a digit, a radix/exactness `#` prefix, or a sign/dot that looks
    /// ahead into a digit).
    pub(super) fn lex_number(&mut self) -> Token {
        let start = self.cursor.position();
        let mut radix: u32 = 10;
        let mut exactness: Option<bool> = None;

        loop {
            if self.cursor.current_char() != '#' {
                break;
            }
            match self.cursor.peek_char(1).to_ascii_lowercase() {
                'b' => {
                    radix = 2;
                    self.cursor.advance_n(2);
                }
                'o' => {
                    radix = 8;
                    self.cursor.advance_n(2);
                }
                'd' => {
                    radix = 10;
                    self.cursor.advance_n(2);
                }
                'x' => {
                    radix = 16;
                    self.cursor.advance_n(2);
                }
                'e' => {
                    exactness = Some(true);
                    self.cursor.advance_n(2);
                }
                'i' => {
                    exactness = Some(false);
                    self.cursor.advance_n(2);
                }
                _ => break,
            }
        }

        let negative = match self.cursor.current_char() {
            '+' => {
                self.cursor.advance();
                false
            }
            '-' => {
                self.cursor.advance();
                true
            }
            _ => false,
        };

        let mut forced_inexact = false;
        let mut int_digits = String::new();
        while is_digit_or_wildcard(self.cursor.current_char(), radix) {
            let c = self.cursor.current_char();
            if c == '#' {
                forced_inexact = true;
                int_digits.push('0');
            } else {
                int_digits.push(c);
            }
            self.cursor.advance();
        }

        let mut is_real = false;
        let mut frac_digits = String::new();
        if radix == 10 && self.cursor.current_char() == '.' {
            is_real = true;
            self.cursor.advance();
            while is_digit_or_wildcard(self.cursor.current_char(), 10) {
                let c = self.cursor.current_char();
                if c == '#' {
                    forced_inexact = true;
                    frac_digits.push('0');
                } else {
                    frac_digits.push(c);
                }
                self.cursor.advance();
            }
        }

        let mut exponent = String::new();
        let marker = self.cursor.current_char().to_ascii_lowercase();
        if radix == 10
            && matches!(marker, 'e' | 's' | 'f' | 'd' | 'l')
            && (self.cursor.peek_char(1).is_ascii_digit()
                || matches!(self.cursor.peek_char(1), '+' | '-'))
        {
            is_real = true;
            self.cursor.advance();
            if matches!(self.cursor.current_char(), '+' | '-') {
                exponent.push(self.cursor.current_char());
                self.cursor.advance();
            }
            while self.cursor.current_char().is_ascii_digit() {
                exponent.push(self.cursor.current_char());
                self.cursor.advance();
            }
        }

        if int_digits.is_empty() && frac_digits.is_empty() {
            let text = self.cursor.slice_from(start).to_string();
            self.report_error(format!("malformed number literal '{text}'"));
            return Token::Invalid(text);
        }

        // The `#` wildcard digit forces inexactness regardless of an
        // explicit `#e` prefix; an explicit `#i` or a
        // fractional/exponent form also forces it.
        let inexact = forced_inexact || is_real || exactness == Some(false);

        if !inexact {
            match i64::from_str_radix(&int_digits, radix) {
                Ok(magnitude) => {
                    let value = if negative { -magnitude } else { magnitude };
                    return Token::Number(NumberToken::Int(value));
                }
                Err(_) => {
                    // Overflows an i64: fall through to float representation
                    // rather than losing the literal entirely.
                }
            }
        }

        let mut text = String::new();
        if negative {
            text.push('-');
        }
        if int_digits.is_empty() {
            text.push('0');
        } else {
            text.push_str(&int_digits);
        }
        if is_real {
            text.push('.');
            if frac_digits.is_empty() {
                text.push('0');
            } else {
                text.push_str(&frac_digits);
            }
            if !exponent.is_empty() {
                text.push('e');
                text.push_str(&exponent);
            }
        }
        match text.parse::<f64>() {
            Ok(value) => Token::Number(NumberToken::Float(value)),
            Err(_) => {
                let raw = self.cursor.slice_from(start).to_string();
                self.report_error(format!("malformed number literal '{raw}'"));
                Token::Invalid(raw)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::core::Lexer;
    use crate::token::{NumberToken, Token};
    use schemer_util::diagnostic::Handler;
    use std::rc::Rc;

    fn lex_one(src: &str) -> Token {
        let handler = Handler::new();
        let mut lexer = Lexer::new(src, Rc::from("<test>"), &handler);
        lexer.next_token()
    }

    #[test]
    fn lexes_plain_integer() {
        assert_eq!(lex_one("42"), Token::Number(NumberToken::Int(42)));
    }

    #[test]
    fn lexes_negative_integer() {
        assert_eq!(lex_one("-7"), Token::Number(NumberToken::Int(-7)));
    }

    #[test]
    fn lexes_leading_dot_real() {
        assert_eq!(lex_one(".3"), Token::Number(NumberToken::Float(0.3)));
    }

    #[test]
    fn lexes_trailing_dot_real() {
        assert_eq!(lex_one("3."), Token::Number(NumberToken::Float(3.0)));
    }

    #[test]
    fn lexes_exponent_real() {
        assert_eq!(lex_one("1e10"), Token::Number(NumberToken::Float(1e10)));
    }

    #[test]
    fn lexes_hex_radix() {
        assert_eq!(lex_one("#xFF"), Token::Number(NumberToken::Int(255)));
    }

    #[test]
    fn wildcard_digit_forces_inexact() {
        assert!(matches!(lex_one("4##"), Token::Number(NumberToken::Float(_))));
    }

    #[test]
    fn explicit_exactness_prefix_is_honored() {
        assert_eq!(lex_one("#e5"), Token::Number(NumberToken::Int(5)));
        assert!(matches!(lex_one("#i5"), Token::Number(NumberToken::Float(_))));
    }
}
