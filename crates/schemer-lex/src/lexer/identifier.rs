//! Identifier lexing, including the peculiar identifiers `+`, `-`, `...`.

use schemer_util::Symbol;

use super::core::Lexer;
use crate::char_class::is_subsequent;
use crate::token::Token;

impl Lexer<'_> {
    /// Consumes one identifier lexeme. Called only when the current
    /// character is known (by the dispatch in `core`) to start a valid
    /// identifier: an `<initial>` character, a lone `+`/`-` followed by a
    /// non-numeric subsequent, or the leading `.` of `...`.
    pub(super) fn lex_identifier(&mut self) -> Token {
        let start = self.cursor.position();
        self.cursor.advance();
        while is_subsequent(self.cursor.current_char()) {
            self.cursor.advance();
        }
        let text = self.cursor.slice_from(start);
        Token::Ident(Symbol::intern(text))
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
    fn lexes_plain_identifier() {
        assert!(matches!(lex_one("foo-bar?"), Token::Ident(_)));
    }

    #[test]
    fn lexes_peculiar_plus_and_minus() {
        assert!(matches!(lex_one("+"), Token::Ident(_)));
        assert!(matches!(lex_one("-"), Token::Ident(_)));
    }

    #[test]
    fn lexes_ellipsis() {
        assert!(matches!(lex_one("..."), Token::Ident(_)));
    }
}
