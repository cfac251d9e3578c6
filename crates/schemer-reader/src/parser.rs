//! Recursive-descent parser over a [`Lexer`] token stream, producing
//! `Value` datums.

use std::rc::Rc;

use schemer_heap::{Result, SchemeError, Value};
use schemer_lex::{Lexer, NumberToken, Token};
use schemer_util::diagnostic::Handler;
use schemer_util::symbol::keywords;
use schemer_util::Span;

/// One reader session over a single source text. Holds one token of
/// lookahead, keeping `current`/`bump` rather than materializing the whole
/// token stream up front.
pub struct Reader<'a> {
    lexer: Lexer<'a>,
    current: (Token, Span),
}

impl<'a> Reader<'a> {
    pub fn new(source: &'a str, file: Rc<str>, handler: &'a Handler) -> Self {
        let mut lexer = Lexer::new(source, file, handler);
        let current = lexer.next_token_with_span();
        Self { lexer, current }
    }

    fn bump(&mut self) -> (Token, Span) {
        let next = self.lexer.next_token_with_span();
        std::mem::replace(&mut self.current, next)
    }

    /// Reads the next top-level datum, or `None` at a clean end-of-input.
    pub fn read_datum(&mut self) -> Result<Option<Value>> {
        if self.current.0.is_eof() {
            return Ok(None);
        }
        Ok(Some(self.parse_datum()?))
    }

    /// Reads every top-level datum in the source.
    pub fn read_all(&mut self) -> Result<Vec<Value>> {
        let mut out = Vec::new();
        while let Some(value) = self.read_datum()? {
            out.push(value);
        }
        Ok(out)
    }

    fn parse_datum(&mut self) -> Result<Value> {
        let (token, span) = self.bump();
        match token {
            Token::LParen => self.parse_list(span),
            Token::VectorOpen => self.parse_vector(span),
            Token::Quote => self.parse_abbreviation(keywords::quote()),
            Token::Quasiquote => self.parse_abbreviation(keywords::quasiquote()),
            Token::Unquote => self.parse_abbreviation(keywords::unquote()),
            Token::UnquoteSplicing => self.parse_abbreviation(keywords::unquote_splicing()),
            Token::Bool(b) => Ok(Value::Bool(b)),
            Token::Number(NumberToken::Int(n)) => Ok(Value::Int(n)),
            Token::Number(NumberToken::Float(f)) => Ok(Value::Float(f)),
            Token::Char(c) => Ok(Value::Char(c)),
            Token::Str(bytes) => Ok(Value::string(bytes)),
            Token::Ident(sym) => Ok(Value::Symbol(sym)),
            Token::Dot => Err(SchemeError::parse("unexpected '.' outside a list", span)),
            Token::RParen => Err(SchemeError::parse("unexpected ')'", span)),
            Token::Eof => Err(SchemeError::parse("unexpected end of input", span)),
            Token::Invalid(text) => {
                Err(SchemeError::lexical(format!("invalid token '{text}'"), span))
            }
        }
    }

    /// `'x` / `` `x `` / `,x` / `,@x` all desugar to a two-element list
    /// whose head is the corresponding keyword symbol.
    fn parse_abbreviation(&mut self, head: schemer_util::Symbol) -> Result<Value> {
        let inner = self.parse_datum()?;
        Ok(Value::from_vec(vec![Value::Symbol(head), inner]))
    }

    fn parse_list(&mut self, start_span: Span) -> Result<Value> {
        let mut items = Vec::new();
        loop {
            match &self.current.0 {
                Token::RParen => {
                    self.bump();
                    return Ok(Value::from_vec(items));
                }
                Token::Dot => {
                    self.bump();
                    let tail = self.parse_datum()?;
                    return match &self.current.0 {
                        Token::RParen => {
                            self.bump();
                            Ok(items
                                .into_iter()
                                .rev()
                                .fold(tail, |acc, item| Value::cons(item, acc)))
                        }
                        _ => Err(SchemeError::parse(
                            "malformed dotted list: expected ')' after the tail datum",
                            self.current.1.clone(),
                        )),
                    };
                }
                Token::Eof => {
                    return Err(SchemeError::parse("unterminated list", start_span));
                }
                _ => items.push(self.parse_datum()?),
            }
        }
    }

    fn parse_vector(&mut self, start_span: Span) -> Result<Value> {
        let mut items = Vec::new();
        loop {
            match &self.current.0 {
                Token::RParen => {
                    self.bump();
                    return Ok(Value::vector(items));
                }
                Token::Eof => {
                    return Err(SchemeError::parse("unterminated vector", start_span));
                }
                _ => items.push(self.parse_datum()?),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_one(src: &str) -> Value {
        let handler = Handler::new();
        let mut reader = Reader::new(src, Rc::from("<test>"), &handler);
        reader.read_datum().unwrap().unwrap()
    }

    #[test]
    fn reads_proper_list() {
        let v = read_one("(1 2 3)");
        assert_eq!(v.list_to_vec().unwrap().len(), 3);
    }

    #[test]
    fn reads_dotted_pair() {
        let v = read_one("(1 . 2)");
        assert!(matches!(v, Value::Pair(_)));
        assert!(v.list_to_vec().is_err());
    }

    #[test]
    fn expands_quote_abbreviation() {
        let v = read_one("'x");
        let items = v.list_to_vec().unwrap();
        assert_eq!(items.len(), 2);
        assert!(matches!(items[0], Value::Symbol(s) if s == keywords::quote()));
    }

    #[test]
    fn expands_unquote_splicing_abbreviation() {
        let v = read_one(",@xs");
        let items = v.list_to_vec().unwrap();
        assert!(matches!(items[0], Value::Symbol(s) if s == keywords::unquote_splicing()));
    }

    #[test]
    fn reads_vector() {
        let v = read_one("#(1 2 3)");
        assert!(matches!(v, Value::Vector(_)));
    }

    #[test]
    fn reads_nested_structures() {
        let v = read_one("(define (f x) (+ x 1))");
        assert_eq!(v.list_to_vec().unwrap().len(), 3);
    }

    #[test]
    fn empty_input_yields_no_datum() {
        let handler = Handler::new();
        let mut reader = Reader::new("   ", Rc::from("<test>"), &handler);
        assert!(reader.read_datum().unwrap().is_none());
    }

    #[test]
    fn malformed_dotted_list_is_an_error() {
        let handler = Handler::new();
        let mut reader = Reader::new("(1 . 2 3)", Rc::from("<test>"), &handler);
        assert!(reader.read_datum().is_err());
    }
}
