//! schemer-lex — the lexer for the `schemer` Scheme reader.
//!
//! Turns source text into a stream of [`token::Token`]s, tracking source
//! position through [`cursor::Cursor`] and reporting malformed input through
//! a `schemer_util::diagnostic::Handler`. Consumed by `schemer-reader`'s
//! recursive-descent parser.

pub mod char_class;
pub mod cursor;
mod lexer;
pub mod token;

pub use lexer::Lexer;
pub use token::{NumberToken, Token};
