//! Lexer module.
//!
//! Split across a few files by concern:
//! - `core` — the `Lexer` struct, its dispatch, and whitespace/comment skip
//! - `identifier` — identifiers, peculiar identifiers, and `#t`/`#f`
//! - `number` — numeric literals (radix/exactness prefixes, int vs. real)
//! - `string_char` — string and character literals

mod core;
mod identifier;
mod number;
mod string_char;

pub use core::Lexer;
