//! Symbol interning — compact, `eq?`-comparable handles to identifier text.
//!
//! A [`Symbol`] is a 4-byte handle into a process-wide string table. Two
//! symbols compare equal (by `==`, and therefore by the language's `eq?`)
//! exactly when they were interned from the same text, which is what gives
//! Scheme symbols their "same name implies same object" identity guarantee.
//!
//! ```
//! use schemer_util::symbol::Symbol;
//!
//! let a = Symbol::intern("lambda");
//! let b = Symbol::intern("lambda");
//! assert_eq!(a, b);
//! assert_ne!(a, Symbol::intern("quote"));
//! ```

mod interner;

use std::fmt;

pub use interner::table as string_table;

/// An interned identifier.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

impl Symbol {
    /// Intern `text`, returning the symbol for it. Interning the same text
    /// twice (from anywhere in the process) returns the same `Symbol`.
    pub fn intern(text: &str) -> Self {
        Symbol(interner::table().intern(text))
    }

    /// The text this symbol was interned from.
    pub fn as_str(&self) -> &'static str {
        interner::table()
            .resolve(self.0)
            .expect("Symbol constructed with a valid index always resolves")
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({:?})", self.as_str())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

macro_rules! well_known {
    ($($const_name:ident => $text:literal),+ $(,)?) => {
        /// Symbols for the special-form keywords and a handful of other
        /// names the evaluator needs to compare against by identity rather
        /// than by re-interning a literal on every dispatch.
        #[allow(non_upper_case_globals)]
        pub mod keywords {
            use super::Symbol;
            use std::sync::OnceLock;

            $(
                pub fn $const_name() -> Symbol {
                    static CELL: OnceLock<Symbol> = OnceLock::new();
                    *CELL.get_or_init(|| Symbol::intern($text))
                }
            )+
        }
    };
}

well_known! {
    quote => "quote",
    quasiquote => "quasiquote",
    unquote => "unquote",
    unquote_splicing => "unquote-splicing",
    if_ => "if",
    set_bang => "set!",
    define => "define",
    lambda => "lambda",
    begin => "begin",
    cond => "cond",
    case => "case",
    and => "and",
    or => "or",
    let_ => "let",
    let_star => "let*",
    letrec => "letrec",
    do_ => "do",
    delay => "delay",
    else_ => "else",
    arrow => "=>",
    define_syntax => "define-syntax",
    let_syntax => "let-syntax",
    letrec_syntax => "letrec-syntax",
    dot => ".",
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_same_text_yields_same_symbol() {
        let a = Symbol::intern("hello");
        let b = Symbol::intern("hello");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "hello");
    }

    #[test]
    fn different_text_yields_different_symbols() {
        assert_ne!(Symbol::intern("foo"), Symbol::intern("bar"));
    }

    #[test]
    fn keyword_symbols_are_stable() {
        assert_eq!(keywords::lambda(), Symbol::intern("lambda"));
        assert_eq!(keywords::lambda(), keywords::lambda());
    }
}
