//! ASCII character classes for the identifier and number grammars, named
//! after the `ASCII_LETTER`/`SPECIAL_INITIAL`/`ID_SUBSEQUENT` categories
//! R5RS uses to define them.

/// `<special initial>` — one of `! $ % & * / : < = > ? ^ _ ~`.
pub fn is_special_initial(c: char) -> bool {
    matches!(
        c,
        '!' | '$' | '%' | '&' | '*' | '/' | ':' | '<' | '=' | '>' | '?' | '^' | '_' | '~'
    )
}

/// `<initial>` — a letter or a special-initial character.
pub fn is_initial(c: char) -> bool {
    c.is_ascii_alphabetic() || is_special_initial(c)
}

/// `<subsequent>` — initial-set, digit, or one of `+ - . @`.
pub fn is_subsequent(c: char) -> bool {
    is_initial(c) || c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | '@')
}

/// A delimiter: whitespace, a paren, `"`, or `;` — the only characters
/// allowed to terminate a token without an intervening reader-prefix token.
pub fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '(' | ')' | '"' | ';' | '\0')
}

pub fn digit_value(c: char, radix: u32) -> Option<u32> {
    c.to_digit(radix)
}
