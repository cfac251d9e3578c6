//! Source position tracking.

mod source_map;

use std::fmt;
use std::rc::Rc;

pub use source_map::{SourceFile, SourceMap};

/// A `(filename, line, column)` record attached to every token and carried
/// on runtime errors that originate from the reader.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Span {
    pub file: Rc<str>,
    pub line: u32,
    pub column: u32,
}

impl Span {
    pub fn new(file: Rc<str>, line: u32, column: u32) -> Self {
        Self { file, line, column }
    }

    /// A span with no useful location, for values that were never read from
    /// source text (e.g. data constructed directly by a primitive).
    pub fn dummy() -> Self {
        Self {
            file: Rc::from("<unknown>"),
            line: 0,
            column: 0,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_as_file_line_column() {
        let span = Span::new(Rc::from("input.scm"), 3, 7);
        assert_eq!(span.to_string(), "input.scm:3:7");
    }
}
