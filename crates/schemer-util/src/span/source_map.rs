//! Loaded-file registry used by the CLI driver and by tests that need to
//! report errors against named, in-memory source text.

use crate::error::{SourceMapError, SourceMapResult};
use std::collections::HashMap;
use std::rc::Rc;

pub struct SourceFile {
    pub name: Rc<str>,
    pub content: Rc<str>,
}

/// Maps file names to their loaded content. Populated once per CLI
/// invocation (or once per REPL session, keyed by a synthetic name such as
/// `<stdin>:12`); never mutated after a file is added.
#[derive(Default)]
pub struct SourceMap {
    files: HashMap<Rc<str>, SourceFile>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: impl Into<Rc<str>>, content: impl Into<Rc<str>>) -> Rc<str> {
        let name = name.into();
        self.files.insert(
            name.clone(),
            SourceFile {
                name: name.clone(),
                content: content.into(),
            },
        );
        name
    }

    pub fn get(&self, name: &str) -> SourceMapResult<&SourceFile> {
        self.files
            .get(name)
            .ok_or_else(|| SourceMapError::FileNotFound(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_then_get_round_trips() {
        let mut map = SourceMap::new();
        map.add("a.scm", "(+ 1 2)");
        let file = map.get("a.scm").unwrap();
        assert_eq!(&*file.content, "(+ 1 2)");
    }

    #[test]
    fn missing_file_is_an_error() {
        let map = SourceMap::new();
        assert!(map.get("missing.scm").is_err());
    }
}
