//! schemer-engine — the embeddable facade over the reader and evaluator:
//! a `Session` that owns a named-source registry and the process heap's
//! root set, plus the two free functions a host uses to stand up a fresh
//! standard environment.
//!
//! Adapted from a multi-phase compilation driver down to a single
//! read/eval pair: this `Session` owns a `SourceMap` (from `schemer-util`)
//! and a `Heap`, and its "pipeline" is just `read` followed by `eval`.

pub mod error;

use std::path::Path;
use std::rc::Rc;

use schemer_heap::{EnvData, EnvHandle, Heap, Result as SchemeResult, Value};
use schemer_util::diagnostic::Handler;
use schemer_util::span::SourceMap;

pub use error::{EngineError, Result};

/// Installs the standard primitive library into `env`.
/// A thin, stably-named re-export of `schemer_eval::primitives::install_primitives`
/// so embedders never need to depend on `schemer-eval` directly for this.
pub fn load_primitives(env: &EnvHandle) {
    schemer_eval::primitives::install_primitives(env);
}

/// A fresh top-level environment with the standard library already
/// loaded — the starting point for both `schemert`'s REPL and any other
/// embedder.
pub fn make_top_level_env() -> EnvHandle {
    let env = EnvData::new_top_level();
    load_primitives(&env);
    env
}

/// One embedding session: a named-source registry (so error messages and
/// a REPL's history can refer to `<stdin>:12` the way a file-backed
/// session refers to `main.scm`) plus the heap's root set.
pub struct Session {
    sources: SourceMap,
    heap: Heap,
    next_anonymous: u32,
}

impl Session {
    pub fn new() -> Self {
        Self {
            sources: SourceMap::new(),
            heap: Heap::new(),
            next_anonymous: 0,
        }
    }

    /// Registers `content` under `name` (a real file path, or a synthetic
    /// name such as `<stdin>:3` for one REPL line) and parses it into
    /// zero or more top-level datums.
    pub fn read_named(&mut self, name: impl Into<Rc<str>>, content: impl Into<Rc<str>>) -> SchemeResult<Vec<Value>> {
        let name = self.sources.add(name, content);
        let file = self.sources.get(&name).expect("just inserted");
        tracing::trace!(file = %file.name, "reading source");
        let handler = Handler::new();
        let mut reader = schemer_reader::Reader::new(&file.content, file.name.clone(), &handler);
        reader.read_all()
    }

    /// Parses `text` under a synthetic, session-unique name.
    pub fn read(&mut self, text: &str) -> SchemeResult<Vec<Value>> {
        let name = format!("<session:{}>", self.next_anonymous);
        self.next_anonymous += 1;
        self.read_named(name, text.to_string())
    }

    /// Reads a file off disk and parses it, for `schemert run`/`schemert
    /// check`. Kept separate from [`Session::read`] since only this path
    /// can fail with an I/O error rather than a `SchemeError`.
    pub fn load_file(&mut self, path: &Path) -> Result<Vec<Value>> {
        let content = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path.display().to_string();
        Ok(self.read_named(name, content)?)
    }

    /// Evaluates one already-read datum against `env`.
    pub fn eval(&self, datum: &Value, env: &EnvHandle) -> SchemeResult<Value> {
        schemer_eval::eval(datum, env)
    }

    /// Pins `value` so it survives a subsequent [`Session::purge`] even
    /// if nothing else references it.
    pub fn root(&self, value: Value) -> schemer_heap::Root {
        self.heap.root(value)
    }

    /// Drops every root pinned via [`Session::root`] between top-level
    /// forms. Values still reachable from a live environment are
    /// unaffected — only host-pinned scratch values disappear.
    pub fn purge(&self) {
        self.heap.purge();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_then_eval_runs_a_simple_expression() {
        let mut session = Session::new();
        let env = make_top_level_env();
        let datums = session.read("(+ 1 2)").unwrap();
        assert_eq!(datums.len(), 1);
        let result = session.eval(&datums[0], &env).unwrap();
        assert!(matches!(result, Value::Int(3)));
    }

    #[test]
    fn read_accepts_multiple_top_level_forms() {
        let mut session = Session::new();
        let datums = session.read("(define x 1) (define y 2) (+ x y)").unwrap();
        assert_eq!(datums.len(), 3);
    }

    #[test]
    fn make_top_level_env_has_the_standard_library_bound() {
        let env = make_top_level_env();
        assert!(env.is_bound(schemer_util::Symbol::intern("car")));
        assert!(env.is_bound(schemer_util::Symbol::intern("+")));
    }

    #[test]
    fn purge_drops_host_pinned_roots_but_not_environment_bindings() {
        let mut session = Session::new();
        let env = make_top_level_env();
        let datums = session.read("(define kept 1)").unwrap();
        session.eval(&datums[0], &env).unwrap();
        let _root = session.root(Value::Int(99));
        session.purge();
        assert!(env.is_bound(schemer_util::Symbol::intern("kept")));
    }

    #[test]
    fn load_file_reads_and_parses_a_source_file() {
        let path = std::env::temp_dir().join(format!("schemer-engine-test-{:?}.scm", std::thread::current().id()));
        std::fs::write(&path, "(+ 1 2)").unwrap();
        let mut session = Session::new();
        let datums = session.load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(datums.len(), 1);
    }

    #[test]
    fn load_file_reports_missing_files_as_io_errors() {
        let mut session = Session::new();
        let missing = std::env::temp_dir().join("schemer-engine-definitely-missing.scm");
        assert!(matches!(session.load_file(&missing), Err(EngineError::Io { .. })));
    }
}
