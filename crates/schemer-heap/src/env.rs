//! Lexical environments: a chain of mutable binding frames, looked up
//! outward from the innermost frame to the top level.
//!
//! Adapted from a compile-time, index-addressed rib chain to a runtime,
//! `Rc`-addressed one: a Scheme `lambda` extends its closed-over
//! environment with one frame per call rather than resolving offsets at
//! compile time, so frames need to be individually shareable and
//! garbage-collectible once their last closure drops.

use rustc_hash::FxHashMap;
use schemer_util::Symbol;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::{Result, SchemeError};
use crate::value::Value;

pub struct EnvData {
    bindings: RefCell<FxHashMap<Symbol, Value>>,
    parent: Option<EnvHandle>,
    frozen: Cell<bool>,
}

/// A shared handle to one environment frame. Cloning an `EnvHandle` is a
/// refcount bump, not a copy of the bindings: closures, the REPL's
/// top-level environment, and `scheme-report-environment` snapshots all
/// alias the same frame this way.
pub type EnvHandle = Rc<EnvData>;

impl EnvData {
    /// A fresh, empty top-level environment with no parent.
    pub fn new_top_level() -> EnvHandle {
        Rc::new(EnvData {
            bindings: RefCell::new(FxHashMap::default()),
            parent: None,
            frozen: Cell::new(false),
        })
    }

    /// A new child frame extending `parent`, with `params` bound
    /// positionally to `args`. Callers are expected to have already
    /// checked arity against the procedure's [`crate::value::Formals`];
    /// this only zips the two together.
    pub fn extend(parent: &EnvHandle, params: &[Symbol], args: &[Value]) -> EnvHandle {
        let mut bindings = FxHashMap::default();
        bindings.reserve(params.len());
        for (param, arg) in params.iter().zip(args.iter()) {
            bindings.insert(*param, arg.clone());
        }
        Rc::new(EnvData {
            bindings: RefCell::new(bindings),
            parent: Some(Rc::clone(parent)),
            frozen: Cell::new(false),
        })
    }

    /// An empty child frame, for forms like `let` and `do` that build up
    /// their bindings one at a time rather than all at once.
    pub fn child(parent: &EnvHandle) -> EnvHandle {
        Rc::new(EnvData {
            bindings: RefCell::new(FxHashMap::default()),
            parent: Some(Rc::clone(parent)),
            frozen: Cell::new(false),
        })
    }

    /// Walk outward from this frame looking for `name`, following the
    /// chain through live `Rc` pointers rather than an index into a
    /// compile-time table.
    pub fn lookup(self: &EnvHandle, name: Symbol) -> Result<Value> {
        let mut frame = self;
        loop {
            if let Some(value) = frame.bindings.borrow().get(&name) {
                return Ok(value.clone());
            }
            match &frame.parent {
                Some(parent) => frame = parent,
                None => {
                    return Err(SchemeError::unbound_variable(name.as_str()));
                }
            }
        }
    }

    /// Bind `name` in this frame only, shadowing any outer binding.
    /// `define`'s semantics: always writes the current
    /// frame, never walks outward.
    pub fn define(&self, name: Symbol, value: Value) -> Result<()> {
        if self.frozen.get() {
            return Err(SchemeError::read_only(format!(
                "cannot define {} in a read-only environment",
                name.as_str()
            )));
        }
        self.bindings.borrow_mut().insert(name, value);
        Ok(())
    }

    /// `set!`'s semantics: walk outward for an existing binding and
    /// mutate it in place; unlike `define`, it is an error if none of the
    /// frames up to the top level already bind `name`.
    pub fn assign(self: &EnvHandle, name: Symbol, value: Value) -> Result<()> {
        let mut frame = self;
        loop {
            if frame.frozen.get() && frame.bindings.borrow().contains_key(&name) {
                return Err(SchemeError::read_only(format!(
                    "cannot set! {} in a read-only environment",
                    name.as_str()
                )));
            }
            if let Some(slot) = frame.bindings.borrow_mut().get_mut(&name) {
                *slot = value;
                return Ok(());
            }
            match &frame.parent {
                Some(parent) => frame = parent,
                None => return Err(SchemeError::unbound_variable(name.as_str())),
            }
        }
    }

    pub fn is_bound(self: &EnvHandle, name: Symbol) -> bool {
        self.lookup(name).is_ok()
    }

    /// Used for `scheme-report-environment` and `null-environment`:
    /// once frozen, `define`/`set!` against bindings present at freeze
    /// time fail with `ReadOnly` rather than silently shadowing the
    /// standard library.
    pub fn freeze(&self) {
        self.frozen.set(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(name: &str) -> Symbol {
        Symbol::intern(name)
    }

    #[test]
    fn lookup_walks_outward_to_parent() {
        let top = EnvData::new_top_level();
        top.define(sym("x"), Value::Int(1)).unwrap();
        let child = EnvData::child(&top);
        assert!(matches!(child.lookup(sym("x")), Ok(Value::Int(1))));
    }

    #[test]
    fn define_only_touches_current_frame() {
        let top = EnvData::new_top_level();
        let child = EnvData::child(&top);
        child.define(sym("y"), Value::Int(2)).unwrap();
        assert!(top.lookup(sym("y")).is_err());
    }

    #[test]
    fn assign_requires_an_existing_binding() {
        let top = EnvData::new_top_level();
        assert!(top.assign(sym("z"), Value::Int(3)).is_err());
        top.define(sym("z"), Value::Int(3)).unwrap();
        assert!(top.assign(sym("z"), Value::Int(4)).is_ok());
    }

    #[test]
    fn assign_mutates_the_defining_frame_not_a_shadow() {
        let top = EnvData::new_top_level();
        top.define(sym("x"), Value::Int(1)).unwrap();
        let child = EnvData::child(&top);
        child.assign(sym("x"), Value::Int(99)).unwrap();
        assert!(matches!(top.lookup(sym("x")), Ok(Value::Int(99))));
    }

    #[test]
    fn frozen_environment_rejects_define() {
        let top = EnvData::new_top_level();
        top.define(sym("x"), Value::Int(1)).unwrap();
        top.freeze();
        assert!(top.define(sym("y"), Value::Int(2)).is_err());
        assert!(top.assign(sym("x"), Value::Int(2)).is_err());
    }
}
