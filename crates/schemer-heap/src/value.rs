//! The `Value` tagged union — the single representation for both reader
//! datums and runtime values.
//!
//! Compound kinds (`Pair`, `Vector`, `Str`, `Procedure`, `Environment`,
//! `Promise`) are `Rc`-wrapped cells; cloning a `Value` of one of these
//! kinds clones the `Rc`; `Rc::ptr_eq` on the two payloads is exactly what
//! `eq?` needs, given values are kept reference-counted rather than
//! garbage-collected. Atomic kinds (`EmptyList`,
//! `Bool`, `Char`, `Int`, `Float`, `Symbol`) are plain `Copy` payloads;
//! every occurrence of e.g. `Value::Bool(true)` is already "the same
//! singleton" under `==`, so no allocation is needed to satisfy identity
//! for them.

use crate::env::EnvHandle;
use schemer_util::Symbol;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::error::{Result, SchemeError};

/// A mutable cons cell.
pub struct PairData {
    pub car: RefCell<Value>,
    pub cdr: RefCell<Value>,
    mutable: Cell<bool>,
}

impl PairData {
    pub fn new(car: Value, cdr: Value) -> Self {
        Self {
            car: RefCell::new(car),
            cdr: RefCell::new(cdr),
            mutable: Cell::new(true),
        }
    }

    pub fn is_mutable(&self) -> bool {
        self.mutable.get()
    }

    pub fn freeze(&self) {
        self.mutable.set(false);
    }

    pub fn set_car(&self, value: Value) -> Result<()> {
        if !self.mutable.get() {
            return Err(SchemeError::read_only("set-car! on an immutable pair"));
        }
        *self.car.borrow_mut() = value;
        Ok(())
    }

    pub fn set_cdr(&self, value: Value) -> Result<()> {
        if !self.mutable.get() {
            return Err(SchemeError::read_only("set-cdr! on an immutable pair"));
        }
        *self.cdr.borrow_mut() = value;
        Ok(())
    }
}

/// A mutable vector of values.
pub struct VectorData {
    pub items: RefCell<Vec<Value>>,
    mutable: Cell<bool>,
}

impl VectorData {
    pub fn new(items: Vec<Value>) -> Self {
        Self {
            items: RefCell::new(items),
            mutable: Cell::new(true),
        }
    }

    pub fn freeze(&self) {
        self.mutable.set(false);
    }

    pub fn set(&self, index: usize, value: Value) -> Result<()> {
        if !self.mutable.get() {
            return Err(SchemeError::read_only("vector-set! on an immutable vector"));
        }
        let mut items = self.items.borrow_mut();
        let slot = items
            .get_mut(index)
            .ok_or_else(|| SchemeError::arithmetic_error("vector-set! index out of range"))?;
        *slot = value;
        Ok(())
    }
}

/// A mutable byte string. Bytes rather than `char`s: source text (and
/// therefore string contents) is treated as byte-oriented, passing high
/// bits through without classifying them.
pub struct StringData {
    pub bytes: RefCell<Vec<u8>>,
    mutable: Cell<bool>,
}

impl StringData {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes: RefCell::new(bytes),
            mutable: Cell::new(true),
        }
    }

    pub fn freeze(&self) {
        self.mutable.set(false);
    }

    pub fn set(&self, index: usize, byte: u8) -> Result<()> {
        if !self.mutable.get() {
            return Err(SchemeError::read_only("string-set! on an immutable string"));
        }
        let mut bytes = self.bytes.borrow_mut();
        let slot = bytes
            .get_mut(index)
            .ok_or_else(|| SchemeError::arithmetic_error("string-set! index out of range"))?;
        *slot = byte;
        Ok(())
    }

    pub fn as_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.bytes.borrow()).into_owned()
    }
}

/// How a `lambda` (or `define`-shorthand procedure) binds its arguments.
#[derive(Clone, Debug)]
pub enum Formals {
    /// `(lambda (a b c) ...)` — exactly this many arguments.
    Fixed(Vec<Symbol>),
    /// `(lambda (a b . rest) ...)` — at least this many, the remainder
    /// collected into `rest`.
    Rest(Vec<Symbol>, Symbol),
    /// `(lambda args ...)` — any number of arguments, collected into one
    /// list bound to `args`.
    Variadic(Symbol),
}

impl Formals {
    pub fn arity_description(&self) -> String {
        match self {
            Formals::Fixed(params) => format!("exactly {}", params.len()),
            Formals::Rest(params, _) => format!("at least {}", params.len()),
            Formals::Variadic(_) => "any number of".to_string(),
        }
    }
}

pub type PrimitiveFn = fn(&[Value]) -> Result<Value>;

/// A callable value: either a closure capturing a lexical environment, or a
/// primitive implemented in Rust.
pub enum ProcedureData {
    Closure {
        formals: Formals,
        body: Vec<Value>,
        env: EnvHandle,
        name: RefCell<Option<Symbol>>,
    },
    Primitive {
        name: &'static str,
        func: PrimitiveFn,
    },
}

pub type ProcedureHandle = Rc<ProcedureData>;

impl ProcedureData {
    pub fn name(&self) -> Option<Symbol> {
        match self {
            ProcedureData::Closure { name, .. } => *name.borrow(),
            ProcedureData::Primitive { name, .. } => Some(Symbol::intern(name)),
        }
    }
}

/// A `delay`ed computation: its thunk (the unevaluated expression plus the
/// environment it closed over) and, once forced, the memoized result.
///
/// `forcing` guards against the R5RS "re-entrant force" scenario: a
/// nested `force` on a promise already being forced must not deadlock or
/// recurse into storing a second result once the first completes.
pub struct PromiseData {
    pub thunk_expr: Value,
    pub thunk_env: EnvHandle,
    pub forcing: Cell<bool>,
    pub result: RefCell<Option<Value>>,
}

pub type PromiseHandle = Rc<PromiseData>;

/// The tagged union of every Scheme value kind.
#[derive(Clone)]
pub enum Value {
    EmptyList,
    Bool(bool),
    Char(u8),
    Int(i64),
    Float(f64),
    Str(Rc<StringData>),
    Symbol(Symbol),
    Pair(Rc<PairData>),
    Vector(Rc<VectorData>),
    Procedure(ProcedureHandle),
    Environment(EnvHandle),
    Promise(PromiseHandle),
}

impl Value {
    pub fn cons(car: Value, cdr: Value) -> Value {
        Value::Pair(Rc::new(PairData::new(car, cdr)))
    }

    pub fn string(text: impl Into<Vec<u8>>) -> Value {
        Value::Str(Rc::new(StringData::new(text.into())))
    }

    pub fn vector(items: Vec<Value>) -> Value {
        Value::Vector(Rc::new(VectorData::new(items)))
    }

    pub fn symbol(name: &str) -> Value {
        Value::Symbol(Symbol::intern(name))
    }

    pub fn is_false(&self) -> bool {
        matches!(self, Value::Bool(false))
    }

    pub fn is_true(&self) -> bool {
        !self.is_false()
    }

    pub fn is_pair(&self) -> bool {
        matches!(self, Value::Pair(_))
    }

    pub fn is_empty_list(&self) -> bool {
        matches!(self, Value::EmptyList)
    }

    /// True for every kind the reader can produce.
    /// `Procedure`, `Environment`, and `Promise` are runtime-only values.
    pub fn is_datum(&self) -> bool {
        !matches!(
            self,
            Value::Procedure(_) | Value::Environment(_) | Value::Promise(_)
        )
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::EmptyList => "empty-list",
            Value::Bool(_) => "boolean",
            Value::Char(_) => "character",
            Value::Int(_) => "integer",
            Value::Float(_) => "real",
            Value::Str(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::Pair(_) => "pair",
            Value::Vector(_) => "vector",
            Value::Procedure(_) => "procedure",
            Value::Environment(_) => "environment",
            Value::Promise(_) => "promise",
        }
    }

    /// Walk a proper list into a `Vec<Value>`. Errors if `self` is not a
    /// proper, non-circular list.
    pub fn list_to_vec(&self) -> Result<Vec<Value>> {
        let mut out = Vec::new();
        let mut cursor = self.clone();
        loop {
            match cursor {
                Value::EmptyList => return Ok(out),
                Value::Pair(pair) => {
                    out.push(pair.car.borrow().clone());
                    let next = pair.cdr.borrow().clone();
                    cursor = next;
                }
                _ => return Err(SchemeError::type_error("expected a proper list")),
            }
        }
    }

    pub fn from_vec(items: Vec<Value>) -> Value {
        items
            .into_iter()
            .rev()
            .fold(Value::EmptyList, |tail, head| Value::cons(head, tail))
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_to_vec_round_trips() {
        let list = Value::from_vec(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        let back = list.list_to_vec().unwrap();
        assert_eq!(back.len(), 3);
    }

    #[test]
    fn set_car_on_frozen_pair_fails() {
        let pair = Rc::new(PairData::new(Value::Int(1), Value::EmptyList));
        pair.freeze();
        assert!(pair.set_car(Value::Int(2)).is_err());
    }

    #[test]
    fn is_datum_excludes_runtime_only_kinds() {
        assert!(Value::Int(1).is_datum());
        assert!(Value::EmptyList.is_datum());
    }
}
