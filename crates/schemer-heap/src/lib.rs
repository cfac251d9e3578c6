//! schemer-heap — the `Value` tagged union, lexical environments, the
//! equivalence hierarchy, the `write`/`display` printer, and the process
//! heap's root set.
//!
//! This is the layer every other crate in the workspace builds on:
//! `schemer-lex` and `schemer-reader` produce `Value` datums,
//! `schemer-eval` evaluates them against an `EnvHandle`, and `schemert`
//! prints results back out through [`printer`].

pub mod env;
pub mod equality;
pub mod error;
pub mod heap;
pub mod printer;
pub mod value;

pub use env::{EnvData, EnvHandle};
pub use error::{Result, SchemeError};
pub use heap::{Heap, Root};
pub use printer::Human;
pub use value::{
    Formals, PairData, PrimitiveFn, ProcedureData, ProcedureHandle, PromiseData, PromiseHandle,
    StringData, Value, VectorData,
};
