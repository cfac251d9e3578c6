//! The process heap: a thin facade over allocation plus the root set used
//! to anchor top-level values against the `Rc` model's one sharp edge —
//! reference cycles.
//!
//! Values are managed by reference counting with explicit cycle breakage
//! rather than a tracing collector: every `Value` already drops its payload
//! the moment
//! its last `Rc` goes away, so there is no sweep phase to drive. What
//! remains for `Heap` to own is bookkeeping that doesn't fall out of
//! `Rc` alone — naming the roots that must outlive a single evaluation,
//! and `purge`, an escape hatch for programs (or the REPL's `,reset`
//! command) that want to explicitly drop every root and break any cycles
//! a user built with `set-car!`/`set-cdr!`.

use std::cell::RefCell;

use crate::value::Value;

/// A named GC root: as long as a `Root` is alive, the `Value` subgraph it
/// holds cannot be collected, even though nothing else in the program
/// references it yet (for example, a `define`d top-level binding should
/// never disappear just because no expression is currently evaluating
/// it — `Environment` frames already hold their own bindings, so in
/// practice a `Root` is mostly useful for host-side values the embedder
/// wants to pin, such as the value most recently printed at a REPL
/// prompt).
#[derive(Clone)]
pub struct Root {
    value: Value,
}

impl Root {
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }
}

/// Tracks roots pinned outside any environment frame. `Heap` does not
/// allocate `Value`s itself — `Value::cons`/`Value::string`/`Value::vector`
/// and friends do that directly via `Rc::new` — it only tracks what must
/// not be collected.
#[derive(Default)]
pub struct Heap {
    roots: RefCell<Vec<Root>>,
}

impl Heap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self, value: Value) -> Root {
        let root = Root::new(value);
        self.roots.borrow_mut().push(root.clone());
        root
    }

    pub fn root_count(&self) -> usize {
        self.roots.borrow().len()
    }

    /// Drop every pinned root. Values still reachable from a live
    /// `Environment` survive; anything that was alive only because a
    /// `Root` held it becomes collectible as soon as its last `Rc`
    /// (including this one) drops. Cycles a user built through
    /// `set-car!`/`set-cdr!`/`vector-set!` are not found or broken here —
    /// that is the "explicit cycle breakage" the design leaves to the
    /// program.
    pub fn purge(&self) {
        let dropped = self.roots.borrow().len();
        self.roots.borrow_mut().clear();
        tracing::debug!(dropped, "purged heap roots");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rooting_a_value_keeps_it_tracked() {
        let heap = Heap::new();
        let _root = heap.root(Value::Int(1));
        assert_eq!(heap.root_count(), 1);
    }

    #[test]
    fn purge_drops_all_roots() {
        let heap = Heap::new();
        heap.root(Value::Int(1));
        heap.root(Value::Int(2));
        heap.purge();
        assert_eq!(heap.root_count(), 0);
    }
}
