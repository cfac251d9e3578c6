//! The dispatch loop: self-evaluating kinds return
//! themselves, symbols resolve against the environment, pairs are either a
//! special form or a procedure application.
//!
//! Tail positions don't recurse into [`eval`] directly; they return
//! [`Flow::Tail`], which the loop in `eval` re-enters without growing the
//! Rust call stack. This is what lets a `letrec`-bound pair of mutually
//! tail-recursive procedures run forever instead of
//! overflowing.

use schemer_heap::{EnvHandle, Result, SchemeError, Value};

use crate::apply::apply_tail;
use crate::special_forms::dispatch_special_form;

/// The result of one dispatch step: either a finished value, or a marker
/// telling the trampoline in [`eval`] what to evaluate next in the same
/// "stack frame".
pub(crate) enum Flow {
    Done(Value),
    Tail(Value, EnvHandle),
}

/// Evaluate `expr` in `env`, running the tail-call trampoline until a
/// non-tail result is produced.
pub fn eval(expr: &Value, env: &EnvHandle) -> Result<Value> {
    let mut expr = expr.clone();
    let mut env = env.clone();
    loop {
        match eval_step(&expr, &env)? {
            Flow::Done(value) => return Ok(value),
            Flow::Tail(next_expr, next_env) => {
                expr = next_expr;
                env = next_env;
            }
        }
    }
}

pub(crate) fn eval_step(expr: &Value, env: &EnvHandle) -> Result<Flow> {
    match expr {
        Value::Symbol(sym) => Ok(Flow::Done(env.lookup(*sym)?)),
        Value::Pair(pair) => {
            let head = pair.car.borrow().clone();
            let rest = pair.cdr.borrow().clone();
            if let Value::Symbol(sym) = head {
                if let Some(flow) = dispatch_special_form(sym, &rest, env)? {
                    return Ok(flow);
                }
            }
            let callee = eval(&head, env)?;
            let args = eval_args(&rest, env)?;
            apply_tail(callee, args)
        }
        Value::EmptyList
        | Value::Bool(_)
        | Value::Char(_)
        | Value::Int(_)
        | Value::Float(_)
        | Value::Str(_)
        | Value::Vector(_)
        | Value::Procedure(_)
        | Value::Environment(_)
        | Value::Promise(_) => Ok(Flow::Done(expr.clone())),
    }
}

/// Evaluates each element of a proper list left-to-right, producing the
/// evaluated argument vector for a procedure application.
pub(crate) fn eval_args(list: &Value, env: &EnvHandle) -> Result<Vec<Value>> {
    let items = list
        .list_to_vec()
        .map_err(|_| SchemeError::eval_error("improper list in application"))?;
    items.iter().map(|item| eval(item, env)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemer_heap::EnvData;

    #[test]
    fn self_evaluating_values_return_themselves() {
        let env = EnvData::new_top_level();
        assert!(matches!(eval(&Value::Int(5), &env), Ok(Value::Int(5))));
        assert!(matches!(eval(&Value::Bool(true), &env), Ok(Value::Bool(true))));
    }

    #[test]
    fn symbol_lookup_resolves_through_environment() {
        let env = EnvData::new_top_level();
        env.define(schemer_util::Symbol::intern("x"), Value::Int(42))
            .unwrap();
        let result = eval(&Value::symbol("x"), &env).unwrap();
        assert!(matches!(result, Value::Int(42)));
    }

    #[test]
    fn unbound_symbol_is_an_error() {
        let env = EnvData::new_top_level();
        assert!(eval(&Value::symbol("undefined"), &env).is_err());
    }
}
