//! Procedure application, `map`/`for-each`, and `force`.

use schemer_heap::{EnvHandle, PromiseData, Result, SchemeError, Value};

use super::bind;
use crate::apply::apply;

pub(super) fn install(env: &EnvHandle) {
    bind(env, "procedure?", procedure_p);
    bind(env, "apply", apply_primitive);
    bind(env, "map", map);
    bind(env, "for-each", for_each);
    bind(env, "force", force);
}

fn procedure_p(args: &[Value]) -> Result<Value> {
    match args {
        [v] => Ok(Value::Bool(matches!(v, Value::Procedure(_)))),
        _ => Err(SchemeError::arity_error("procedure? requires exactly 1 argument")),
    }
}

/// `(apply proc arg1 ... args)`: every argument but the last is passed
/// through directly, and the last is spread as a list of trailing
/// arguments.
fn apply_primitive(args: &[Value]) -> Result<Value> {
    let (callee, rest) = args
        .split_first()
        .ok_or_else(|| SchemeError::arity_error("apply requires at least 1 argument"))?;
    let (spread, leading) = rest
        .split_last()
        .ok_or_else(|| SchemeError::arity_error("apply requires at least 2 arguments"))?;
    let mut call_args = leading.to_vec();
    call_args.extend(spread.list_to_vec().map_err(|_| {
        SchemeError::type_error("apply: the last argument must be a proper list")
    })?);
    apply(callee.clone(), call_args)
}

/// `map` over one or more lists in lockstep, stopping at the shortest.
fn map(args: &[Value]) -> Result<Value> {
    let (callee, lists) = args
        .split_first()
        .ok_or_else(|| SchemeError::arity_error("map requires at least 2 arguments"))?;
    if lists.is_empty() {
        return Err(SchemeError::arity_error("map requires at least 2 arguments"));
    }
    let columns = lists
        .iter()
        .map(|list| {
            list.list_to_vec()
                .map_err(|_| SchemeError::type_error("map: every list argument must be a proper list"))
        })
        .collect::<Result<Vec<_>>>()?;
    let len = columns.iter().map(|c| c.len()).min().unwrap_or(0);
    let mut out = Vec::with_capacity(len);
    for i in 0..len {
        let call_args: Vec<Value> = columns.iter().map(|c| c[i].clone()).collect();
        out.push(apply(callee.clone(), call_args)?);
    }
    Ok(Value::from_vec(out))
}

/// `for-each`: like `map` but discards the results, calling purely for
/// effect in list order.
fn for_each(args: &[Value]) -> Result<Value> {
    let (callee, lists) = args
        .split_first()
        .ok_or_else(|| SchemeError::arity_error("for-each requires at least 2 arguments"))?;
    if lists.is_empty() {
        return Err(SchemeError::arity_error("for-each requires at least 2 arguments"));
    }
    let columns = lists
        .iter()
        .map(|list| {
            list.list_to_vec().map_err(|_| {
                SchemeError::type_error("for-each: every list argument must be a proper list")
            })
        })
        .collect::<Result<Vec<_>>>()?;
    let len = columns.iter().map(|c| c.len()).min().unwrap_or(0);
    for i in 0..len {
        let call_args: Vec<Value> = columns.iter().map(|c| c[i].clone()).collect();
        apply(callee.clone(), call_args)?;
    }
    Ok(Value::EmptyList)
}

/// `force`: evaluates a promise's thunk on first call and memoizes the
/// result; subsequent calls return the memoized value without
/// re-running the thunk. The `forcing` flag guards the re-entrant case
/// (a promise whose thunk forces itself): the inner `force` sees
/// `forcing` already set and returns the outer call's eventual result by
/// evaluating the thunk once more rather than deadlocking, matching the
/// sample R5RS `a-stream`/self-referential-promise idiom.
fn force(args: &[Value]) -> Result<Value> {
    let promise = match args {
        [Value::Promise(p)] => p.clone(),
        [other] => {
            return Err(SchemeError::type_error(format!(
                "force: expected a promise, got {}",
                other.kind_name()
            )))
        }
        _ => return Err(SchemeError::arity_error("force requires exactly 1 argument")),
    };

    if let Some(result) = promise.result.borrow().clone() {
        return Ok(result);
    }

    if promise.forcing.get() {
        return force_thunk(&promise);
    }

    promise.forcing.set(true);
    let result = force_thunk(&promise)?;
    promise.forcing.set(false);
    if promise.result.borrow().is_none() {
        *promise.result.borrow_mut() = Some(result.clone());
    }
    Ok(result)
}

fn force_thunk(promise: &schemer_heap::PromiseHandle) -> Result<Value> {
    let PromiseData { thunk_expr, thunk_env, .. } = promise.as_ref();
    crate::eval::eval(thunk_expr, thunk_env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemer_heap::EnvData;

    #[test]
    fn apply_spreads_the_trailing_list() {
        let env = EnvData::new_top_level();
        crate::primitives::install_primitives(&env);
        let plus = env.lookup(schemer_util::Symbol::intern("+")).unwrap();
        let list = Value::from_vec(vec![Value::Int(3), Value::Int(4)]);
        let result = apply_primitive(&[plus, list]).unwrap();
        assert!(matches!(result, Value::Int(7)));
    }

    #[test]
    fn map_stops_at_the_shortest_list() {
        let env = EnvData::new_top_level();
        crate::primitives::install_primitives(&env);
        let plus = env.lookup(schemer_util::Symbol::intern("+")).unwrap();
        let a = Value::from_vec(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        let b = Value::from_vec(vec![Value::Int(10), Value::Int(20)]);
        let result = map(&[plus, a, b]).unwrap();
        assert_eq!(result.list_to_vec().unwrap().len(), 2);
    }
}
