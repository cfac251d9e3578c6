//! `eqv?`, `eq?`, `equal?`.

use schemer_heap::{equality, EnvHandle, Result, SchemeError, Value};

use super::bind;

pub(super) fn install(env: &EnvHandle) {
    bind(env, "eq?", eq_p);
    bind(env, "eqv?", eqv_p);
    bind(env, "equal?", equal_p);
}

fn two(args: &[Value], who: &str) -> Result<(&Value, &Value)> {
    match args {
        [a, b] => Ok((a, b)),
        _ => Err(SchemeError::arity_error(format!(
            "{who} requires exactly 2 arguments, got {}",
            args.len()
        ))),
    }
}

fn eq_p(args: &[Value]) -> Result<Value> {
    let (a, b) = two(args, "eq?")?;
    Ok(Value::Bool(equality::eq(a, b)))
}

fn eqv_p(args: &[Value]) -> Result<Value> {
    let (a, b) = two(args, "eqv?")?;
    Ok(Value::Bool(equality::eqv(a, b)))
}

fn equal_p(args: &[Value]) -> Result<Value> {
    let (a, b) = two(args, "equal?")?;
    Ok(Value::Bool(equality::equal(a, b)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eq_on_small_ints() {
        assert!(matches!(eq_p(&[Value::Int(1), Value::Int(1)]), Ok(Value::Bool(true))));
    }

    #[test]
    fn equal_on_nested_lists() {
        let a = Value::from_vec(vec![Value::Int(1), Value::string("x")]);
        let b = Value::from_vec(vec![Value::Int(1), Value::string("x")]);
        assert!(matches!(equal_p(&[a, b]), Ok(Value::Bool(true))));
    }
}
