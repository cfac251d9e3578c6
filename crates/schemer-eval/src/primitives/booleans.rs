//! `not`, `boolean?`.

use schemer_heap::{EnvHandle, Result, SchemeError, Value};

use super::bind;

pub(super) fn install(env: &EnvHandle) {
    bind(env, "not", not_p);
    bind(env, "boolean?", boolean_p);
}

fn not_p(args: &[Value]) -> Result<Value> {
    match args {
        [v] => Ok(Value::Bool(v.is_false())),
        _ => Err(SchemeError::arity_error("not requires exactly 1 argument")),
    }
}

fn boolean_p(args: &[Value]) -> Result<Value> {
    match args {
        [v] => Ok(Value::Bool(matches!(v, Value::Bool(_)))),
        _ => Err(SchemeError::arity_error("boolean? requires exactly 1 argument")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_negates_only_false() {
        assert!(matches!(not_p(&[Value::Bool(false)]), Ok(Value::Bool(true))));
        assert!(matches!(not_p(&[Value::Int(0)]), Ok(Value::Bool(false))));
    }
}
