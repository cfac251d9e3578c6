//! Vector operations.

use schemer_heap::{EnvHandle, Result, SchemeError, Value, VectorData};
use std::rc::Rc;

use super::bind;

pub(super) fn install(env: &EnvHandle) {
    bind(env, "vector?", vector_p);
    bind(env, "make-vector", make_vector);
    bind(env, "vector", vector);
    bind(env, "vector-length", vector_length);
    bind(env, "vector-ref", vector_ref);
    bind(env, "vector-set!", vector_set);
    bind(env, "vector->list", vector_to_list);
    bind(env, "list->vector", list_to_vector);
    bind(env, "vector-fill!", vector_fill);
}

fn as_vector<'a>(value: &'a Value, who: &str) -> Result<&'a Rc<VectorData>> {
    match value {
        Value::Vector(v) => Ok(v),
        other => Err(SchemeError::type_error(format!(
            "{who}: expected a vector, got {}",
            other.kind_name()
        ))),
    }
}

fn as_index(value: &Value, who: &str) -> Result<usize> {
    match value {
        Value::Int(n) if *n >= 0 => Ok(*n as usize),
        other => Err(SchemeError::type_error(format!(
            "{who}: expected a non-negative exact integer, got {}",
            other.kind_name()
        ))),
    }
}

fn vector_p(args: &[Value]) -> Result<Value> {
    match args {
        [v] => Ok(Value::Bool(matches!(v, Value::Vector(_)))),
        _ => Err(SchemeError::arity_error("vector? requires exactly 1 argument")),
    }
}

fn make_vector(args: &[Value]) -> Result<Value> {
    match args {
        [len] => {
            let len = as_index(len, "make-vector")?;
            Ok(Value::vector(vec![Value::Bool(false); len]))
        }
        [len, fill] => {
            let len = as_index(len, "make-vector")?;
            Ok(Value::vector(vec![fill.clone(); len]))
        }
        _ => Err(SchemeError::arity_error("make-vector requires 1 or 2 arguments")),
    }
}

fn vector(args: &[Value]) -> Result<Value> {
    Ok(Value::vector(args.to_vec()))
}

fn vector_length(args: &[Value]) -> Result<Value> {
    match args {
        [v] => Ok(Value::Int(as_vector(v, "vector-length")?.items.borrow().len() as i64)),
        _ => Err(SchemeError::arity_error("vector-length requires exactly 1 argument")),
    }
}

fn vector_ref(args: &[Value]) -> Result<Value> {
    match args {
        [v, k] => {
            let data = as_vector(v, "vector-ref")?;
            let index = as_index(k, "vector-ref")?;
            data.items
                .borrow()
                .get(index)
                .cloned()
                .ok_or_else(|| SchemeError::arithmetic_error("vector-ref: index out of range"))
        }
        _ => Err(SchemeError::arity_error("vector-ref requires exactly 2 arguments")),
    }
}

fn vector_set(args: &[Value]) -> Result<Value> {
    match args {
        [v, k, value] => {
            let data = as_vector(v, "vector-set!")?;
            let index = as_index(k, "vector-set!")?;
            data.set(index, value.clone())?;
            Ok(Value::EmptyList)
        }
        _ => Err(SchemeError::arity_error("vector-set! requires exactly 3 arguments")),
    }
}

fn vector_to_list(args: &[Value]) -> Result<Value> {
    match args {
        [v] => Ok(Value::from_vec(as_vector(v, "vector->list")?.items.borrow().clone())),
        _ => Err(SchemeError::arity_error("vector->list requires exactly 1 argument")),
    }
}

fn list_to_vector(args: &[Value]) -> Result<Value> {
    match args {
        [list] => {
            let items = list
                .list_to_vec()
                .map_err(|_| SchemeError::type_error("list->vector: argument must be a proper list"))?;
            Ok(Value::vector(items))
        }
        _ => Err(SchemeError::arity_error("list->vector requires exactly 1 argument")),
    }
}

fn vector_fill(args: &[Value]) -> Result<Value> {
    match args {
        [v, fill] => {
            let data = as_vector(v, "vector-fill!")?;
            let len = data.items.borrow().len();
            for i in 0..len {
                data.set(i, fill.clone())?;
            }
            Ok(Value::EmptyList)
        }
        _ => Err(SchemeError::arity_error("vector-fill! requires exactly 2 arguments")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_vector_fills_with_the_given_value() {
        let v = make_vector(&[Value::Int(3), Value::Int(9)]).unwrap();
        let items = vector_to_list(&[v]).unwrap().list_to_vec().unwrap();
        assert_eq!(items.len(), 3);
        assert!(matches!(items[0], Value::Int(9)));
    }

    #[test]
    fn vector_ref_and_set_round_trip() {
        let v = vector(&[Value::Int(1), Value::Int(2), Value::Int(3)]).unwrap();
        vector_set(&[v.clone(), Value::Int(1), Value::Int(99)]).unwrap();
        assert!(matches!(vector_ref(&[v, Value::Int(1)]), Ok(Value::Int(99))));
    }

    #[test]
    fn list_vector_conversion_round_trips() {
        let list = Value::from_vec(vec![Value::symbol("dah"), Value::symbol("didah")]);
        let v = list_to_vector(&[list]).unwrap();
        let back = vector_to_list(&[v]).unwrap();
        assert_eq!(back.list_to_vec().unwrap().len(), 2);
    }
}
