//! String operations. Strings are byte sequences, so indexing and length
//! are byte-indexed throughout.

use schemer_heap::{EnvHandle, Result, SchemeError, StringData, Value};
use std::rc::Rc;

use super::bind;

pub(super) fn install(env: &EnvHandle) {
    bind(env, "string?", string_p);
    bind(env, "make-string", make_string);
    bind(env, "string-length", string_length);
    bind(env, "string-ref", string_ref);
    bind(env, "string-set!", string_set);
    bind(env, "string->list", string_to_list);
    bind(env, "list->string", list_to_string);
    bind(env, "string-append", string_append);
    bind(env, "substring", substring);
    bind(env, "string-copy", string_copy);
    bind(env, "string=?", string_eq);
}

fn as_string<'a>(value: &'a Value, who: &str) -> Result<&'a Rc<StringData>> {
    match value {
        Value::Str(s) => Ok(s),
        other => Err(SchemeError::type_error(format!(
            "{who}: expected a string, got {}",
            other.kind_name()
        ))),
    }
}

fn as_char(value: &Value, who: &str) -> Result<u8> {
    match value {
        Value::Char(byte) => Ok(*byte),
        other => Err(SchemeError::type_error(format!(
            "{who}: expected a character, got {}",
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

fn string_p(args: &[Value]) -> Result<Value> {
    match args {
        [v] => Ok(Value::Bool(matches!(v, Value::Str(_)))),
        _ => Err(SchemeError::arity_error("string? requires exactly 1 argument")),
    }
}

fn make_string(args: &[Value]) -> Result<Value> {
    match args {
        [len] => {
            let len = as_index(len, "make-string")?;
            Ok(Value::string(vec![b' '; len]))
        }
        [len, fill] => {
            let len = as_index(len, "make-string")?;
            let byte = as_char(fill, "make-string")?;
            Ok(Value::string(vec![byte; len]))
        }
        _ => Err(SchemeError::arity_error("make-string requires 1 or 2 arguments")),
    }
}

fn string_length(args: &[Value]) -> Result<Value> {
    match args {
        [v] => Ok(Value::Int(as_string(v, "string-length")?.bytes.borrow().len() as i64)),
        _ => Err(SchemeError::arity_error("string-length requires exactly 1 argument")),
    }
}

fn string_ref(args: &[Value]) -> Result<Value> {
    match args {
        [s, k] => {
            let data = as_string(s, "string-ref")?;
            let index = as_index(k, "string-ref")?;
            let bytes = data.bytes.borrow();
            let byte = bytes
                .get(index)
                .ok_or_else(|| SchemeError::arithmetic_error("string-ref: index out of range"))?;
            Ok(Value::Char(*byte))
        }
        _ => Err(SchemeError::arity_error("string-ref requires exactly 2 arguments")),
    }
}

fn string_set(args: &[Value]) -> Result<Value> {
    match args {
        [s, k, c] => {
            let data = as_string(s, "string-set!")?;
            let index = as_index(k, "string-set!")?;
            let byte = as_char(c, "string-set!")?;
            data.set(index, byte)?;
            Ok(Value::EmptyList)
        }
        _ => Err(SchemeError::arity_error("string-set! requires exactly 3 arguments")),
    }
}

fn string_to_list(args: &[Value]) -> Result<Value> {
    match args {
        [s] => {
            let data = as_string(s, "string->list")?;
            let items = data.bytes.borrow().iter().map(|b| Value::Char(*b)).collect();
            Ok(Value::from_vec(items))
        }
        _ => Err(SchemeError::arity_error("string->list requires exactly 1 argument")),
    }
}

fn list_to_string(args: &[Value]) -> Result<Value> {
    match args {
        [list] => {
            let items = list
                .list_to_vec()
                .map_err(|_| SchemeError::type_error("list->string: argument must be a proper list"))?;
            let bytes = items
                .iter()
                .map(|v| as_char(v, "list->string"))
                .collect::<Result<Vec<_>>>()?;
            Ok(Value::string(bytes))
        }
        _ => Err(SchemeError::arity_error("list->string requires exactly 1 argument")),
    }
}

fn string_append(args: &[Value]) -> Result<Value> {
    let mut out = Vec::new();
    for v in args {
        out.extend_from_slice(&as_string(v, "string-append")?.bytes.borrow());
    }
    Ok(Value::string(out))
}

fn substring(args: &[Value]) -> Result<Value> {
    match args {
        [s, start, end] => {
            let data = as_string(s, "substring")?;
            let start = as_index(start, "substring")?;
            let end = as_index(end, "substring")?;
            let bytes = data.bytes.borrow();
            if start > end || end > bytes.len() {
                return Err(SchemeError::arithmetic_error("substring: index out of range"));
            }
            Ok(Value::string(bytes[start..end].to_vec()))
        }
        _ => Err(SchemeError::arity_error("substring requires exactly 3 arguments")),
    }
}

fn string_copy(args: &[Value]) -> Result<Value> {
    match args {
        [s] => Ok(Value::string(as_string(s, "string-copy")?.bytes.borrow().clone())),
        _ => Err(SchemeError::arity_error("string-copy requires exactly 1 argument")),
    }
}

fn string_eq(args: &[Value]) -> Result<Value> {
    let strings = args
        .iter()
        .map(|v| as_string(v, "string=?"))
        .collect::<Result<Vec<_>>>()?;
    for pair in strings.windows(2) {
        if *pair[0].bytes.borrow() != *pair[1].bytes.borrow() {
            return Ok(Value::Bool(false));
        }
    }
    Ok(Value::Bool(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_string_fills_with_the_given_character() {
        let s = make_string(&[Value::Int(3), Value::Char(b'x')]).unwrap();
        assert!(matches!(&s, Value::Str(data) if *data.bytes.borrow() == b"xxx"));
    }

    #[test]
    fn string_ref_and_set_round_trip() {
        let s = Value::string("abc");
        string_set(&[s.clone(), Value::Int(1), Value::Char(b'Z')]).unwrap();
        assert!(matches!(string_ref(&[s, Value::Int(1)]), Ok(Value::Char(b'Z'))));
    }

    #[test]
    fn substring_slices_by_byte_index() {
        let s = Value::string("hello world");
        let part = substring(&[s, Value::Int(0), Value::Int(5)]).unwrap();
        assert!(matches!(&part, Value::Str(data) if data.as_string_lossy() == "hello"));
    }

    #[test]
    fn string_append_concatenates_in_order() {
        let result = string_append(&[Value::string("foo"), Value::string("bar")]).unwrap();
        assert!(matches!(&result, Value::Str(data) if data.as_string_lossy() == "foobar"));
    }
}
