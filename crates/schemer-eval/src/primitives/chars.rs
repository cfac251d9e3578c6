//! Character predicates and comparisons.

use schemer_heap::{EnvHandle, Result, SchemeError, Value};

use super::bind;

pub(super) fn install(env: &EnvHandle) {
    bind(env, "char?", char_p);
    bind(env, "char=?", char_eq);
    bind(env, "char<?", char_lt);
    bind(env, "char>?", char_gt);
    bind(env, "char<=?", char_le);
    bind(env, "char>=?", char_ge);
}

fn one<'a>(args: &'a [Value], who: &str) -> Result<&'a Value> {
    match args {
        [v] => Ok(v),
        _ => Err(SchemeError::arity_error(format!(
            "{who} requires exactly 1 argument, got {}",
            args.len()
        ))),
    }
}

fn chars(args: &[Value], who: &str) -> Result<Vec<u8>> {
    args.iter()
        .map(|v| match v {
            Value::Char(byte) => Ok(*byte),
            other => Err(SchemeError::type_error(format!(
                "{who}: expected a character, got {}",
                other.kind_name()
            ))),
        })
        .collect()
}

fn char_p(args: &[Value]) -> Result<Value> {
    Ok(Value::Bool(matches!(one(args, "char?")?, Value::Char(_))))
}

fn chain_compare(args: &[Value], who: &str, cmp: fn(u8, u8) -> bool) -> Result<Value> {
    let bytes = chars(args, who)?;
    for pair in bytes.windows(2) {
        if !cmp(pair[0], pair[1]) {
            return Ok(Value::Bool(false));
        }
    }
    Ok(Value::Bool(true))
}

fn char_eq(args: &[Value]) -> Result<Value> {
    chain_compare(args, "char=?", |a, b| a == b)
}

fn char_lt(args: &[Value]) -> Result<Value> {
    chain_compare(args, "char<?", |a, b| a < b)
}

fn char_gt(args: &[Value]) -> Result<Value> {
    chain_compare(args, "char>?", |a, b| a > b)
}

fn char_le(args: &[Value]) -> Result<Value> {
    chain_compare(args, "char<=?", |a, b| a <= b)
}

fn char_ge(args: &[Value]) -> Result<Value> {
    chain_compare(args, "char>=?", |a, b| a >= b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_predicate_accepts_only_chars() {
        assert!(matches!(char_p(&[Value::Char(b'a')]), Ok(Value::Bool(true))));
        assert!(matches!(char_p(&[Value::Int(1)]), Ok(Value::Bool(false))));
    }

    #[test]
    fn char_comparisons_are_byte_ordered() {
        assert!(matches!(
            char_lt(&[Value::Char(b'a'), Value::Char(b'b')]),
            Ok(Value::Bool(true))
        ));
        assert!(matches!(
            char_gt(&[Value::Char(b'a'), Value::Char(b'b')]),
            Ok(Value::Bool(false))
        ));
    }
}
