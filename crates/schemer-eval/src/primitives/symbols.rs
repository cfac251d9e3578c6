//! Symbol operations.

use schemer_heap::{EnvHandle, Result, SchemeError, Value};
use schemer_util::Symbol;

use super::bind;

pub(super) fn install(env: &EnvHandle) {
    bind(env, "symbol?", symbol_p);
    bind(env, "symbol->string", symbol_to_string);
    bind(env, "string->symbol", string_to_symbol);
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

fn symbol_p(args: &[Value]) -> Result<Value> {
    Ok(Value::Bool(matches!(one(args, "symbol?")?, Value::Symbol(_))))
}

fn symbol_to_string(args: &[Value]) -> Result<Value> {
    match one(args, "symbol->string")? {
        Value::Symbol(sym) => Ok(Value::string(sym.as_str().as_bytes().to_vec())),
        other => Err(SchemeError::type_error(format!(
            "symbol->string: expected a symbol, got {}",
            other.kind_name()
        ))),
    }
}

fn string_to_symbol(args: &[Value]) -> Result<Value> {
    match one(args, "string->symbol")? {
        Value::Str(s) => Ok(Value::Symbol(Symbol::intern(&s.as_string_lossy()))),
        other => Err(SchemeError::type_error(format!(
            "string->symbol: expected a string, got {}",
            other.kind_name()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_to_string_then_back_round_trips_the_same_symbol() {
        let original = Value::Symbol(Symbol::intern("flying-fish"));
        let text = symbol_to_string(&[original.clone()]).unwrap();
        let back = string_to_symbol(&[text]).unwrap();
        assert!(matches!((original, back), (Value::Symbol(a), Value::Symbol(b)) if a == b));
    }

    #[test]
    fn symbol_predicate_rejects_non_symbols() {
        assert!(matches!(symbol_p(&[Value::EmptyList]), Ok(Value::Bool(false))));
    }
}
