//! Pair and list operations.

use schemer_heap::{equality, EnvHandle, Result, SchemeError, Value};

use super::bind;

pub(super) fn install(env: &EnvHandle) {
    bind(env, "pair?", pair_p);
    bind(env, "cons", cons);
    bind(env, "car", car);
    bind(env, "cdr", cdr);
    bind(env, "set-car!", set_car);
    bind(env, "set-cdr!", set_cdr);
    bind(env, "list?", list_p);
    bind(env, "list", list);
    bind(env, "length", length);
    bind(env, "append", append);
    bind(env, "reverse", reverse);
    bind(env, "list-tail", list_tail);
    bind(env, "list-ref", list_ref);
    bind(env, "memq", memq);
    bind(env, "memv", memv);
    bind(env, "member", member);
    bind(env, "assq", assq);
    bind(env, "assv", assv);
    bind(env, "assoc", assoc);
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

fn as_pair<'a>(value: &'a Value, who: &str) -> Result<&'a schemer_heap::PairData> {
    match value {
        Value::Pair(pair) => Ok(pair),
        other => Err(SchemeError::type_error(format!(
            "{who}: expected a pair, got {}",
            other.kind_name()
        ))),
    }
}

fn pair_p(args: &[Value]) -> Result<Value> {
    Ok(Value::Bool(one(args, "pair?")?.is_pair()))
}

fn cons(args: &[Value]) -> Result<Value> {
    match args {
        [a, b] => Ok(Value::cons(a.clone(), b.clone())),
        _ => Err(SchemeError::arity_error("cons requires exactly 2 arguments")),
    }
}

fn car(args: &[Value]) -> Result<Value> {
    let pair = as_pair(one(args, "car")?, "car")?;
    Ok(pair.car.borrow().clone())
}

fn cdr(args: &[Value]) -> Result<Value> {
    let pair = as_pair(one(args, "cdr")?, "cdr")?;
    Ok(pair.cdr.borrow().clone())
}

fn set_car(args: &[Value]) -> Result<Value> {
    match args {
        [target, value] => {
            as_pair(target, "set-car!")?.set_car(value.clone())?;
            Ok(Value::EmptyList)
        }
        _ => Err(SchemeError::arity_error("set-car! requires exactly 2 arguments")),
    }
}

fn set_cdr(args: &[Value]) -> Result<Value> {
    match args {
        [target, value] => {
            as_pair(target, "set-cdr!")?.set_cdr(value.clone())?;
            Ok(Value::EmptyList)
        }
        _ => Err(SchemeError::arity_error("set-cdr! requires exactly 2 arguments")),
    }
}

fn list_p(args: &[Value]) -> Result<Value> {
    Ok(Value::Bool(equality::is_list(one(args, "list?")?)))
}

fn list(args: &[Value]) -> Result<Value> {
    Ok(Value::from_vec(args.to_vec()))
}

fn length(args: &[Value]) -> Result<Value> {
    let value = one(args, "length")?;
    let len = equality::list_length(value)
        .ok_or_else(|| SchemeError::type_error("length: argument must be a proper list"))?;
    Ok(Value::Int(len as i64))
}

fn append(args: &[Value]) -> Result<Value> {
    match args.split_last() {
        None => Ok(Value::EmptyList),
        Some((last, init)) => {
            let mut items = Vec::new();
            for list in init {
                items.extend(list.list_to_vec().map_err(|_| {
                    SchemeError::type_error("append: every argument but the last must be a proper list")
                })?);
            }
            Ok(items.into_iter().rev().fold(last.clone(), |tail, head| Value::cons(head, tail)))
        }
    }
}

fn reverse(args: &[Value]) -> Result<Value> {
    let value = one(args, "reverse")?;
    let mut items = value
        .list_to_vec()
        .map_err(|_| SchemeError::type_error("reverse: argument must be a proper list"))?;
    items.reverse();
    Ok(Value::from_vec(items))
}

fn list_tail(args: &[Value]) -> Result<Value> {
    match args {
        [list, k] => {
            let count = require_index(k, "list-tail")?;
            let mut cursor = list.clone();
            for _ in 0..count {
                let pair = as_pair(&cursor, "list-tail")?;
                let next = pair.cdr.borrow().clone();
                cursor = next;
            }
            Ok(cursor)
        }
        _ => Err(SchemeError::arity_error("list-tail requires exactly 2 arguments")),
    }
}

fn list_ref(args: &[Value]) -> Result<Value> {
    match args {
        [list, k] => {
            let count = require_index(k, "list-ref")?;
            let mut cursor = list.clone();
            for _ in 0..count {
                let pair = as_pair(&cursor, "list-ref")?;
                let next = pair.cdr.borrow().clone();
                cursor = next;
            }
            let pair = as_pair(&cursor, "list-ref")?;
            Ok(pair.car.borrow().clone())
        }
        _ => Err(SchemeError::arity_error("list-ref requires exactly 2 arguments")),
    }
}

fn require_index(value: &Value, who: &str) -> Result<usize> {
    match value {
        Value::Int(n) if *n >= 0 => Ok(*n as usize),
        other => Err(SchemeError::type_error(format!(
            "{who}: expected a non-negative exact integer, got {}",
            other.kind_name()
        ))),
    }
}

type Predicate = fn(&Value, &Value) -> bool;

fn find_member(list: &Value, key: &Value, same: Predicate) -> Result<Value> {
    let mut cursor = list.clone();
    loop {
        match &cursor {
            Value::EmptyList => return Ok(Value::Bool(false)),
            Value::Pair(pair) => {
                if same(&pair.car.borrow(), key) {
                    return Ok(cursor.clone());
                }
                let next = pair.cdr.borrow().clone();
                cursor = next;
            }
            other => {
                return Err(SchemeError::type_error(format!(
                    "expected a proper list, got {}",
                    other.kind_name()
                )))
            }
        }
    }
}

fn find_assoc(alist: &Value, key: &Value, same: Predicate) -> Result<Value> {
    let mut cursor = alist.clone();
    loop {
        match &cursor {
            Value::EmptyList => return Ok(Value::Bool(false)),
            Value::Pair(pair) => {
                let entry = pair.car.borrow().clone();
                let entry_pair = as_pair(&entry, "assoc")?;
                if same(&entry_pair.car.borrow(), key) {
                    return Ok(entry);
                }
                let next = pair.cdr.borrow().clone();
                cursor = next;
            }
            other => {
                return Err(SchemeError::type_error(format!(
                    "expected a proper association list, got {}",
                    other.kind_name()
                )))
            }
        }
    }
}

fn memq(args: &[Value]) -> Result<Value> {
    match args {
        [key, list] => find_member(list, key, equality::eq),
        _ => Err(SchemeError::arity_error("memq requires exactly 2 arguments")),
    }
}

fn memv(args: &[Value]) -> Result<Value> {
    match args {
        [key, list] => find_member(list, key, equality::eqv),
        _ => Err(SchemeError::arity_error("memv requires exactly 2 arguments")),
    }
}

fn member(args: &[Value]) -> Result<Value> {
    match args {
        [key, list] => find_member(list, key, equality::equal),
        _ => Err(SchemeError::arity_error("member requires exactly 2 arguments")),
    }
}

fn assq(args: &[Value]) -> Result<Value> {
    match args {
        [key, alist] => find_assoc(alist, key, equality::eq),
        _ => Err(SchemeError::arity_error("assq requires exactly 2 arguments")),
    }
}

fn assv(args: &[Value]) -> Result<Value> {
    match args {
        [key, alist] => find_assoc(alist, key, equality::eqv),
        _ => Err(SchemeError::arity_error("assv requires exactly 2 arguments")),
    }
}

fn assoc(args: &[Value]) -> Result<Value> {
    match args {
        [key, alist] => find_assoc(alist, key, equality::equal),
        _ => Err(SchemeError::arity_error("assoc requires exactly 2 arguments")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn car_and_cdr_unpack_a_pair() {
        let p = Value::cons(Value::Int(1), Value::Int(2));
        assert!(matches!(car(&[p.clone()]), Ok(Value::Int(1))));
        assert!(matches!(cdr(&[p]), Ok(Value::Int(2))));
    }

    #[test]
    fn car_of_non_pair_is_a_type_error() {
        assert!(car(&[Value::Int(1)]).is_err());
    }

    #[test]
    fn append_splices_every_list_but_the_last() {
        let a = Value::from_vec(vec![Value::Int(1), Value::Int(2)]);
        let b = Value::from_vec(vec![Value::Int(3)]);
        let result = append(&[a, b]).unwrap();
        assert_eq!(result.list_to_vec().unwrap().len(), 3);
    }

    #[test]
    fn length_rejects_improper_lists() {
        let improper = Value::cons(Value::Int(1), Value::Int(2));
        assert!(length(&[improper]).is_err());
    }

    #[test]
    fn assoc_finds_matching_entry_by_structural_equality() {
        let entry = Value::cons(Value::string("k"), Value::Int(42));
        let alist = Value::from_vec(vec![entry]);
        let result = assoc(&[Value::string("k"), alist]).unwrap();
        assert!(matches!(result, Value::Pair(_)));
    }
}
