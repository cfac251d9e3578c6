//! Procedure application: binding a closure's formals
//! against a call's argument vector, and the public entry point used by
//! both ordinary application and the `apply`/`map`/`for-each` primitives.

use schemer_heap::{EnvData, EnvHandle, Formals, ProcedureData, Result, SchemeError, Value};

use crate::eval::{eval, Flow};

/// Apply `callee` to `args`, returning a finished value. Used wherever a
/// result is needed immediately rather than as a tail position (the
/// `apply` primitive, `map`, `for-each`, `force`'s thunk call).
pub fn apply(callee: Value, args: Vec<Value>) -> Result<Value> {
    match apply_tail(callee, args)? {
        Flow::Done(value) => Ok(value),
        Flow::Tail(expr, env) => eval(&expr, &env),
    }
}

/// The tail-position version: for a closure, this binds formals and
/// returns `Flow::Tail` on the body's last form instead of recursing into
/// `eval`, which is what keeps a tail call from growing the Rust stack.
pub(crate) fn apply_tail(callee: Value, args: Vec<Value>) -> Result<Flow> {
    match &callee {
        Value::Procedure(proc) => match proc.as_ref() {
            ProcedureData::Primitive { func, .. } => Ok(Flow::Done(func(&args)?)),
            ProcedureData::Closure { formals, body, env, .. } => {
                let call_env = bind_formals(formals, &args, env)?;
                eval_body_in_tail_position(body, &call_env)
            }
        },
        other => Err(SchemeError::type_error(format!(
            "attempt to apply a non-procedure: {}",
            other.kind_name()
        ))),
    }
}

/// Checks arity against `formals` and builds the call frame: fixed
/// formals require an exact count, `Rest` formals require at least the
/// fixed prefix (collecting the remainder into one list), and
/// `Variadic` formals accept any count (collecting everything into one
/// list).
pub(crate) fn bind_formals(formals: &Formals, args: &[Value], env: &EnvHandle) -> Result<EnvHandle> {
    match formals {
        Formals::Fixed(params) => {
            if args.len() != params.len() {
                return Err(SchemeError::arity_error(format!(
                    "expected {} arguments, got {}",
                    formals.arity_description(),
                    args.len()
                )));
            }
            Ok(EnvData::extend(env, params, args))
        }
        Formals::Rest(params, rest) => {
            if args.len() < params.len() {
                return Err(SchemeError::arity_error(format!(
                    "expected {} arguments, got {}",
                    formals.arity_description(),
                    args.len()
                )));
            }
            let (fixed_args, rest_args) = args.split_at(params.len());
            let call_env = EnvData::extend(env, params, fixed_args);
            call_env.define(*rest, Value::from_vec(rest_args.to_vec()))?;
            Ok(call_env)
        }
        Formals::Variadic(name) => {
            let call_env = EnvData::child(env);
            call_env.define(*name, Value::from_vec(args.to_vec()))?;
            Ok(call_env)
        }
    }
}

/// Evaluates every form in `body` except the last for effect, then
/// hands the last form back as a `Flow::Tail` so it runs in the caller's
/// trampoline loop rather than a fresh recursive `eval` call.
fn eval_body_in_tail_position(body: &[Value], env: &EnvHandle) -> Result<Flow> {
    let (last, init) = body
        .split_last()
        .ok_or_else(|| SchemeError::eval_error("procedure body must contain at least one form"))?;
    for form in init {
        eval(form, env)?;
    }
    Ok(Flow::Tail(last.clone(), env.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemer_util::Symbol;

    #[test]
    fn fixed_arity_rejects_wrong_argument_count() {
        let env = EnvData::new_top_level();
        let formals = Formals::Fixed(vec![Symbol::intern("a"), Symbol::intern("b")]);
        assert!(bind_formals(&formals, &[Value::Int(1)], &env).is_err());
    }

    #[test]
    fn rest_formals_collect_the_remainder() {
        let env = EnvData::new_top_level();
        let rest = Symbol::intern("more");
        let formals = Formals::Rest(vec![Symbol::intern("a")], rest);
        let call_env = bind_formals(&formals, &[Value::Int(1), Value::Int(2), Value::Int(3)], &env)
            .unwrap();
        let tail = call_env.lookup(rest).unwrap();
        assert_eq!(tail.list_to_vec().unwrap().len(), 2);
    }

    #[test]
    fn variadic_formals_accept_zero_arguments() {
        let env = EnvData::new_top_level();
        let all = Symbol::intern("args");
        let formals = Formals::Variadic(all);
        let call_env = bind_formals(&formals, &[], &env).unwrap();
        assert!(matches!(call_env.lookup(all), Ok(Value::EmptyList)));
    }
}
