//! `eval` and the two standard report environments:
//! `scheme-report-environment` hands back a frozen copy of the standard
//! library, `null-environment` a frozen environment with no procedures
//! bound at all (special forms are handled by the dispatcher directly,
//! not looked up, so an empty environment still supports `lambda`/`if`/
//! etc. — exactly what the R5RS `null-environment` promises).

use schemer_heap::{EnvData, EnvHandle, Result, SchemeError, Value};

use super::bind;

pub(super) fn install(env: &EnvHandle) {
    bind(env, "eval", eval_primitive);
    bind(env, "scheme-report-environment", scheme_report_environment);
    bind(env, "null-environment", null_environment);
}

fn eval_primitive(args: &[Value]) -> Result<Value> {
    match args {
        [expr, Value::Environment(env)] => crate::eval::eval(expr, env),
        [_, other] => Err(SchemeError::type_error(format!(
            "eval: expected an environment, got {}",
            other.kind_name()
        ))),
        _ => Err(SchemeError::arity_error("eval requires exactly 2 arguments")),
    }
}

/// Accepts (and ignores) the report version number; only version 5 is
/// implemented, matching the rest of this library.
fn require_version(args: &[Value], who: &str) -> Result<()> {
    match args {
        [Value::Int(_)] => Ok(()),
        [other] => Err(SchemeError::type_error(format!(
            "{who}: expected a version number, got {}",
            other.kind_name()
        ))),
        _ => Err(SchemeError::arity_error(format!("{who} requires exactly 1 argument"))),
    }
}

fn scheme_report_environment(args: &[Value]) -> Result<Value> {
    require_version(args, "scheme-report-environment")?;
    let env = EnvData::new_top_level();
    super::install_primitives(&env);
    env.freeze();
    Ok(Value::Environment(env))
}

fn null_environment(args: &[Value]) -> Result<Value> {
    require_version(args, "null-environment")?;
    let env = EnvData::new_top_level();
    env.freeze();
    Ok(Value::Environment(env))
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemer_reader::Reader;
    use schemer_util::diagnostic::Handler;

    fn read_one(text: &str) -> Value {
        let handler = Handler::new();
        let mut reader = Reader::new(text, std::rc::Rc::from("<test>"), &handler);
        reader.read_datum().unwrap().expect("a datum")
    }

    #[test]
    fn eval_runs_a_datum_against_the_given_environment() {
        let env_value = scheme_report_environment(&[Value::Int(5)]).unwrap();
        let expr = read_one("(* 7 3)");
        let result = eval_primitive(&[expr, env_value]).unwrap();
        assert!(matches!(result, Value::Int(21)));
    }

    #[test]
    fn null_environment_still_supports_special_forms() {
        let env_value = scheme_report_environment(&[Value::Int(5)]).unwrap();
        let null_env = null_environment(&[Value::Int(5)]).unwrap();
        let expr = read_one("(lambda (f x) (f x x))");
        let closure = eval_primitive(&[expr, null_env]).unwrap();
        let Value::Environment(base) = env_value else { unreachable!() };
        let plus = base.lookup(schemer_util::Symbol::intern("+")).unwrap();
        let result = crate::apply::apply(closure, vec![plus, Value::Int(10)]).unwrap();
        assert!(matches!(result, Value::Int(20)));
    }
}
