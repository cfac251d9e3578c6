//! `schemert run FILE`: reads a whole source file, then evaluates every
//! top-level form against one shared environment in order.

use std::path::PathBuf;

use schemer_engine::Session;
use schemer_heap::Value;
use schemer_util::Symbol;

use crate::config::Config;
use crate::error::Result;
use crate::report::report_scheme_error;

#[derive(Debug, Clone)]
pub struct RunArgs {
    pub file: PathBuf,
    pub verbose: bool,
}

/// Runs `args.file` to completion. Stops at the first evaluation error
/// (unlike the REPL, which discards the offending form and keeps going) —
/// a script is one program, not a sequence of independent commands.
pub fn run_run(args: RunArgs, config: &Config) -> Result<()> {
    let path = config.resolve(&args.file);
    let mut session = Session::new();
    let datums = session.load_file(&path)?;
    tracing::debug!(file = %path.display(), forms = datums.len(), "loaded source file");

    let env = schemer_engine::make_top_level_env();
    for datum in &datums {
        match session.eval(datum, &env) {
            Ok(value) => {
                if config.echo_values && !is_define(datum) {
                    println!("{value}");
                }
            }
            Err(err) => {
                report_scheme_error(&err);
                std::process::exit(1);
            }
        }
    }
    Ok(())
}

fn is_define(datum: &Value) -> bool {
    match datum {
        Value::Pair(pair) => matches!(
            &*pair.car.borrow(),
            Value::Symbol(s) if *s == Symbol::intern("define")
        ),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_script(content: &str) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("script.scm");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn run_evaluates_every_top_level_form() {
        let (_dir, path) = write_script("(define x 1) (define y 2) (+ x y)");
        let args = RunArgs { file: path, verbose: false };
        let result = run_run(args, &Config::default());
        assert!(result.is_ok());
    }

    #[test]
    fn is_define_recognizes_define_forms() {
        let expr = Value::cons(Value::symbol("define"), Value::cons(Value::symbol("x"), Value::EmptyList));
        assert!(is_define(&expr));
        assert!(!is_define(&Value::Int(1)));
    }
}
