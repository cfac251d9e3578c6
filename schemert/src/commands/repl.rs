//! `schemert repl`: the interactive read-eval-print loop, and the
//! default command when none is given on the command line.
//!
//! Reads one line at a time from stdin, accumulating lines into a
//! pending buffer until the accumulated text parses as a complete
//! sequence of datums (an unterminated list/vector keeps the prompt in
//! "continuation" mode); evaluates each datum against one persistent
//! environment and prints its value. A `SchemeError` discards only the
//! in-flight form and the loop continues.

use std::io::{self, BufRead, Write};

use schemer_engine::{make_top_level_env, Session};
use schemer_heap::SchemeError;

use crate::config::Config;
use crate::error::Result;
use crate::report::report_scheme_error;

#[derive(Debug, Clone, Default)]
pub struct ReplArgs {
    pub verbose: bool,
}

pub fn run_repl(_args: ReplArgs, config: &Config) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut session = Session::new();
    let env = make_top_level_env();
    let mut pending = String::new();

    loop {
        print!("{}", if pending.is_empty() { &config.prompt } else { "... " });
        io::stdout().flush().ok();

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };
        pending.push_str(&line);
        pending.push('\n');

        match session.read(&pending) {
            Ok(datums) => {
                for datum in &datums {
                    match session.eval(datum, &env) {
                        Ok(value) => println!("{value}"),
                        Err(err) => {
                            report_scheme_error(&err);
                        }
                    }
                }
                pending.clear();
            }
            Err(err) if awaiting_more_input(&err) => continue,
            Err(err) => {
                report_scheme_error(&err);
                pending.clear();
            }
        }
    }
    Ok(())
}

/// True for the parse errors the reader raises on hitting end-of-input
/// mid-list/mid-vector — the signal that the user isn't done typing yet,
/// not a genuine syntax error.
fn awaiting_more_input(err: &SchemeError) -> bool {
    matches!(err, SchemeError::Parse { message, .. } if message.starts_with("unterminated"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemer_util::Span;

    #[test]
    fn awaiting_more_input_recognizes_unterminated_list() {
        let err = SchemeError::parse("unterminated list", Span::dummy());
        assert!(awaiting_more_input(&err));
    }

    #[test]
    fn awaiting_more_input_rejects_other_parse_errors() {
        let err = SchemeError::parse("unexpected ')'", Span::dummy());
        assert!(!awaiting_more_input(&err));
    }
}
