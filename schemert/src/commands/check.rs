//! `schemert check FILE`: reads a file without evaluating it. Catches
//! lexical and parse errors — syntax checking only, no side effects.

use std::path::PathBuf;

use schemer_engine::Session;

use crate::config::Config;
use crate::error::Result;
use crate::report::report_scheme_error;

#[derive(Debug, Clone)]
pub struct CheckArgs {
    pub file: PathBuf,
}

pub fn run_check(args: CheckArgs, config: &Config) -> Result<()> {
    let path = config.resolve(&args.file);
    let mut session = Session::new();
    match session.load_file(&path) {
        Ok(datums) => {
            println!("{}: {} top-level form(s), no syntax errors", path.display(), datums.len());
            Ok(())
        }
        Err(err) => {
            if let schemer_engine::EngineError::Scheme(scheme_err) = &err {
                report_scheme_error(scheme_err);
            }
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn check_reports_a_well_formed_file_without_evaluating() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.scm");
        std::fs::write(&path, "(define x (unbound-is-fine-since-we-never-eval))").unwrap();
        let args = CheckArgs { file: path };
        assert!(run_check(args, &Config::default()).is_ok());
    }

    #[test]
    fn check_reports_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.scm");
        std::fs::write(&path, "(+ 1 2").unwrap();
        let args = CheckArgs { file: path };
        assert!(run_check(args, &Config::default()).is_err());
    }
}
