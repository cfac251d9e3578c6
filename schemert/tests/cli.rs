//! End-to-end CLI tests driven through the compiled binary, using
//! `assert_cmd`, `predicates`, and `tempfile`.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn schemert() -> Command {
    Command::cargo_bin("schemert").unwrap()
}

#[test]
fn run_evaluates_a_file_and_exits_cleanly() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prog.scm");
    std::fs::write(&path, "(define x (+ 1 2)) (* x x)").unwrap();

    schemert()
        .arg("run")
        .arg(&path)
        .assert()
        .success();
}

#[test]
fn run_on_a_missing_file_fails() {
    schemert()
        .arg("run")
        .arg("/nonexistent/path/prog.scm")
        .assert()
        .failure();
}

#[test]
fn check_reports_the_form_count_for_a_well_formed_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prog.scm");
    std::fs::write(&path, "(+ 1 2) (+ 3 4)").unwrap();

    schemert()
        .arg("check")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 top-level form"));
}

#[test]
fn check_fails_on_unterminated_syntax() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.scm");
    std::fs::write(&path, "(+ 1 2").unwrap();

    schemert()
        .arg("check")
        .arg(&path)
        .assert()
        .failure();
}

#[test]
fn repl_evaluates_piped_input_and_prints_the_result() {
    schemert()
        .arg("repl")
        .write_stdin("(+ 1 2)\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("3"));
}

#[test]
fn global_verbose_flag_is_accepted_before_the_subcommand() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prog.scm");
    std::fs::write(&path, "(+ 1 1)").unwrap();

    schemert()
        .arg("--verbose")
        .arg("run")
        .arg(&path)
        .assert()
        .success();
}
