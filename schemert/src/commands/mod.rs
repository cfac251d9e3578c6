//! Subcommand implementations for the `schemert` CLI.

pub mod check;
pub mod repl;
pub mod run;

pub use check::{run_check, CheckArgs};
pub use repl::{run_repl, ReplArgs};
pub use run::{run_run, RunArgs};
