//! Subcommand implementations.
//!
//! Each submodule implements one CLI subcommand and exposes a single `run`
//! entry point taking parsed arguments and returning `Result<(), CliError>`.
pub mod run;
