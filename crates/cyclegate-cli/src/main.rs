//! Entry point for the `cyclegate` binary.
//!
//! Parses the command line, dispatches to the subcommand implementation in
//! [`cmd`], and converts any [`error::CliError`] into a stderr message plus
//! the matching exit code (2 for input failures, 1 for strict-mode failures).
use clap::Parser as _;

mod cli;
mod cmd;
mod error;
mod format;
mod io;

pub use cli::{Cli, Command, OutputFormat, PathOrStdin, WindowSpec};

use format::FormatterConfig;

fn main() {
    let cli = Cli::parse();
    let config = FormatterConfig::from_flags(cli.no_color, cli.quiet);

    let result = match cli.command {
        Command::Run {
            ref file,
            nodes,
            strict,
            no_prompt,
            window,
        } => cmd::run::run(file, nodes, strict, no_prompt, window, &cli.format, &config),
    };

    if let Err(e) = result {
        eprintln!("{}", e.message());
        std::process::exit(e.exit_code());
    }
}
