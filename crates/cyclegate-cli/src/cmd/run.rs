//! Implementation of the `run` subcommand: the link-insertion console loop.
//!
//! The loop reads whitespace-separated `origin destination` pairs from a file
//! or stdin, feeds each pair to the in-memory ancestor store, and prints one
//! outcome line per pair. Malformed lines are reported as `input ignored:`
//! warnings and skipped; they never abort the loop and never count as
//! rejections. After end of input the loop optionally dumps a window of the
//! ancestor relation, prints the accepted/rejected summary, and (under
//! `--strict`) fails if anything was rejected.
use std::fmt;
use std::io::Write as _;

use cyclegate_core::LinkStore;

use crate::error::CliError;
use crate::format::{self, FormatterConfig};
use crate::io::open_source;
use crate::{OutputFormat, PathOrStdin, WindowSpec};

// ---------------------------------------------------------------------------
// Pair parsing
// ---------------------------------------------------------------------------

/// Why an input line could not be interpreted as an `origin destination` pair.
///
/// These are warnings, not errors: the line is reported and skipped.
#[derive(Debug, PartialEq, Eq)]
enum PairParseError {
    /// The line did not split into exactly two whitespace-separated fields.
    WrongFieldCount {
        /// How many fields the line actually had.
        found: usize,
    },
    /// A field was present but is not a signed decimal integer.
    NotAnInteger {
        /// The offending token.
        token: String,
    },
}

impl fmt::Display for PairParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongFieldCount { found } => {
                write!(f, "expected 2 fields, found {found}")
            }
            Self::NotAnInteger { token } => {
                write!(f, "not an integer: {token:?}")
            }
        }
    }
}

/// Splits `line` on ASCII whitespace into exactly two `i64` fields.
///
/// Range checking is not done here: any value that parses as `i64` is passed
/// through so the store can report it as out of range with the actual value.
fn parse_pair(line: &str) -> Result<(i64, i64), PairParseError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 2 {
        return Err(PairParseError::WrongFieldCount {
            found: fields.len(),
        });
    }
    let origin: i64 = fields[0].parse().map_err(|_| PairParseError::NotAnInteger {
        token: fields[0].to_owned(),
    })?;
    let destination: i64 = fields[1].parse().map_err(|_| PairParseError::NotAnInteger {
        token: fields[1].to_owned(),
    })?;
    Ok((origin, destination))
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

/// Executes the `run` subcommand.
///
/// # Errors
///
/// Returns a [`CliError`] with exit code 2 for unreadable input, an empty
/// universe, or an out-of-range window, and exit code 1 when `--strict` is
/// set and at least one link was rejected.
pub fn run(
    file: &PathOrStdin,
    nodes: usize,
    strict: bool,
    no_prompt: bool,
    window: Option<WindowSpec>,
    output_format: &OutputFormat,
    config: &FormatterConfig,
) -> Result<(), CliError> {
    if nodes == 0 {
        return Err(CliError::EmptyUniverse);
    }

    let mut source = open_source(file)?;
    let prompting = source.is_interactive() && !no_prompt && !config.quiet;

    let mut store = LinkStore::new(nodes);
    let mut accepted: usize = 0;
    let mut rejected: usize = 0;

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();

    loop {
        if prompting {
            let mut err_lock = stderr.lock();
            write!(err_lock, "start end: ").map_err(|e| stderr_error(&e))?;
            err_lock.flush().map_err(|e| stderr_error(&e))?;
        }

        let Some(line) = source.next_line()? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let (origin, destination) = match parse_pair(&line) {
            Ok(pair) => pair,
            Err(reason) => {
                format::write_ignored(
                    &mut stderr.lock(),
                    &line,
                    &reason.to_string(),
                    output_format,
                    config,
                )
                .map_err(|e| stderr_error(&e))?;
                continue;
            }
        };

        let outcome = store.insert_link(origin, destination);
        if outcome.is_accepted() {
            accepted += 1;
        } else {
            rejected += 1;
        }
        format::write_outcome(
            &mut stdout.lock(),
            origin,
            destination,
            &outcome,
            nodes,
            output_format,
            config,
        )
        .map_err(|e| stdout_error(&e))?;
    }

    if let Some(spec) = window {
        let block = store
            .ancestor_window(spec.row_start, spec.col_start, spec.rows, spec.cols)
            .map_err(|e| CliError::WindowOutOfRange {
                detail: e.to_string(),
            })?;
        format::write_window(
            &mut stderr.lock(),
            spec.row_start,
            spec.col_start,
            &block,
            output_format,
        )
        .map_err(|e| stderr_error(&e))?;
    }

    format::write_summary(&mut stderr.lock(), accepted, rejected, output_format)
        .map_err(|e| stderr_error(&e))?;

    if strict && rejected > 0 {
        return Err(CliError::RejectionsPresent { rejected });
    }
    Ok(())
}

fn stdout_error(e: &std::io::Error) -> CliError {
    CliError::IoError {
        source: "stdout".to_owned(),
        detail: e.to_string(),
    }
}

fn stderr_error(e: &std::io::Error) -> CliError {
    CliError::IoError {
        source: "stderr".to_owned(),
        detail: e.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
