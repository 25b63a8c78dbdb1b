//! Output formatting: human-readable and JSON (NDJSON) modes.
//!
//! This module implements two output strategies for the `run` loop:
//!
//! - **Human mode** (default): one plain line per inserted pair to stdout;
//!   `input ignored:` warnings, the window dump, and the closing summary to
//!   stderr. The warning prefix is color-coded when colors are enabled;
//!   colors are disabled when `--no-color` is set, the `NO_COLOR`
//!   environment variable is present (per <https://no-color.org>), or stderr
//!   is not a TTY.
//! - **JSON mode**: each pair is serialized as a single-line JSON object
//!   (NDJSON) to stdout; warnings, window, and summary are NDJSON objects on
//!   stderr.
//!
//! Both modes support a **quiet** flag that suppresses the per-pair lines and
//! warnings while keeping the summary and hard errors.
use std::io::{IsTerminal as _, Write};

use cyclegate_core::InsertOutcome;
use serde::Serialize;

use crate::OutputFormat;

// ---------------------------------------------------------------------------
// Color support detection
// ---------------------------------------------------------------------------

/// Returns `true` if ANSI color codes should be emitted to stderr.
///
/// Colors are disabled when any of the following conditions hold:
/// - `no_color_flag` is `true` (the `--no-color` CLI flag was passed).
/// - The `NO_COLOR` environment variable is present (any non-empty value).
/// - stderr is not a TTY (e.g. the output is piped to a file).
pub fn colors_enabled(no_color_flag: bool) -> bool {
    if no_color_flag {
        return false;
    }
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    std::io::stderr().is_terminal()
}

const ANSI_YELLOW: &str = "\x1b[33m";
const ANSI_RESET: &str = "\x1b[0m";

// ---------------------------------------------------------------------------
// FormatterConfig
// ---------------------------------------------------------------------------

/// Configuration for the output writers, derived from CLI flags.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Whether ANSI colors are enabled for stderr diagnostics.
    pub colors: bool,
    /// Suppress per-pair output lines and warnings.
    pub quiet: bool,
}

impl FormatterConfig {
    /// Constructs a [`FormatterConfig`] from the raw CLI flags.
    ///
    /// `no_color_flag` is the `--no-color` boolean. Color detection also
    /// checks the `NO_COLOR` env var and the stderr TTY state.
    pub fn from_flags(no_color_flag: bool, quiet: bool) -> Self {
        Self {
            colors: colors_enabled(no_color_flag),
            quiet,
        }
    }
}

// ---------------------------------------------------------------------------
// Per-pair outcome lines
// ---------------------------------------------------------------------------

/// One NDJSON record for an inserted pair: the endpoints plus the flattened,
/// internally tagged outcome.
#[derive(Serialize)]
struct OutcomeRecord<'a> {
    origin: i64,
    destination: i64,
    #[serde(flatten)]
    outcome: &'a InsertOutcome,
}

/// Writes one outcome line for the pair `origin -> destination` in human
/// format.
///
/// Suppressed in quiet mode. `node_count` is quoted in the out-of-range
/// message so the reader sees the universe the value was checked against.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_outcome_human<W: Write>(
    writer: &mut W,
    origin: i64,
    destination: i64,
    outcome: &InsertOutcome,
    node_count: usize,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if config.quiet {
        return Ok(());
    }
    match outcome {
        InsertOutcome::Accepted => {
            writeln!(writer, "link accepted: {origin} -> {destination}")
        }
        InsertOutcome::RejectedCycle => {
            writeln!(writer, "cycle found: {origin} -> {destination}")
        }
        InsertOutcome::RejectedSelfLoop => {
            writeln!(writer, "self-loop rejected: {origin} -> {destination}")
        }
        InsertOutcome::RejectedOutOfRange { value } => {
            writeln!(writer, "out of range: {value} (universe is 0..{node_count})")
        }
    }
}

/// Writes one outcome record for the pair as a NDJSON line.
///
/// Suppressed in quiet mode.
///
/// # Errors
///
/// Returns an error if serialization or writing to `writer` fails.
pub fn write_outcome_json<W: Write>(
    writer: &mut W,
    origin: i64,
    destination: i64,
    outcome: &InsertOutcome,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if config.quiet {
        return Ok(());
    }
    let record = OutcomeRecord {
        origin,
        destination,
        outcome,
    };
    let json = serde_json::to_string(&record).map_err(std::io::Error::other)?;
    writeln!(writer, "{json}")
}

/// Writes one outcome line in the requested format.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_outcome<W: Write>(
    writer: &mut W,
    origin: i64,
    destination: i64,
    outcome: &InsertOutcome,
    node_count: usize,
    format: &OutputFormat,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    match format {
        OutputFormat::Human => {
            write_outcome_human(writer, origin, destination, outcome, node_count, config)
        }
        OutputFormat::Json => write_outcome_json(writer, origin, destination, outcome, config),
    }
}

// ---------------------------------------------------------------------------
// Ignored-input warnings
// ---------------------------------------------------------------------------

/// Writes an `input ignored:` warning for a malformed line.
///
/// Human mode: `input ignored: <reason>: "<line>"`, with the prefix colored
/// yellow when colors are enabled. JSON mode: a NDJSON object with `ignored`
/// and `reason` fields. Suppressed in quiet mode.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_ignored<W: Write>(
    writer: &mut W,
    line: &str,
    reason: &str,
    format: &OutputFormat,
    config: &FormatterConfig,
) -> std::io::Result<()> {
    if config.quiet {
        return Ok(());
    }
    match format {
        OutputFormat::Human => {
            if config.colors {
                writeln!(
                    writer,
                    "{ANSI_YELLOW}input ignored:{ANSI_RESET} {reason}: {line:?}"
                )
            } else {
                writeln!(writer, "input ignored: {reason}: {line:?}")
            }
        }
        OutputFormat::Json => {
            let json = serde_json::json!({ "ignored": line, "reason": reason });
            writeln!(writer, "{json}")
        }
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Writes the closing accepted/rejected summary.
///
/// Human mode: `N accepted, M rejected`. JSON mode:
/// `{"summary":{"accepted":N,"rejected":M}}`. Written even in quiet mode —
/// the summary is the one line a quiet batch run still wants.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_summary<W: Write>(
    writer: &mut W,
    accepted: usize,
    rejected: usize,
    format: &OutputFormat,
) -> std::io::Result<()> {
    match format {
        OutputFormat::Human => {
            writeln!(writer, "{accepted} accepted, {rejected} rejected")
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "summary": { "accepted": accepted, "rejected": rejected }
            });
            writeln!(writer, "{json}")
        }
    }
}

// ---------------------------------------------------------------------------
// Diagnostic window
// ---------------------------------------------------------------------------

/// Writes a rectangular sub-block of the ancestor relation.
///
/// Human mode: one line per relation row of space-separated `0`/`1` bits,
/// followed by a blank line. JSON mode: a single object carrying the anchor,
/// the shape, and the bit rows.
///
/// # Errors
///
/// Returns an error only if writing to `writer` fails.
pub fn write_window<W: Write>(
    writer: &mut W,
    row_start: usize,
    col_start: usize,
    window: &[Vec<bool>],
    format: &OutputFormat,
) -> std::io::Result<()> {
    match format {
        OutputFormat::Human => {
            for row in window {
                let bits: Vec<&str> = row.iter().map(|&b| if b { "1" } else { "0" }).collect();
                writeln!(writer, "{}", bits.join(" "))?;
            }
            writeln!(writer)
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "window": {
                    "row_start": row_start,
                    "col_start": col_start,
                    "rows": window.len(),
                    "cols": window.first().map_or(0, Vec::len),
                    "bits": window,
                }
            });
            writeln!(writer, "{json}")
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
