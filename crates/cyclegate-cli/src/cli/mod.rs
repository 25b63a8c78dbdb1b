//! Clap CLI definition: root struct, subcommands, and shared argument types.
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// A CLI argument that is either a filesystem path or the stdin sentinel `"-"`.
///
/// Parsing `"-"` yields [`PathOrStdin::Stdin`]; anything else yields
/// [`PathOrStdin::Path`]. This avoids stringly-typed handling of the stdin
/// sentinel throughout the codebase.
#[derive(Clone, Debug)]
pub enum PathOrStdin {
    /// Read from standard input.
    Stdin,
    /// Read from the given filesystem path.
    Path(PathBuf),
}

impl std::str::FromStr for PathOrStdin {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(PathOrStdin::Stdin)
        } else {
            Ok(PathOrStdin::Path(PathBuf::from(s)))
        }
    }
}

/// Output format for CLI commands.
///
/// `Human` emits plain text lines to stdout and diagnostics to stderr.
/// `Json` emits one NDJSON object per inserted pair plus a closing summary
/// object.
#[derive(Clone, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default).
    Human,
    /// Structured NDJSON output.
    Json,
}

/// A rectangular sub-block of the ancestor relation, for the diagnostic dump.
///
/// Written as `ROWSxCOLS`, optionally anchored at `+ROW,COL`; the anchor
/// defaults to the top-left corner. Examples: `6x6`, `4x8+16,0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowSpec {
    /// Number of relation rows (descendant nodes) to show.
    pub rows: usize,
    /// Number of relation columns (candidate ancestors) to show.
    pub cols: usize,
    /// First row of the block.
    pub row_start: usize,
    /// First column of the block.
    pub col_start: usize,
}

impl std::str::FromStr for WindowSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (shape, anchor) = match s.split_once('+') {
            Some((shape, anchor)) => (shape, Some(anchor)),
            None => (s, None),
        };

        let (rows, cols) = shape
            .split_once('x')
            .ok_or_else(|| format!("expected ROWSxCOLS[+ROW,COL], got {s:?}"))?;
        let rows: usize = rows
            .parse()
            .map_err(|_| format!("bad row count {rows:?} in {s:?}"))?;
        let cols: usize = cols
            .parse()
            .map_err(|_| format!("bad column count {cols:?} in {s:?}"))?;

        let (row_start, col_start) = match anchor {
            Some(anchor) => {
                let (row, col) = anchor
                    .split_once(',')
                    .ok_or_else(|| format!("expected anchor ROW,COL after '+' in {s:?}"))?;
                let row: usize = row
                    .parse()
                    .map_err(|_| format!("bad anchor row {row:?} in {s:?}"))?;
                let col: usize = col
                    .parse()
                    .map_err(|_| format!("bad anchor column {col:?} in {s:?}"))?;
                (row, col)
            }
            None => (0, 0),
        };

        Ok(WindowSpec {
            rows,
            cols,
            row_start,
            col_start,
        })
    }
}

/// All top-level subcommands exposed by the `cyclegate` binary.
#[derive(Subcommand)]
pub enum Command {
    /// Read `origin destination` pairs and insert links, rejecting any that
    /// would close a directed cycle.
    Run {
        /// Path to a link-pair file, or `-` for stdin.
        #[arg(value_name = "FILE", default_value = "-")]
        file: PathOrStdin,

        /// Node universe size; identifiers must be in `[0, N)`.
        ///
        /// Can also be set via the `CYCLEGATE_NODES` environment variable.
        /// The CLI flag takes precedence over the environment variable.
        #[arg(
            long,
            value_name = "N",
            env = "CYCLEGATE_NODES",
            default_value_t = cyclegate_core::DEFAULT_NODE_COUNT
        )]
        nodes: usize,

        /// Exit with status 1 if any link was rejected.
        #[arg(long)]
        strict: bool,

        /// Never print the interactive `start end:` prompt, even on a TTY.
        #[arg(long)]
        no_prompt: bool,

        /// After the loop, dump a window of the ancestor relation to stderr,
        /// e.g. `6x6` or `4x8+16,0`.
        #[arg(long, value_name = "SPEC")]
        window: Option<WindowSpec>,
    },
}

/// Root CLI struct for the `cyclegate` binary.
///
/// All global flags are defined here and marked `global = true` so that clap
/// propagates them to every subcommand.
#[derive(Parser)]
#[command(
    name = "cyclegate",
    version,
    about = "Cycle-preventing link insertion over a fixed node universe",
    long_about = "Maintains the transitive ancestor relation over a fixed set of\n\
                  integer-identified nodes and rejects any proposed directed link\n\
                  that would close a cycle, in one pass with no graph traversal."
)]
pub struct Cli {
    /// Active subcommand.
    #[command(subcommand)]
    pub command: Command,

    /// Output format: human (default) or json.
    #[arg(long, short = 'f', default_value = "human", global = true)]
    pub format: OutputFormat,

    /// Suppress per-link output lines; keep the summary and errors.
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Disable ANSI color codes in diagnostic output.
    ///
    /// The `NO_COLOR` environment variable (any value, per
    /// <https://no-color.org>) has the same effect.
    #[arg(long, global = true)]
    pub no_color: bool,
}
