//! CLI error types with associated exit codes.
//!
//! [`CliError`] is the top-level error type for the `cyclegate` binary. Every
//! variant maps to a stable exit code (1 or 2) via [`CliError::exit_code`]:
//!
//! - Exit code **2** — input failure: the tool could not read the input or
//!   was configured with an unusable universe or window.
//! - Exit code **1** — logical failure: the tool ran to completion but the
//!   result is a well-defined failure (`--strict` with rejected links).
//!
//! Rejected links themselves are NOT errors; they are ordinary outcome lines.
use std::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// CliError
// ---------------------------------------------------------------------------

/// All error conditions that the `cyclegate` CLI can produce.
///
/// Use [`CliError::exit_code`] to obtain the exit code associated with each
/// variant. [`CliError::message`] returns the human-readable error string
/// that should be printed to stderr before exiting.
#[derive(Debug)]
pub enum CliError {
    // --- Exit code 2: input failures ---
    /// A file argument could not be found on the filesystem.
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// The process lacks permission to read a file.
    PermissionDenied {
        /// The path that could not be read.
        path: PathBuf,
    },

    /// The input bytes are not valid UTF-8.
    InvalidUtf8 {
        /// A human-readable label for the source (`"-"` for stdin, or the
        /// filesystem path).
        source: String,
        /// The byte offset of the first invalid sequence, when known (disk
        /// files only; `None` for the streamed stdin reader).
        byte_offset: Option<usize>,
    },

    /// An I/O error occurred while reading from stdin.
    StdinReadError {
        /// The underlying I/O error message.
        detail: String,
    },

    /// A generic I/O error not covered by the more specific variants above.
    IoError {
        /// A human-readable label for the source or sink.
        source: String,
        /// The underlying I/O error message.
        detail: String,
    },

    /// `--nodes 0` was requested; an empty universe can accept no link.
    EmptyUniverse,

    /// The `--window` block extends past the configured node universe.
    WindowOutOfRange {
        /// A description of the offending bounds.
        detail: String,
    },

    // --- Exit code 1: logical failures ---
    /// `--strict` was set and at least one link was rejected.
    ///
    /// The per-link outcomes have already been printed; this variant exists
    /// so `main` can exit with status 1 cleanly.
    RejectionsPresent {
        /// How many links were rejected.
        rejected: usize,
    },
}

impl CliError {
    /// Returns the process exit code for this error.
    ///
    /// - `2` — input failure (unreadable input, bad universe or window).
    /// - `1` — logical failure (`--strict` with rejections).
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. }
            | Self::PermissionDenied { .. }
            | Self::InvalidUtf8 { .. }
            | Self::StdinReadError { .. }
            | Self::IoError { .. }
            | Self::EmptyUniverse
            | Self::WindowOutOfRange { .. } => 2,

            Self::RejectionsPresent { .. } => 1,
        }
    }

    /// Returns a human-readable error message suitable for printing to stderr.
    pub fn message(&self) -> String {
        match self {
            Self::FileNotFound { path } => {
                format!("error: file not found: {}", path.display())
            }
            Self::PermissionDenied { path } => {
                format!("error: permission denied: {}", path.display())
            }
            Self::InvalidUtf8 {
                source,
                byte_offset: Some(offset),
            } => {
                format!("error: invalid UTF-8 in {source}: first invalid byte at offset {offset}")
            }
            Self::InvalidUtf8 {
                source,
                byte_offset: None,
            } => {
                format!("error: invalid UTF-8 in {source}")
            }
            Self::StdinReadError { detail } => {
                format!("error: failed to read stdin: {detail}")
            }
            Self::IoError { source, detail } => {
                format!("error: I/O error on {source}: {detail}")
            }
            Self::EmptyUniverse => {
                "error: --nodes must be at least 1: an empty universe can accept no link"
                    .to_owned()
            }
            Self::WindowOutOfRange { detail } => {
                format!("error: window out of range: {detail}")
            }
            Self::RejectionsPresent { rejected } => {
                format!("error: strict mode: {rejected} rejected link(s)")
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for CliError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
