//! Line-oriented input for the console loop.
//!
//! This module is the single entry point for all input I/O in the
//! `cyclegate` binary. `cyclegate-core` never touches an I/O stream; all
//! reading happens here.
//!
//! Key behaviours:
//! - Disk files: read eagerly up front, UTF-8 validated with byte-offset
//!   reporting, then iterated line by line.
//! - Stdin: streamed one line at a time so an interactive session sees each
//!   outcome before typing the next pair; TTY detection enables prompting.
//! - All I/O errors are converted to [`CliError`] variants with exit code 2.
use std::io::{BufRead as _, IsTerminal as _};
use std::path::Path;

use crate::PathOrStdin;
use crate::error::CliError;

// ---------------------------------------------------------------------------
// LineSource
// ---------------------------------------------------------------------------

/// A source of input lines for the `run` loop.
///
/// Construct with [`open_source`]; drain with [`LineSource::next_line`].
#[derive(Debug)]
pub enum LineSource {
    /// All lines of a disk file, read eagerly at open time.
    File(std::vec::IntoIter<String>),
    /// The process stdin stream, read lazily one line per call.
    Stdin {
        /// Whether stdin is a TTY (enables the interactive prompt).
        interactive: bool,
    },
}

/// Opens `source` as a [`LineSource`].
///
/// For a disk path the whole file is read and validated here, so any file
/// error surfaces before the first line is consumed. For stdin no I/O happens
/// until the first [`LineSource::next_line`] call.
///
/// # Errors
///
/// Returns [`CliError`] (exit code 2) for file-not-found, permission-denied,
/// other I/O failures, and invalid UTF-8 (with the byte offset of the first
/// bad sequence).
pub fn open_source(source: &PathOrStdin) -> Result<LineSource, CliError> {
    match source {
        PathOrStdin::Path(path) => {
            let bytes = std::fs::read(path).map_err(|e| io_error_to_cli(&e, path))?;
            let text = bytes_to_string(&bytes, &path.display().to_string())?;
            let lines: Vec<String> = text.lines().map(str::to_owned).collect();
            Ok(LineSource::File(lines.into_iter()))
        }
        PathOrStdin::Stdin => Ok(LineSource::Stdin {
            interactive: std::io::stdin().is_terminal(),
        }),
    }
}

impl LineSource {
    /// Returns `true` when the source is a TTY stdin, i.e. a human is typing.
    pub fn is_interactive(&self) -> bool {
        match self {
            LineSource::File(_) => false,
            LineSource::Stdin { interactive } => *interactive,
        }
    }

    /// Returns the next input line without its trailing newline, or `None`
    /// at end of input.
    ///
    /// # Errors
    ///
    /// [`CliError::StdinReadError`] if the stdin stream fails mid-read, or
    /// [`CliError::InvalidUtf8`] if it produces non-UTF-8 bytes.
    pub fn next_line(&mut self) -> Result<Option<String>, CliError> {
        match self {
            LineSource::File(lines) => Ok(lines.next()),
            LineSource::Stdin { .. } => {
                let mut buf = String::new();
                let read = std::io::stdin()
                    .lock()
                    .read_line(&mut buf)
                    .map_err(stdin_error_to_cli)?;
                if read == 0 {
                    return Ok(None);
                }
                while buf.ends_with('\n') || buf.ends_with('\r') {
                    buf.pop();
                }
                Ok(Some(buf))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

/// Maps a `std::io::Error` arising from a disk-file operation to a [`CliError`].
fn io_error_to_cli(e: &std::io::Error, path: &Path) -> CliError {
    if e.kind() == std::io::ErrorKind::NotFound {
        CliError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else if e.kind() == std::io::ErrorKind::PermissionDenied {
        CliError::PermissionDenied {
            path: path.to_path_buf(),
        }
    } else {
        CliError::IoError {
            source: path.display().to_string(),
            detail: e.to_string(),
        }
    }
}

/// Maps a `std::io::Error` from the stdin stream to a [`CliError`].
///
/// `read_line` signals non-UTF-8 input as `InvalidData`; the byte offset is
/// not recoverable from a streamed read.
fn stdin_error_to_cli(e: std::io::Error) -> CliError {
    if e.kind() == std::io::ErrorKind::InvalidData {
        CliError::InvalidUtf8 {
            source: "-".to_owned(),
            byte_offset: None,
        }
    } else {
        CliError::StdinReadError {
            detail: e.to_string(),
        }
    }
}

/// Converts a byte buffer to a `String`, returning a [`CliError`] with the
/// byte offset of the first invalid sequence on failure.
fn bytes_to_string(bytes: &[u8], source_label: &str) -> Result<String, CliError> {
    match std::str::from_utf8(bytes) {
        Ok(s) => Ok(s.to_owned()),
        Err(e) => Err(CliError::InvalidUtf8 {
            source: source_label.to_owned(),
            byte_offset: Some(e.valid_up_to()),
        }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]
    #![allow(clippy::panic)]
    #![allow(clippy::wildcard_enum_match_arm)]

    use std::io::Write as _;
    use std::path::PathBuf;

    use super::*;

    /// Creates a named temporary file with the given contents.
    fn temp_file_with(contents: &[u8]) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().expect("create temp file");
        f.write_all(contents).expect("write temp file");
        f
    }

    fn drain(mut source: LineSource) -> Vec<String> {
        let mut lines = Vec::new();
        while let Some(line) = source.next_line().expect("read line") {
            lines.push(line);
        }
        lines
    }

    // ── disk file: happy path ────────────────────────────────────────────────

    #[test]
    fn file_lines_are_read_in_order() {
        let f = temp_file_with(b"1 2\n2 3\n3 1\n");
        let source =
            open_source(&PathOrStdin::Path(f.path().to_path_buf())).expect("open file");
        assert_eq!(drain(source), vec!["1 2", "2 3", "3 1"]);
    }

    #[test]
    fn file_without_trailing_newline_keeps_last_line() {
        let f = temp_file_with(b"1 2\n2 3");
        let source =
            open_source(&PathOrStdin::Path(f.path().to_path_buf())).expect("open file");
        assert_eq!(drain(source), vec!["1 2", "2 3"]);
    }

    #[test]
    fn empty_file_yields_no_lines() {
        let f = temp_file_with(b"");
        let source =
            open_source(&PathOrStdin::Path(f.path().to_path_buf())).expect("open file");
        assert!(drain(source).is_empty());
    }

    #[test]
    fn file_source_is_never_interactive() {
        let f = temp_file_with(b"1 2\n");
        let source =
            open_source(&PathOrStdin::Path(f.path().to_path_buf())).expect("open file");
        assert!(!source.is_interactive());
    }

    // ── disk file: error cases ───────────────────────────────────────────────

    #[test]
    fn nonexistent_file_returns_file_not_found() {
        let err = open_source(&PathOrStdin::Path(PathBuf::from("/no/such/file.links")))
            .expect_err("should fail");
        assert_eq!(err.exit_code(), 2);
        assert!(matches!(err, CliError::FileNotFound { .. }));
    }

    #[test]
    fn invalid_utf8_reports_byte_offset() {
        // Valid ASCII up to byte 3, then an invalid byte.
        let mut data = b"1 2".to_vec();
        data.push(0xFF);
        let f = temp_file_with(&data);
        let err = open_source(&PathOrStdin::Path(f.path().to_path_buf()))
            .expect_err("should fail on bad UTF-8");
        match err {
            CliError::InvalidUtf8 { byte_offset, .. } => {
                assert_eq!(byte_offset, Some(3));
            }
            other => panic!("expected InvalidUtf8, got {other:?}"),
        }
    }
}
