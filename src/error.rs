//! Error type shared by the library and the `csvquote` binary.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while configuring or running the filter.
///
/// Every I/O variant is fatal for the run; there is no retry path.
#[derive(Debug, Error)]
pub enum CsvQuoteError {
    /// An input file could not be opened.
    #[error("failed to open file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A read, write or flush failed mid-stream.
    #[error("failed to {op}: {source}")]
    Io {
        op: &'static str,
        #[source]
        source: io::Error,
    },

    /// Reading a named input file failed after it was opened.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Delimiter, quote and record separator are not distinct or collide
    /// with a sentinel byte.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A command-line character argument is not a single byte.
    #[error("invalid character argument {0:?}: expected exactly one byte")]
    InvalidByte(String),
}

impl CsvQuoteError {
    pub(crate) fn io(op: &'static str, source: io::Error) -> Self {
        CsvQuoteError::Io { op, source }
    }

    /// True when the output side went away, e.g. `csvquote big.csv | head`.
    pub fn is_broken_pipe(&self) -> bool {
        match self {
            CsvQuoteError::Io { source, .. } => source.kind() == io::ErrorKind::BrokenPipe,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, CsvQuoteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_error_names_path() {
        let err = CsvQuoteError::Open {
            path: PathBuf::from("missing.csv"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        let msg = err.to_string();
        assert!(msg.contains("missing.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_io_error_names_operation() {
        let err = CsvQuoteError::io("write output", io::Error::other("disk full"));
        assert_eq!(err.to_string(), "failed to write output: disk full");
    }

    #[test]
    fn test_read_error_names_path() {
        let err = CsvQuoteError::Read {
            path: PathBuf::from("data/part-2.csv"),
            source: io::Error::other("Is a directory"),
        };
        assert_eq!(
            err.to_string(),
            "failed to read data/part-2.csv: Is a directory"
        );
    }

    #[test]
    fn test_is_broken_pipe() {
        let closed = CsvQuoteError::io(
            "write output",
            io::Error::new(io::ErrorKind::BrokenPipe, "closed"),
        );
        assert!(closed.is_broken_pipe());
        assert!(!CsvQuoteError::io("write output", io::Error::other("disk full")).is_broken_pipe());
        assert!(!CsvQuoteError::InvalidByte("ab".to_string()).is_broken_pipe());
    }
}
