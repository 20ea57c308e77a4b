//! Mode dispatch over one or more inputs.
//!
//! Substitute and restore modes stream every input through the matching
//! mapper into a single output. Header mode lists the fields of the first
//! record of the first input and reads nothing else.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::driver::{StreamDriver, StreamStats};
use crate::error::{CsvQuoteError, Result};
use crate::header::{HeaderInspector, write_fields};
use crate::mapper::{RestoringMapper, SubstitutingMapper};

/// What to do with the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Replace delimiters and record separators inside quoted fields.
    #[default]
    Substitute,
    /// Put the original delimiters and record separators back.
    Restore,
    /// List the fields of the first record.
    Header,
}

impl Mode {
    /// Resolve mode flags. Header inspection takes precedence over restore.
    pub fn from_flags(restore: bool, header: bool) -> Self {
        match (header, restore) {
            (true, _) => Mode::Header,
            (false, true) => Mode::Restore,
            (false, false) => Mode::Substitute,
        }
    }
}

/// Run one input through the selected mode.
///
/// Header mode reports no stream counters and returns default stats.
pub fn execute<R: Read, W: Write>(
    config: &Config,
    mode: Mode,
    reader: &mut R,
    writer: &mut W,
) -> Result<StreamStats> {
    match mode {
        Mode::Substitute => {
            StreamDriver::new(SubstitutingMapper::new(config), config).run(reader, writer)
        }
        Mode::Restore => {
            StreamDriver::new(RestoringMapper::new(config), config).run(reader, writer)
        }
        Mode::Header => {
            let fields = HeaderInspector::new(config).inspect(reader)?;
            write_fields(&fields, writer)?;
            Ok(StreamStats::default())
        }
    }
}

/// Run each named file in order, or standard input when `paths` is empty.
///
/// Every input starts from the unquoted state. In header mode only the
/// first input is read.
pub fn execute_paths<W: Write>(
    config: &Config,
    mode: Mode,
    paths: &[PathBuf],
    writer: &mut W,
) -> Result<StreamStats> {
    if paths.is_empty() {
        log::debug!("{mode:?}: reading standard input");
        let stdin = io::stdin();
        let stats = execute(config, mode, &mut stdin.lock(), writer)?;
        warn_if_unterminated("<stdin>", &stats);
        return Ok(stats);
    }

    let paths = if mode == Mode::Header {
        &paths[..1]
    } else {
        paths
    };

    let mut total = StreamStats::default();
    for path in paths {
        log::debug!("{mode:?}: reading {}", path.display());
        let mut file = open_input(path)?;
        let stats = execute(config, mode, &mut file, writer).map_err(|e| match e {
            CsvQuoteError::Io {
                op: "read input",
                source,
            } => CsvQuoteError::Read {
                path: path.clone(),
                source,
            },
            other => other,
        })?;
        warn_if_unterminated(&path.display().to_string(), &stats);
        total.merge(stats);
    }
    Ok(total)
}

fn open_input(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| CsvQuoteError::Open {
        path: path.to_path_buf(),
        source,
    })
}

fn warn_if_unterminated(name: &str, stats: &StreamStats) {
    if stats.final_state.is_quoted() {
        log::warn!("{name}: input ends inside a quoted field");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::QuoteState;
    use std::fs;
    use tempfile::TempDir;

    fn run(mode: Mode, input: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        execute(&Config::default(), mode, &mut &input[..], &mut out).unwrap();
        out
    }

    #[test]
    fn test_mode_from_flags() {
        assert_eq!(Mode::from_flags(false, false), Mode::Substitute);
        assert_eq!(Mode::from_flags(true, false), Mode::Restore);
        assert_eq!(Mode::from_flags(false, true), Mode::Header);
        assert_eq!(Mode::from_flags(true, true), Mode::Header);
        assert_eq!(Mode::default(), Mode::Substitute);
    }

    #[test]
    fn test_substitute_then_restore() {
        let input = b"name,comment\nann,\"likes a, b\nand c\"\nbob,\"said \"\"hi\"\"\"\n";
        let substituted = run(Mode::Substitute, input);
        assert_eq!(
            substituted,
            b"name,comment\nann,\"likes a\x1F b\x1Eand c\"\nbob,\"said \"\"hi\"\"\"\n"
        );
        // safe to split on record separators now
        assert_eq!(substituted.split(|&b| b == b'\n').count(), 4);
        assert_eq!(run(Mode::Restore, &substituted), input);
    }

    #[test]
    fn test_header_mode_ignores_restore_semantics() {
        let out = run(Mode::Header, b"a,b,\"c,d\"\ne,f,g\n");
        assert_eq!(out, b" 1\t: a\n 2\t: b\n 3\t: c,d\n");
    }

    #[test]
    fn test_header_mode_returns_default_stats() {
        let mut out = Vec::new();
        let stats = execute(
            &Config::default(),
            Mode::Header,
            &mut &b"a\n"[..],
            &mut out,
        )
        .unwrap();
        assert_eq!(stats, StreamStats::default());
    }

    #[test]
    fn test_execute_paths_multiple_files() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("first.csv");
        let second = dir.path().join("second.csv");
        // first file ends inside a quoted field
        fs::write(&first, b"a,\"b,c").unwrap();
        fs::write(&second, b"d,e\n\"f,g\"\n").unwrap();

        let mut out = Vec::new();
        let stats = execute_paths(
            &Config::default(),
            Mode::Substitute,
            &[first, second],
            &mut out,
        )
        .unwrap();
        // second file starts unquoted again
        assert_eq!(out, b"a,\"b\x1Fcd,e\n\"f\x1Fg\"\n");
        assert_eq!(stats.bytes, 16);
        assert_eq!(stats.final_state, QuoteState::Unquoted);
    }

    #[test]
    fn test_execute_paths_header_reads_first_file_only() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("first.csv");
        let missing = dir.path().join("missing.csv");
        fs::write(&first, b"x,\"y\nz\"\n1,2\n").unwrap();

        let mut out = Vec::new();
        execute_paths(&Config::default(), Mode::Header, &[first, missing], &mut out).unwrap();
        assert_eq!(out, b" 1\t: x\n 2\t: y\nz\n");
    }

    #[test]
    fn test_execute_paths_read_error_names_file() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.csv");
        fs::write(&good, b"a,b\n").unwrap();
        // opening a directory succeeds, reading it fails
        let subdir = dir.path().join("subdir");
        fs::create_dir(&subdir).unwrap();

        let mut out = Vec::new();
        let err = execute_paths(
            &Config::default(),
            Mode::Substitute,
            &[good, subdir.clone()],
            &mut out,
        )
        .unwrap_err();
        assert_eq!(out, b"a,b\n");
        match &err {
            CsvQuoteError::Read { path, .. } => assert_eq!(path, &subdir),
            other => panic!("Expected Read error, got {other:?}"),
        }
        assert!(err.to_string().contains("subdir"));
    }

    #[test]
    fn test_execute_paths_missing_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.csv");
        let err = execute_paths(
            &Config::default(),
            Mode::Substitute,
            &[missing.clone()],
            &mut Vec::<u8>::new(),
        )
        .unwrap_err();
        match err {
            CsvQuoteError::Open { path, .. } => assert_eq!(path, missing),
            other => panic!("Expected Open error, got {other:?}"),
        }
    }
}
