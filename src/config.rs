//! Byte configuration for a single run.
//!
//! Three bytes carry meaning in the input stream: the field delimiter, the
//! quote byte and the record separator. Two further byte values are
//! reserved as out-of-band sentinels and must never be configured.

use crate::error::{CsvQuoteError, Result};

/// Stand-in for a delimiter found inside a quoted field (ASCII Unit Separator).
pub const DELIMITER_SENTINEL: u8 = 0x1F;

/// Stand-in for a record separator found inside a quoted field (ASCII Record Separator).
pub const RECORD_SEPARATOR_SENTINEL: u8 = 0x1E;

/// Read buffer size used by the stream driver.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Immutable run configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    delimiter: u8,
    quote: u8,
    record_separator: u8,
    line_buffered: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            record_separator: b'\n',
            line_buffered: false,
        }
    }
}

impl Config {
    /// Build a configuration, rejecting overlapping or reserved bytes.
    pub fn new(delimiter: u8, quote: u8, record_separator: u8) -> Result<Self> {
        let config = Self {
            delimiter,
            quote,
            record_separator,
            line_buffered: false,
        };
        config.validate()?;
        Ok(config)
    }

    /// Flush output after every record separator written.
    pub fn with_line_buffering(mut self, line_buffered: bool) -> Self {
        self.line_buffered = line_buffered;
        self
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    pub fn quote(&self) -> u8 {
        self.quote
    }

    pub fn record_separator(&self) -> u8 {
        self.record_separator
    }

    pub fn line_buffered(&self) -> bool {
        self.line_buffered
    }

    fn validate(&self) -> Result<()> {
        let named = [
            ("delimiter", self.delimiter),
            ("quote", self.quote),
            ("record separator", self.record_separator),
        ];

        for (name, byte) in named {
            if byte == DELIMITER_SENTINEL || byte == RECORD_SEPARATOR_SENTINEL {
                return Err(CsvQuoteError::InvalidConfig(format!(
                    "{name} byte 0x{byte:02X} is reserved as a sentinel"
                )));
            }
        }

        for (i, (a_name, a)) in named.iter().enumerate() {
            for (b_name, b) in &named[i + 1..] {
                if a == b {
                    return Err(CsvQuoteError::InvalidConfig(format!(
                        "{a_name} and {b_name} must differ (both 0x{a:02X})"
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Parse a command-line character argument into a single byte.
///
/// Accepts one raw byte or one of the escapes `\t`, `\n`, `\r`, `\0`, `\\`.
pub fn parse_byte(arg: &str) -> Result<u8> {
    match arg.as_bytes() {
        [b] => Ok(*b),
        [b'\\', b't'] => Ok(b'\t'),
        [b'\\', b'n'] => Ok(b'\n'),
        [b'\\', b'r'] => Ok(b'\r'),
        [b'\\', b'0'] => Ok(0),
        [b'\\', b'\\'] => Ok(b'\\'),
        _ => Err(CsvQuoteError::InvalidByte(arg.to_string())),
    }
}
