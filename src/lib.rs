//! # csvquote
//!
//! Make quoted CSV safe for line and field oriented Unix text tools.
//!
//! Tools like `cut`, `head`, `sort` and `awk` split on every delimiter and
//! every newline, including the ones that sit inside quoted fields. This
//! crate rewrites those embedded bytes to reserved non-printing sentinels so
//! the naive tools see clean structure, and restores them afterwards:
//!
//! ```text
//! csvquote data.csv | cut -d, -f2,5 | csvquote -u
//! ```
//!
//! ## Overview
//!
//! - **Substitute**: inside quoted fields, the delimiter becomes 0x1F and
//!   the record separator becomes 0x1E
//! - **Restore**: 0x1F and 0x1E become the delimiter and record separator again
//! - **Header**: list the fields of the first record, numbered from 1
//!
//! A doubled quote inside a quoted field is a literal quote. The quote state
//! is carried across read boundaries, so output never depends on how the
//! input happens to be chunked.
//!
//! ## Example
//!
//! ```
//! use csvquote::{Config, Mode, execute};
//!
//! let config = Config::default();
//! let mut substituted: Vec<u8> = Vec::new();
//! execute(&config, Mode::Substitute, &mut &b"a,\"b,c\",d\n"[..], &mut substituted).unwrap();
//! assert_eq!(substituted, b"a,\"b\x1Fc\",d\n");
//!
//! let mut restored: Vec<u8> = Vec::new();
//! execute(&config, Mode::Restore, &mut &substituted[..], &mut restored).unwrap();
//! assert_eq!(restored, b"a,\"b,c\",d\n");
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod executor;
pub mod header;
pub mod mapper;

pub use config::{
    Config, DEFAULT_CHUNK_SIZE, DELIMITER_SENTINEL, RECORD_SEPARATOR_SENTINEL, parse_byte,
};
pub use driver::{StreamDriver, StreamStats};
pub use error::{CsvQuoteError, Result};
pub use executor::{Mode, execute, execute_paths};
pub use header::{FieldAccumulator, HeaderInspector, write_fields};
pub use mapper::{ByteMapper, QuoteState, RestoringMapper, SubstitutingMapper};
