//! First-record field listing.
//!
//! Runs the substituting state machine over the start of the stream and
//! collects the fields of the first record, stopping at the first record
//! separator that is not inside a quoted field. Structure is decided from the
//! raw input byte together with the quote state, never from the mapped
//! output, so bytes that already look like sentinels are treated as data.

use std::io::{Read, Write};

use crate::config::{Config, DEFAULT_CHUNK_SIZE};
use crate::driver::read_chunk;
use crate::error::{CsvQuoteError, Result};
use crate::mapper::{ByteMapper, QuoteState, SubstitutingMapper};

/// Field buffers for the record being inspected.
///
/// Starts with one empty field; each unquoted delimiter opens another.
/// The last field is always the one being filled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAccumulator {
    fields: Vec<Vec<u8>>,
}

impl Default for FieldAccumulator {
    fn default() -> Self {
        Self {
            fields: vec![Vec::new()],
        }
    }
}

impl FieldAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a byte to the current field.
    pub fn push(&mut self, byte: u8) {
        if let Some(field) = self.fields.last_mut() {
            field.push(byte);
        }
    }

    /// Close the current field and start an empty one.
    pub fn next_field(&mut self) {
        self.fields.push(Vec::new());
    }

    /// Number of fields seen so far, never zero.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn into_fields(self) -> Vec<Vec<u8>> {
        self.fields
    }
}

/// Lists the fields of the first record of a stream.
pub struct HeaderInspector {
    mapper: SubstitutingMapper,
    delimiter: u8,
    record_separator: u8,
    chunk_size: usize,
}

impl HeaderInspector {
    pub fn new(config: &Config) -> Self {
        Self {
            mapper: SubstitutingMapper::new(config),
            delimiter: config.delimiter(),
            record_separator: config.record_separator(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Override the read buffer size. A size of zero is treated as one.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Collect the first record's fields.
    ///
    /// Quoted fields are reported without their enclosing quotes, and a
    /// doubled quote inside one yields a single quote byte. Reading stops at
    /// the first unquoted record separator or at end of input.
    pub fn inspect<R: Read>(&self, reader: &mut R) -> Result<Vec<Vec<u8>>> {
        let mut buf = vec![0u8; self.chunk_size];
        let mut fields = FieldAccumulator::new();
        let mut state = QuoteState::Unquoted;

        'read: loop {
            let n = read_chunk(reader, &mut buf)?;
            if n == 0 {
                break;
            }
            for &byte in &buf[..n] {
                let prev = state;
                let (_, next) = self.mapper.map(byte, state);
                state = next;

                match next {
                    QuoteState::Unquoted => {
                        if byte == self.record_separator {
                            break 'read;
                        } else if byte == self.delimiter {
                            fields.next_field();
                        } else {
                            fields.push(byte);
                        }
                    }
                    // opening quote
                    QuoteState::Quoted if prev == QuoteState::Unquoted => {}
                    // field content, or the second quote of an escaped pair
                    QuoteState::Quoted => fields.push(byte),
                    // closing quote or first half of an escaped pair
                    QuoteState::QuotedPendingEscape => {}
                }
            }
        }

        if state == QuoteState::Quoted {
            log::warn!("first record ends inside a quoted field");
        }
        log::debug!("header: {} fields", fields.field_count());
        Ok(fields.into_fields())
    }
}

/// Print fields as ` <n>\t: <bytes>` lines, numbered from 1.
pub fn write_fields<W: Write>(fields: &[Vec<u8>], writer: &mut W) -> Result<()> {
    let write_err = |e| CsvQuoteError::io("write output", e);
    for (i, field) in fields.iter().enumerate() {
        write!(writer, " {}\t: ", i + 1).map_err(write_err)?;
        writer.write_all(field).map_err(write_err)?;
        writer.write_all(b"\n").map_err(write_err)?;
    }
    writer
        .flush()
        .map_err(|e| CsvQuoteError::io("flush output", e))
}
