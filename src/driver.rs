//! Chunked streaming loop.
//!
//! Reads the input in fixed-size chunks, maps every byte through the active
//! `ByteMapper`, and writes each mapped chunk straight to the output. The
//! `QuoteState` is carried from one chunk to the next, so the chunk size
//! never changes the output.

use std::io::{ErrorKind, Read, Write};

use crate::config::{Config, DEFAULT_CHUNK_SIZE};
use crate::error::{CsvQuoteError, Result};
use crate::mapper::{ByteMapper, QuoteState};

/// Counters collected over one or more streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreamStats {
    /// Bytes read (and written, the transform is length-preserving).
    pub bytes: u64,
    /// Non-empty reads performed.
    pub chunks: u64,
    /// Quote state after the last byte of the most recent stream.
    pub final_state: QuoteState,
}

impl StreamStats {
    /// Fold the stats of a following stream into these.
    pub fn merge(&mut self, other: StreamStats) {
        self.bytes += other.bytes;
        self.chunks += other.chunks;
        self.final_state = other.final_state;
    }
}

/// Drives a mapper over a reader, writing to a writer.
pub struct StreamDriver<M> {
    mapper: M,
    chunk_size: usize,
    line_buffered: bool,
    record_separator: u8,
}

impl<M: ByteMapper> StreamDriver<M> {
    pub fn new(mapper: M, config: &Config) -> Self {
        Self {
            mapper,
            chunk_size: DEFAULT_CHUNK_SIZE,
            line_buffered: config.line_buffered(),
            record_separator: config.record_separator(),
        }
    }

    /// Override the read buffer size. A size of zero is treated as one.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Run to end of input, starting from `QuoteState::Unquoted`.
    pub fn run<R: Read, W: Write>(&self, reader: &mut R, writer: &mut W) -> Result<StreamStats> {
        let mut buf = vec![0u8; self.chunk_size];
        let mut stats = StreamStats::default();
        let mut state = QuoteState::Unquoted;

        loop {
            let n = read_chunk(reader, &mut buf)?;
            if n == 0 {
                break;
            }
            let chunk = &mut buf[..n];
            state = self.mapper.map_chunk(chunk, state);
            self.write_chunk(writer, chunk)?;
            stats.bytes += n as u64;
            stats.chunks += 1;
        }

        writer
            .flush()
            .map_err(|e| CsvQuoteError::io("flush output", e))?;
        stats.final_state = state;

        log::debug!(
            "{}: {} bytes in {} chunks, final state {:?}",
            self.mapper.name(),
            stats.bytes,
            stats.chunks,
            stats.final_state
        );
        Ok(stats)
    }

    fn write_chunk<W: Write>(&self, writer: &mut W, chunk: &[u8]) -> Result<()> {
        if !self.line_buffered {
            return writer
                .write_all(chunk)
                .map_err(|e| CsvQuoteError::io("write output", e));
        }

        let sep = self.record_separator;
        for line in chunk.split_inclusive(|&b| b == sep) {
            writer
                .write_all(line)
                .map_err(|e| CsvQuoteError::io("write output", e))?;
            if line.last() == Some(&sep) {
                writer
                    .flush()
                    .map_err(|e| CsvQuoteError::io("flush output", e))?;
            }
        }
        Ok(())
    }
}

/// Fill as much of `buf` as one read returns, retrying interrupted reads.
///
/// Returns 0 only at end of input.
pub(crate) fn read_chunk<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    loop {
        match reader.read(buf) {
            Ok(n) => return Ok(n),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(CsvQuoteError::io("read input", e)),
        }
    }
}
