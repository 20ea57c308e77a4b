//! Per-byte quote-aware transforms.
//!
//! A `ByteMapper` is a pure transition function: it takes one input byte
//! and the current `QuoteState` and returns the output byte together with
//! the next state. The caller owns the state and threads it through the
//! whole stream, across read boundaries.

use crate::config::{Config, DELIMITER_SENTINEL, RECORD_SEPARATOR_SENTINEL};

/// Position of the scanner relative to quoted fields.
///
/// ```text
///              quote                 quote
/// Unquoted ──────────▶ Quoted ──────────────▶ QuotedPendingEscape
///    ▲                   ▲                        │
///    │                   └──────── quote ─────────┤
///    └──────────────────── any other byte ────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteState {
    #[default]
    Unquoted,
    Quoted,
    /// A quote byte was seen inside a quoted field. The next byte decides
    /// between an escaped quote (another quote byte) and the end of the field.
    QuotedPendingEscape,
}

impl QuoteState {
    /// True while inside a quoted field, including the pending-escape case.
    pub fn is_quoted(self) -> bool {
        !matches!(self, QuoteState::Unquoted)
    }
}

/// A per-byte stream transform.
pub trait ByteMapper {
    /// Map one byte, returning the output byte and the next state.
    fn map(&self, byte: u8, state: QuoteState) -> (u8, QuoteState);

    /// The display name of this mapper.
    fn name(&self) -> &str;

    /// Map a buffer in place, returning the state after its last byte.
    fn map_chunk(&self, chunk: &mut [u8], mut state: QuoteState) -> QuoteState {
        for byte in chunk.iter_mut() {
            let (out, next) = self.map(*byte, state);
            *byte = out;
            state = next;
        }
        state
    }
}

/// Replaces delimiters and record separators inside quoted fields with
/// sentinel bytes.
#[derive(Debug, Clone, Copy)]
pub struct SubstitutingMapper {
    delimiter: u8,
    quote: u8,
    record_separator: u8,
}

impl SubstitutingMapper {
    pub fn new(config: &Config) -> Self {
        Self {
            delimiter: config.delimiter(),
            quote: config.quote(),
            record_separator: config.record_separator(),
        }
    }
}

impl ByteMapper for SubstitutingMapper {
    fn map(&self, byte: u8, state: QuoteState) -> (u8, QuoteState) {
        match state {
            QuoteState::QuotedPendingEscape => {
                if byte == self.quote {
                    (byte, QuoteState::Quoted)
                } else {
                    (byte, QuoteState::Unquoted)
                }
            }
            QuoteState::Quoted => {
                if byte == self.quote {
                    (byte, QuoteState::QuotedPendingEscape)
                } else if byte == self.delimiter {
                    (DELIMITER_SENTINEL, QuoteState::Quoted)
                } else if byte == self.record_separator {
                    (RECORD_SEPARATOR_SENTINEL, QuoteState::Quoted)
                } else {
                    (byte, QuoteState::Quoted)
                }
            }
            QuoteState::Unquoted => {
                if byte == self.quote {
                    (byte, QuoteState::Quoted)
                } else {
                    (byte, QuoteState::Unquoted)
                }
            }
        }
    }

    fn name(&self) -> &str {
        "substitute"
    }
}

/// Maps sentinel bytes back to the configured delimiter and record separator.
///
/// Stateless: the state argument is passed through untouched.
#[derive(Debug, Clone, Copy)]
pub struct RestoringMapper {
    delimiter: u8,
    record_separator: u8,
}

impl RestoringMapper {
    pub fn new(config: &Config) -> Self {
        Self {
            delimiter: config.delimiter(),
            record_separator: config.record_separator(),
        }
    }
}

impl ByteMapper for RestoringMapper {
    fn map(&self, byte: u8, state: QuoteState) -> (u8, QuoteState) {
        match byte {
            DELIMITER_SENTINEL => (self.delimiter, state),
            RECORD_SEPARATOR_SENTINEL => (self.record_separator, state),
            _ => (byte, state),
        }
    }

    fn name(&self) -> &str {
        "restore"
    }
}
