//! Codec error types

use super::header::HEADER_LEN;
use crate::art::ArtError;

/// Errors raised while encoding or decoding a compressed buffer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("invalid style code {0} (expected 0 or 1)")]
    InvalidStyleCode(u8),

    #[error("malformed buffer: {0}")]
    MalformedBuffer(#[from] Malformed),

    /// The stream holds a byte equal to the escape sentinel. Palette
    /// characters and the row separator are all non-zero, so this is a
    /// programming error rather than bad input.
    #[error("sentinel byte 0x00 in character stream at offset {offset}")]
    EncodeInvariantViolation { offset: usize },
}

/// The specific integrity check a buffer failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Malformed {
    #[error("{len} bytes is shorter than the {}-byte header", HEADER_LEN)]
    ShortHeader { len: usize },

    #[error("header declares a {width}x{height} grid")]
    ZeroDimension { width: u16, height: u16 },

    #[error("escape at body offset {offset} is truncated")]
    TruncatedEscape { offset: usize },

    #[error("zero-length run at body offset {offset}")]
    ZeroRun { offset: usize },

    #[error("decoded {actual} bytes, header declares {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("missing row separator at stream offset {offset}")]
    MissingSeparator { offset: usize },

    #[error("unexpected byte 0x{byte:02x} at stream offset {offset}")]
    BadCell { offset: usize, byte: u8 },

    #[error("{0}")]
    Grid(ArtError),
}

impl From<ArtError> for CodecError {
    fn from(err: ArtError) -> Self {
        match err {
            ArtError::InvalidStyleCode(code) => CodecError::InvalidStyleCode(code),
            other => CodecError::MalformedBuffer(Malformed::Grid(other)),
        }
    }
}

impl CodecError {
    /// True for any decode-time integrity failure.
    pub fn is_malformed(&self) -> bool {
        matches!(self, CodecError::MalformedBuffer(_))
    }
}
