//! Run-length codec for persisting ASCII art.
//!
//! A compressed buffer is a 5-byte [`Header`] followed by a body that
//! run-length encodes the image's flat character stream (rows joined by
//! `\n`, none trailing):
//!
//! - runs of 1 to 3 identical bytes are written literally,
//! - runs of 4 or more become `[0x00, count, byte]` escape triples,
//!   split every 255 bytes.
//!
//! Two interchangeable strategies implement the format:
//! - [`RunLengthCodec`] - byte-at-a-time reference implementation
//! - [`ChunkedCodec`] - slice-grouping fast path
//!
//! Both produce identical bytes and satisfy `decode(encode(a)) == a`.

mod chunked;
mod error;
mod header;
mod rle;

pub use chunked::ChunkedCodec;
pub use error::{CodecError, Malformed};
pub use header::{Header, HEADER_LEN};
pub use rle::RunLengthCodec;

use crate::art::{is_printable, AsciiImage, ROW_SEPARATOR};

/// Escape marker introducing a `[SENTINEL, count, byte]` triple.
pub const SENTINEL: u8 = 0x00;

/// Longest run a single escape triple can carry.
pub const MAX_RUN: usize = u8::MAX as usize;

/// Shortest run written as an escape triple; shorter runs are literal.
pub const MIN_ESCAPED_RUN: usize = 4;

/// An encoding strategy for the compressed buffer format.
///
/// Implementors supply the body transform; header handling and the final
/// grid validation are shared.
pub trait Codec {
    /// Short identifier for logs.
    fn name(&self) -> &'static str;

    /// Append the run-length body for `stream` to `out`.
    fn encode_body(&self, stream: &[u8], out: &mut Vec<u8>) -> Result<(), CodecError>;

    /// Expand `body` into the flat stream. Must fail as soon as the output
    /// would exceed `expected_len` bytes.
    fn decode_body(&self, body: &[u8], expected_len: usize) -> Result<Vec<u8>, CodecError>;

    /// Encode an image into a compressed buffer.
    fn encode(&self, art: &AsciiImage) -> Result<Vec<u8>, CodecError> {
        let stream = art.stream();
        let mut out = Vec::with_capacity(HEADER_LEN + stream.len());
        out.extend_from_slice(&Header::of(art).to_bytes());
        self.encode_body(&stream, &mut out)?;

        log::debug!(
            "{} encoded {}x{} image: {} stream bytes -> {} buffer bytes",
            self.name(),
            art.width(),
            art.height(),
            stream.len(),
            out.len()
        );
        Ok(out)
    }

    /// Decode a compressed buffer into an image.
    fn decode(&self, buf: &[u8]) -> Result<AsciiImage, CodecError> {
        let header = Header::parse(buf)?;
        let stream = self.decode_body(&buf[HEADER_LEN..], header.stream_len())?;
        rebuild(header, &stream)
    }
}

/// Selectable codec strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodecKind {
    #[default]
    Reference,
    Chunked,
}

static REFERENCE: RunLengthCodec = RunLengthCodec;
static CHUNKED: ChunkedCodec = ChunkedCodec;

impl CodecKind {
    pub fn codec(self) -> &'static dyn Codec {
        match self {
            CodecKind::Reference => &REFERENCE,
            CodecKind::Chunked => &CHUNKED,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "reference" => Some(CodecKind::Reference),
            "chunked" => Some(CodecKind::Chunked),
            _ => None,
        }
    }
}

/// Encode with the reference strategy.
pub fn encode(art: &AsciiImage) -> Result<Vec<u8>, CodecError> {
    REFERENCE.encode(art)
}

/// Decode with the reference strategy.
pub fn decode(buf: &[u8]) -> Result<AsciiImage, CodecError> {
    REFERENCE.decode(buf)
}

/// Append one run to `out`, literal or escaped.
///
/// `offset` is the run's position in the stream, reported if the run
/// consists of sentinel bytes.
pub(crate) fn emit_run(
    out: &mut Vec<u8>,
    byte: u8,
    count: usize,
    offset: usize,
) -> Result<(), CodecError> {
    if byte == SENTINEL {
        return Err(CodecError::EncodeInvariantViolation { offset });
    }

    if count < MIN_ESCAPED_RUN {
        out.extend(std::iter::repeat(byte).take(count));
        return Ok(());
    }

    let mut remaining = count;
    while remaining > 0 {
        let n = remaining.min(MAX_RUN);
        out.extend_from_slice(&[SENTINEL, n as u8, byte]);
        remaining -= n;
    }
    Ok(())
}

/// Most stream bytes one body byte can expand to: a 3-byte escape carries
/// at most [`MAX_RUN`] bytes.
const MAX_EXPANSION: usize = MAX_RUN / 3;

/// Initial output capacity for decoding `body_len` body bytes.
///
/// The declared length comes from an untrusted header, so the reservation
/// is bounded by what the body can actually produce.
pub(crate) fn initial_capacity(body_len: usize, expected: usize) -> usize {
    expected.min(body_len.saturating_mul(MAX_EXPANSION))
}

/// Fail if appending `count` bytes would overrun the declared stream.
pub(crate) fn check_capacity(len: usize, count: usize, expected: usize) -> Result<(), CodecError> {
    if len + count > expected {
        return Err(Malformed::LengthMismatch {
            expected,
            actual: len + count,
        }
        .into());
    }
    Ok(())
}

/// Validate a decoded stream against the header and rebuild the grid.
fn rebuild(header: Header, stream: &[u8]) -> Result<AsciiImage, CodecError> {
    let expected = header.stream_len();
    if stream.len() != expected {
        return Err(Malformed::LengthMismatch {
            expected,
            actual: stream.len(),
        }
        .into());
    }

    let stride = header.width as usize + 1;
    let mut cells = Vec::with_capacity(header.cell_count());
    for (offset, &byte) in stream.iter().enumerate() {
        if offset % stride == stride - 1 {
            if byte != ROW_SEPARATOR {
                return Err(Malformed::MissingSeparator { offset }.into());
            }
        } else if is_printable(byte) {
            cells.push(byte);
        } else {
            return Err(Malformed::BadCell { offset, byte }.into());
        }
    }

    Ok(AsciiImage::new(cells, header.width, header.height, header.style)?)
}
