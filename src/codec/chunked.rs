//! Fast-path codec working on whole slices instead of single bytes.

use super::{check_capacity, emit_run, initial_capacity, Codec, CodecError, Malformed, SENTINEL};

/// Slice-grouping implementation of the buffer format.
///
/// Encoding groups equal neighbours with `chunk_by`; decoding copies
/// literal spans between escapes in one go. Output is byte-identical to
/// [`super::RunLengthCodec`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ChunkedCodec;

impl Codec for ChunkedCodec {
    fn name(&self) -> &'static str {
        "chunked"
    }

    fn encode_body(&self, stream: &[u8], out: &mut Vec<u8>) -> Result<(), CodecError> {
        let mut offset = 0;
        for run in stream.chunk_by(|a, b| a == b) {
            emit_run(out, run[0], run.len(), offset)?;
            offset += run.len();
        }
        Ok(())
    }

    fn decode_body(&self, body: &[u8], expected_len: usize) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::with_capacity(initial_capacity(body.len(), expected_len));
        let mut rest = body;

        while !rest.is_empty() {
            let offset = body.len() - rest.len();
            match rest {
                [SENTINEL, 0, _, ..] => {
                    return Err(Malformed::ZeroRun { offset }.into());
                }
                [SENTINEL, count, value, tail @ ..] => {
                    let count = *count as usize;
                    check_capacity(out.len(), count, expected_len)?;
                    out.resize(out.len() + count, *value);
                    rest = tail;
                }
                [SENTINEL, ..] => {
                    return Err(Malformed::TruncatedEscape { offset }.into());
                }
                _ => {
                    let span = rest
                        .iter()
                        .position(|&b| b == SENTINEL)
                        .unwrap_or(rest.len());
                    check_capacity(out.len(), span, expected_len)?;
                    out.extend_from_slice(&rest[..span]);
                    rest = &rest[span..];
                }
            }
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::RunLengthCodec;

    fn bodies(stream: &[u8]) -> (Vec<u8>, Vec<u8>) {
        let mut fast = Vec::new();
        let mut reference = Vec::new();
        ChunkedCodec.encode_body(stream, &mut fast).unwrap();
        RunLengthCodec.encode_body(stream, &mut reference).unwrap();
        (fast, reference)
    }

    #[test]
    fn test_matches_reference_bytes() {
        for stream in [
            &b"a"[..],
            &b"aab\nbbb"[..],
            &b"@@@@@@@@\n@@@@@@@@"[..],
            &b" .-*oO#@"[..],
            &[b'#'; 600][..],
        ] {
            let (fast, reference) = bodies(stream);
            assert_eq!(fast, reference, "stream {:?}", stream);
        }
    }

    #[test]
    fn test_decode_copies_literal_spans() {
        let out = ChunkedCodec
            .decode_body(&[b'a', b'b', b'c', 0x00, 4, b'-', b'\n', b'z'], 9)
            .unwrap();
        assert_eq!(out, b"abc----\nz");
    }

    #[test]
    fn test_decode_errors_match_reference() {
        for (body, expected) in [
            (&[0x00, 0, b'a'][..], 4),
            (&[b'x', 0x00, 9][..], 10),
            (&[0x00, 0xff, b'a'][..], 10),
            (&[b'a', b'b', b'c'][..], 2),
        ] {
            assert_eq!(
                ChunkedCodec.decode_body(body, expected),
                RunLengthCodec.decode_body(body, expected),
                "body {:?}",
                body
            );
        }
    }
}
