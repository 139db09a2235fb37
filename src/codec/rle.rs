//! Reference run-length codec: one byte at a time.

use super::{check_capacity, emit_run, initial_capacity, Codec, CodecError, Malformed, SENTINEL};

/// Byte-at-a-time reference implementation of the buffer format.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunLengthCodec;

impl Codec for RunLengthCodec {
    fn name(&self) -> &'static str {
        "reference"
    }

    fn encode_body(&self, stream: &[u8], out: &mut Vec<u8>) -> Result<(), CodecError> {
        let Some((&first, rest)) = stream.split_first() else {
            return Ok(());
        };

        let mut current = first;
        let mut start = 0;
        let mut count = 1;

        for (i, &byte) in rest.iter().enumerate() {
            if byte == current {
                count += 1;
            } else {
                emit_run(out, current, count, start)?;
                current = byte;
                start = i + 1;
                count = 1;
            }
        }

        // Flush the pending run at end of stream
        emit_run(out, current, count, start)
    }

    fn decode_body(&self, body: &[u8], expected_len: usize) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::with_capacity(initial_capacity(body.len(), expected_len));
        let mut i = 0;

        while i < body.len() {
            let byte = body[i];
            if byte == SENTINEL {
                if i + 2 >= body.len() {
                    return Err(Malformed::TruncatedEscape { offset: i }.into());
                }
                let count = body[i + 1] as usize;
                let value = body[i + 2];
                if count == 0 {
                    return Err(Malformed::ZeroRun { offset: i }.into());
                }
                check_capacity(out.len(), count, expected_len)?;
                for _ in 0..count {
                    out.push(value);
                }
                i += 3;
            } else {
                check_capacity(out.len(), 1, expected_len)?;
                out.push(byte);
                i += 1;
            }
        }

        Ok(out)
    }
}
