//! Fixed 5-byte buffer header.
//!
//! ```text
//! offset  size  field
//! 0       1     style code
//! 1       2     width   (big-endian)
//! 3       2     height  (big-endian)
//! ```

use super::error::{CodecError, Malformed};
use crate::art::{AsciiImage, StyleCode};

/// Size of the header in bytes.
pub const HEADER_LEN: usize = 5;

/// Decoded header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub style: StyleCode,
    pub width: u16,
    pub height: u16,
}

impl Header {
    pub fn of(art: &AsciiImage) -> Self {
        Self {
            style: art.style(),
            width: art.width(),
            height: art.height(),
        }
    }

    pub fn to_bytes(self) -> [u8; HEADER_LEN] {
        let [w0, w1] = self.width.to_be_bytes();
        let [h0, h1] = self.height.to_be_bytes();
        [self.style.as_u8(), w0, w1, h0, h1]
    }

    /// Parse the header at the start of `buf`.
    pub fn parse(buf: &[u8]) -> Result<Self, CodecError> {
        let Some(bytes) = buf.get(..HEADER_LEN) else {
            return Err(Malformed::ShortHeader { len: buf.len() }.into());
        };

        let style = StyleCode::try_from(bytes[0])?;
        let width = u16::from_be_bytes([bytes[1], bytes[2]]);
        let height = u16::from_be_bytes([bytes[3], bytes[4]]);

        if width == 0 || height == 0 {
            return Err(Malformed::ZeroDimension { width, height }.into());
        }

        Ok(Self {
            style,
            width,
            height,
        })
    }

    /// Number of cells in the grid.
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Length of the flat stream the body must decode to.
    pub fn stream_len(&self) -> usize {
        self.cell_count() + self.height as usize - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_is_big_endian() {
        let header = Header {
            style: StyleCode::BlackOnWhite,
            width: 0x0102,
            height: 0x0304,
        };
        assert_eq!(header.to_bytes(), [0x01, 0x01, 0x02, 0x03, 0x04]);
        assert_eq!(Header::parse(&header.to_bytes()).unwrap(), header);
    }

    #[test]
    fn test_parse_ignores_trailing_body() {
        let header = Header::parse(&[0, 0, 3, 0, 2, 0x61, 0x61]).unwrap();
        assert_eq!(header.width, 3);
        assert_eq!(header.height, 2);
        assert_eq!(header.stream_len(), 7);
    }

    #[test]
    fn test_parse_rejects_short_buffer() {
        assert_eq!(
            Header::parse(&[0, 0, 1, 0]),
            Err(CodecError::MalformedBuffer(Malformed::ShortHeader { len: 4 }))
        );
    }

    #[test]
    fn test_parse_rejects_unknown_style() {
        assert_eq!(
            Header::parse(&[7, 0, 1, 0, 1]),
            Err(CodecError::InvalidStyleCode(7))
        );
    }

    #[test]
    fn test_parse_rejects_zero_dimension() {
        assert!(Header::parse(&[0, 0, 0, 0, 1]).unwrap_err().is_malformed());
        assert!(Header::parse(&[0, 0, 1, 0, 0]).unwrap_err().is_malformed());
    }

    #[test]
    fn test_max_dimensions() {
        let header = Header::parse(&[0, 0xff, 0xff, 0xff, 0xff]).unwrap();
        assert_eq!(header.width, u16::MAX);
        assert_eq!(header.cell_count(), 65_535 * 65_535);
    }
}
