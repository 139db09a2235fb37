//! The rendered ASCII-art value object.
//!
//! An [`AsciiImage`] is a `width` x `height` grid of printable single-byte
//! characters plus a [`StyleCode`] choosing how it is displayed. It is
//! immutable once built: restyling produces a new value.

use serde::Serialize;
use std::fmt;

/// Row separator in the flat character stream.
pub const ROW_SEPARATOR: u8 = b'\n';

/// Display palette selector, persisted as a single byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum StyleCode {
    /// Light characters on a dark background
    #[default]
    WhiteOnBlack = 0,
    /// Dark characters on a light background
    BlackOnWhite = 1,
}

impl StyleCode {
    /// The wire value of this style.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Get a human-readable name for the style.
    pub fn name(self) -> &'static str {
        match self {
            StyleCode::WhiteOnBlack => "white-on-black",
            StyleCode::BlackOnWhite => "black-on-white",
        }
    }

    /// Inline CSS used when the image is shown in a page.
    pub fn css(self) -> &'static str {
        match self {
            StyleCode::WhiteOnBlack => "background-color: black; color: white; line-height: 10px",
            StyleCode::BlackOnWhite => "background-color: white; color: black; line-height: 10px",
        }
    }

    /// Parse a style from its name, as used in config files.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().replace('_', "-").as_str() {
            "white-on-black" => Some(StyleCode::WhiteOnBlack),
            "black-on-white" => Some(StyleCode::BlackOnWhite),
            _ => None,
        }
    }
}

impl TryFrom<u8> for StyleCode {
    type Error = ArtError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(StyleCode::WhiteOnBlack),
            1 => Ok(StyleCode::BlackOnWhite),
            other => Err(ArtError::InvalidStyleCode(other)),
        }
    }
}

/// Errors raised while building an [`AsciiImage`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArtError {
    #[error("invalid style code {0} (expected 0 or 1)")]
    InvalidStyleCode(u8),

    #[error("invalid dimensions {width}x{height}: both must be at least 1")]
    InvalidDimensions { width: usize, height: usize },

    #[error("dimensions {width}x{height} do not fit in 16 bits")]
    DimensionsOverflow { width: usize, height: usize },

    #[error("expected {expected} cells for the grid, got {actual}")]
    CellCountMismatch { expected: usize, actual: usize },

    #[error("row {row} has {actual} characters, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("non-printable byte 0x{byte:02x} at cell {offset}")]
    NonPrintable { offset: usize, byte: u8 },
}

/// A rendered character grid with its display style.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AsciiImage {
    cells: Vec<u8>,
    width: u16,
    height: u16,
    style: StyleCode,
}

/// Header-level facts about an image, for listings and JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArtMetadata {
    pub width: u16,
    pub height: u16,
    pub style: StyleCode,
    pub style_code: u8,
}

impl AsciiImage {
    /// Build an image from row-major cells without separators.
    ///
    /// Fails unless both dimensions are non-zero, `cells.len()` equals
    /// `width * height`, and every cell is printable ASCII (0x20..=0x7E).
    pub fn new(cells: Vec<u8>, width: u16, height: u16, style: StyleCode) -> Result<Self, ArtError> {
        if width == 0 || height == 0 {
            return Err(ArtError::InvalidDimensions {
                width: width as usize,
                height: height as usize,
            });
        }

        let expected = width as usize * height as usize;
        if cells.len() != expected {
            return Err(ArtError::CellCountMismatch {
                expected,
                actual: cells.len(),
            });
        }

        if let Some((offset, &byte)) = cells.iter().enumerate().find(|(_, b)| !is_printable(**b)) {
            return Err(ArtError::NonPrintable { offset, byte });
        }

        Ok(Self {
            cells,
            width,
            height,
            style,
        })
    }

    /// Build an image from newline-separated rows.
    ///
    /// A single trailing newline is tolerated. All rows must have the same
    /// length.
    pub fn from_text(text: &str, style: StyleCode) -> Result<Self, ArtError> {
        let text = text.strip_suffix('\n').unwrap_or(text);
        let rows: Vec<&[u8]> = text.as_bytes().split(|&b| b == ROW_SEPARATOR).collect();

        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        let height = rows.len();
        if width == 0 {
            return Err(ArtError::InvalidDimensions { width, height });
        }
        if width > u16::MAX as usize || height > u16::MAX as usize {
            return Err(ArtError::DimensionsOverflow { width, height });
        }

        let mut cells = Vec::with_capacity(width * height);
        for (row, bytes) in rows.iter().enumerate() {
            if bytes.len() != width {
                return Err(ArtError::RaggedRow {
                    row,
                    expected: width,
                    actual: bytes.len(),
                });
            }
            cells.extend_from_slice(bytes);
        }

        Self::new(cells, width as u16, height as u16, style)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn style(&self) -> StyleCode {
        self.style
    }

    /// Row-major cells without separators.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Iterate over the rows of the grid.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks_exact(self.width as usize)
    }

    /// Length of the canonical flat stream: cells plus one separator
    /// between each pair of rows.
    pub fn stream_len(&self) -> usize {
        self.cells.len() + self.height as usize - 1
    }

    /// The canonical flat stream: each row followed by a newline, except
    /// the last.
    pub fn stream(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.stream_len());
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                out.push(ROW_SEPARATOR);
            }
            out.extend_from_slice(row);
        }
        out
    }

    /// The grid as text, rows separated by newlines, none trailing.
    pub fn to_text(&self) -> String {
        // cells are validated printable ASCII
        self.stream().into_iter().map(char::from).collect()
    }

    /// A copy of this image with a different style.
    pub fn with_style(&self, style: StyleCode) -> Self {
        Self {
            style,
            ..self.clone()
        }
    }

    pub fn metadata(&self) -> ArtMetadata {
        ArtMetadata {
            width: self.width,
            height: self.height,
            style: self.style,
            style_code: self.style.as_u8(),
        }
    }
}

impl fmt::Display for AsciiImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// Printable single-byte ASCII, space included.
#[inline]
pub fn is_printable(byte: u8) -> bool {
    (0x20..=0x7e).contains(&byte)
}
