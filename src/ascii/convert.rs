//! Bitmap loading and raster-to-grid conversion.

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, RgbaImage};
use std::io;
use std::path::{Path, PathBuf};

use super::charset::map_pixel;
use super::dimensions::scaled_dimensions;
use crate::art::{ArtError, AsciiImage, StyleCode};
use crate::retry::RetryPolicy;

/// Resampling filter used when the grid size differs from the bitmap.
const RESIZE_FILTER: FilterType = FilterType::Triangle;

/// Errors that can occur while turning a bitmap into ASCII art.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("no such file: \"{}\" (gave up after {attempts} attempts)", .path.display())]
    SourceNotFound { path: PathBuf, attempts: u32 },

    #[error("failed to read \"{}\": {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("failed to decode bitmap: {0}")]
    Decode(#[from] image::ImageError),

    #[error("resize percentage must be greater than 0, got {0}")]
    InvalidResize(f64),

    #[error("scaled size {width}x{height} exceeds 65535 characters on an axis")]
    TooLarge { width: u64, height: u64 },

    #[error("source bitmap has no pixels")]
    EmptySource,

    #[error(transparent)]
    Art(#[from] ArtError),
}

/// Convert a decoded bitmap into ASCII art.
///
/// The bitmap is first resampled to `ceil(dim * resize_percentage / 100)`
/// on each axis (percentage clamped to 200), then every pixel becomes one
/// palette character, rows top to bottom, columns left to right.
pub fn convert_bitmap(
    bitmap: &DynamicImage,
    resize_percentage: f64,
    style: StyleCode,
) -> Result<AsciiImage, ConvertError> {
    let (img_width, img_height) = bitmap.dimensions();
    let (width, height) = scaled_dimensions(img_width, img_height, resize_percentage)?;

    let rgba = bitmap.to_rgba8();
    let rgba = if (width as u32, height as u32) == (img_width, img_height) {
        rgba
    } else {
        image::imageops::resize(&rgba, width as u32, height as u32, RESIZE_FILTER)
    };

    Ok(render_rgba(&rgba, style)?)
}

/// Map every pixel of an RGBA buffer to a palette character, unscaled.
pub fn render_rgba(rgba: &RgbaImage, style: StyleCode) -> Result<AsciiImage, ArtError> {
    let (img_width, img_height) = rgba.dimensions();
    let (width, height) = match (u16::try_from(img_width), u16::try_from(img_height)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(ArtError::DimensionsOverflow {
                width: img_width as usize,
                height: img_height as usize,
            })
        }
    };

    let mut cells = Vec::with_capacity(width as usize * height as usize);
    for row in rgba.rows() {
        cells.extend(row.map(|px| map_pixel(px.0)));
    }

    AsciiImage::new(cells, width, height, style)
}

/// Read and decode a bitmap, re-checking a missing file per `policy`.
///
/// Only a missing file is retried; other read failures and undecodable
/// content fail immediately.
pub fn load_bitmap(path: &Path, policy: &RetryPolicy) -> Result<DynamicImage, ConvertError> {
    let bytes = policy
        .run(|| std::fs::read(path))
        .map_err(|(source, attempts)| {
            if source.kind() == io::ErrorKind::NotFound {
                log::warn!("{} still missing after {} attempts", path.display(), attempts);
                ConvertError::SourceNotFound {
                    path: path.to_path_buf(),
                    attempts,
                }
            } else {
                ConvertError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

    let bitmap = image::load_from_memory(&bytes)?;
    log::debug!(
        "loaded {} ({}x{})",
        path.display(),
        bitmap.width(),
        bitmap.height()
    );
    Ok(bitmap)
}

/// Load the bitmap at `path` and convert it.
pub fn convert(
    path: &Path,
    resize_percentage: f64,
    style: StyleCode,
    policy: &RetryPolicy,
) -> Result<AsciiImage, ConvertError> {
    let bitmap = load_bitmap(path, policy)?;
    let art = convert_bitmap(&bitmap, resize_percentage, style)?;
    log::info!(
        "converted {} to {}x{} characters",
        path.display(),
        art.width(),
        art.height()
    );
    Ok(art)
}
