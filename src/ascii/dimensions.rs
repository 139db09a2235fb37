//! Output dimension calculation for percentage-based rescaling.

use super::convert::ConvertError;

/// Largest accepted resize percentage. Larger requests are clamped.
pub const MAX_RESIZE_PERCENTAGE: f64 = 200.0;

/// Clamp a requested resize percentage to the accepted range.
///
/// Values above [`MAX_RESIZE_PERCENTAGE`] are clamped. There is no floor:
/// zero, negative and NaN percentages are rejected instead of producing
/// a degenerate grid.
pub fn clamp_percentage(resize_percentage: f64) -> Result<f64, ConvertError> {
    if resize_percentage.is_nan() || resize_percentage <= 0.0 {
        return Err(ConvertError::InvalidResize(resize_percentage));
    }
    Ok(resize_percentage.min(MAX_RESIZE_PERCENTAGE))
}

/// Calculate the character grid dimensions for a bitmap.
///
/// Each axis is scaled independently: `ceil(original * percentage / 100)`.
///
/// # Arguments
/// * `img_width` - Width of the source bitmap in pixels
/// * `img_height` - Height of the source bitmap in pixels
/// * `resize_percentage` - Scale factor in percent, clamped to 200
///
/// # Returns
/// `(width, height)` in characters, both at least 1 and within 16 bits.
pub fn scaled_dimensions(
    img_width: u32,
    img_height: u32,
    resize_percentage: f64,
) -> Result<(u16, u16), ConvertError> {
    if img_width == 0 || img_height == 0 {
        return Err(ConvertError::EmptySource);
    }

    let pct = clamp_percentage(resize_percentage)?;
    let scale = |dim: u32| (dim as f64 * pct / 100.0).ceil();

    let width = scale(img_width);
    let height = scale(img_height);

    if width > u16::MAX as f64 || height > u16::MAX as f64 {
        return Err(ConvertError::TooLarge {
            width: width as u64,
            height: height as u64,
        });
    }

    // ceil of a positive product is at least 1
    Ok((width as u16, height as u16))
}
