//! Character palette and intensity mapping.

/// Density ramp used for every rendered image (8 levels).
/// Ordered from sparsest (space) to densest (@). All entries are
/// printable single-byte ASCII, none of them 0x00.
pub const PALETTE: [u8; 8] = [b' ', b'.', b'-', b'*', b'o', b'O', b'#', b'@'];

/// Sum of all four channels at full intensity.
const MAX_CHANNEL_SUM: f32 = 255.0 * 4.0;

/// Normalized intensity of an RGBA pixel in `[0, 1]`.
///
/// All four channels contribute equally, alpha included.
pub fn pixel_intensity(pixel: [u8; 4]) -> f32 {
    let sum: u32 = pixel.iter().map(|&c| c as u32).sum();
    sum as f32 / MAX_CHANNEL_SUM
}

/// Map an intensity in `[0, 1]` to a palette symbol.
///
/// The index is `round(intensity * PALETTE.len())`, which reaches
/// `PALETTE.len()` at full intensity, so it is clamped to the last entry.
/// Out-of-range inputs are clamped to the ends of the ramp.
pub fn map_intensity(intensity: f32) -> u8 {
    let intensity = if intensity.is_nan() {
        0.0
    } else {
        intensity.clamp(0.0, 1.0)
    };
    let idx = (intensity * PALETTE.len() as f32).round() as usize;
    PALETTE[idx.min(PALETTE.len() - 1)]
}

/// Map an RGBA pixel straight to its palette symbol.
#[inline]
pub fn map_pixel(pixel: [u8; 4]) -> u8 {
    map_intensity(pixel_intensity(pixel))
}
