//! Raster-to-ASCII conversion.
//!
//! 1. **Loading** - read the bitmap, re-checking a file that is still being written
//! 2. **Rescaling** - percentage-based resampling, clamped to 200%
//! 3. **Character mapping** - channel-sum intensity to an 8-level palette

mod charset;
mod convert;
mod dimensions;

pub use charset::{map_intensity, map_pixel, pixel_intensity, PALETTE};
pub use convert::{convert, convert_bitmap, load_bitmap, render_rgba, ConvertError};
pub use dimensions::{clamp_percentage, scaled_dimensions, MAX_RESIZE_PERCENTAGE};
