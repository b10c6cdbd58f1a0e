//! PNG output of a gradient swatch.
//!
//! Feature-gated behind `png` (default on) so table-only consumers do not pull
//! in the `image` crate. The buffer itself comes from [`crate::pixel`].

use diverge_core::error::DivergeError;
use diverge_core::mapper::WorkingSpace;
use diverge_core::DivergingMap;
use std::path::Path;

use crate::pixel::swatch_to_rgba;

/// Writes a `width` x `height` gradient swatch of `map` as a PNG image.
///
/// Returns `DivergeError::InvalidDimensions` if a dimension is zero or does
/// not fit in `u32`, or `DivergeError::Io` on write failure.
pub fn write_png(
    map: &DivergingMap,
    width: usize,
    height: usize,
    space: WorkingSpace,
    path: &Path,
) -> Result<(), DivergeError> {
    let w = u32::try_from(width).map_err(|_| DivergeError::InvalidDimensions)?;
    let h = u32::try_from(height).map_err(|_| DivergeError::InvalidDimensions)?;
    let rgba = swatch_to_rgba(map, width, height, space)?;
    let img = image::RgbaImage::from_raw(w, h, rgba)
        .ok_or_else(|| DivergeError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| DivergeError::Io(e.to_string()))
}
