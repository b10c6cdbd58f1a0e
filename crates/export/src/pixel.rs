//! Pure-computation RGBA buffer for a horizontal gradient swatch.
//!
//! Always available so callers can build a swatch without the `png` feature.

use diverge_core::error::DivergeError;
use diverge_core::mapper::WorkingSpace;
use diverge_core::DivergingMap;

/// Renders `map` as a `width` x `height` RGBA8 gradient, scalar 0 on the left
/// and 1 on the right.
///
/// Out-of-gamut colors are clamped per channel. Every row is identical and
/// alpha is always 255. Returns `DivergeError::InvalidDimensions` if either
/// dimension is zero or the buffer size overflows `usize`.
pub fn swatch_to_rgba(
    map: &DivergingMap,
    width: usize,
    height: usize,
    space: WorkingSpace,
) -> Result<Vec<u8>, DivergeError> {
    if width == 0 || height == 0 {
        return Err(DivergeError::InvalidDimensions);
    }
    let len = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(4))
        .ok_or(DivergeError::InvalidDimensions)?;

    let row: Vec<u8> = column_scalars(width)
        .flat_map(|t| {
            let [r, g, b] = map.map_scalar_in(t, space).color.to_bytes();
            [r, g, b, 255u8]
        })
        .collect();

    let mut buf = Vec::with_capacity(len);
    for _ in 0..height {
        buf.extend_from_slice(&row);
    }
    Ok(buf)
}

fn column_scalars(width: usize) -> impl Iterator<Item = f64> {
    let last = width.saturating_sub(1).max(1) as f64;
    (0..width).map(move |x| x as f64 / last)
}
