//! The Msh color space and the hue-spin correction.
//!
//! Msh is CIE Lab in spherical coordinates: `m` is the distance from the
//! black origin, `s` the angle away from the lightness axis, `h` the angle in
//! the chroma plane. Straight lines in Msh keep saturation up where straight
//! lines in Lab would cut through the muddy gray interior.

use crate::color::{lab_to_srgb, srgb_to_lab, Lab, Srgb};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Hues above this angle spin forward, hues below spin backward.
const SPIN_SEAM: f64 = -PI / 3.0;

/// Magnitudes and sines below this are treated as zero.
const NEAR_ZERO: f64 = 1e-12;

/// A color in Msh coordinates.
///
/// `m >= 0`, `s` in [0, π], `h` in (−π, π] as produced by [`lab_to_msh`].
/// `h` may leave that range after a hue spin. When `m == 0` the color is
/// black and `s`, `h` carry no information; when `s` is near zero the color
/// is gray whatever `h` says.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Msh {
    pub m: f64,
    pub s: f64,
    pub h: f64,
}

impl Msh {
    pub const fn new(m: f64, s: f64, h: f64) -> Self {
        Self { m, s, h }
    }

    /// Returns a copy of this color with hue `h`.
    pub fn with_hue(self, h: f64) -> Self {
        Self { h, ..self }
    }
}

/// Converts Lab to Msh.
///
/// `s` equals `acos(L / m)`; it is computed as `atan2(chroma, L)`, which
/// stays accurate near the lightness axis where `acos` loses precision.
/// Black (`m == 0`) maps to `Msh { m: 0, s: 0, h: 0 }` instead of the
/// undefined `acos(0 / 0)`.
pub fn lab_to_msh(c: Lab) -> Msh {
    let m = (c.l * c.l + c.a * c.a + c.b * c.b).sqrt();
    if m == 0.0 {
        return Msh::new(0.0, 0.0, 0.0);
    }
    let chroma = c.a.hypot(c.b);
    let s = chroma.atan2(c.l);
    let h = c.b.atan2(c.a);
    Msh { m, s, h }
}

/// Converts Msh to Lab.
pub fn msh_to_lab(c: Msh) -> Lab {
    let (sin_s, cos_s) = c.s.sin_cos();
    let (sin_h, cos_h) = c.h.sin_cos();
    Lab {
        l: c.m * cos_s,
        a: c.m * sin_s * cos_h,
        b: c.m * sin_s * sin_h,
    }
}

/// Convenience: sRGB to Msh via Lab.
pub fn srgb_to_msh(c: Srgb) -> Msh {
    lab_to_msh(srgb_to_lab(c))
}

/// Convenience: Msh to sRGB via Lab. Not clamped.
pub fn msh_to_srgb(c: Msh) -> Srgb {
    lab_to_srgb(msh_to_lab(c))
}

/// Computes the hue to give `unsaturated` when interpolating toward it from
/// `saturated`.
///
/// If the saturated color is at least as large as the unsaturated one its hue
/// is kept. Otherwise the hue is spun away from it by
/// `s · sqrt(mu² − ms²) / (ms · sin s)`, forward for hues above −π/3 and
/// backward below. The result is not wrapped into (−π, π].
///
/// A saturated color with zero magnitude or `sin(s) == 0` gives no usable
/// spin; its hue is returned as-is.
pub fn hue_spin(saturated: Msh, unsaturated: Msh) -> f64 {
    if saturated.m >= unsaturated.m {
        return saturated.h;
    }
    let sin_s = saturated.s.sin();
    if saturated.m < NEAR_ZERO || sin_s.abs() < NEAR_ZERO {
        return saturated.h;
    }
    let spin = saturated.s * (unsaturated.m * unsaturated.m - saturated.m * saturated.m).sqrt()
        / (saturated.m * sin_s);
    if saturated.h > SPIN_SEAM {
        saturated.h + spin
    } else {
        saturated.h - spin
    }
}
