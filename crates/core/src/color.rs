//! sRGB, linear RGB, CIE XYZ and CIE L\*a\*b\* color types and the pure
//! conversion chain between them.
//!
//! Lab values are relative to the D65 reference white (2° observer), the
//! white point of sRGB, so no chromatic adaptation is involved. Uses `f64`
//! throughout. None of the conversions clamp: out-of-gamut values pass
//! through so callers can detect them.

use crate::error::DivergeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// sRGB color with gamma-encoded components, nominally in [0, 1].
///
/// Serializes as a hex string `"#rrggbb"` for human-readable formats.
/// The hex round-trip has 8-bit quantization (1/255 precision loss).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Linear RGB color (gamma-decoded sRGB primaries).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// CIE 1931 XYZ tristimulus values, scaled so that white has `y = 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Xyz {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// CIE L\*a\*b\* relative to D65. `l` is in [0, 100] for colors in gamut.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

/// D65 reference white in XYZ.
const WHITE: Xyz = Xyz {
    x: 0.95047,
    y: 1.0,
    z: 1.08883,
};

/// CIE epsilon (216/24389): below it, the Lab companding is linear.
const LAB_EPSILON: f64 = 216.0 / 24389.0;
/// CIE kappa (24389/27).
const LAB_KAPPA: f64 = 24389.0 / 27.0;
/// Value of the companding function at zero.
const F_OFFSET: f64 = 16.0 / 116.0;

impl Srgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Parses a hex color string like "#ff00aa" or "ff00aa" (case insensitive).
    ///
    /// Returns `DivergeError::InvalidColor` if the input is not a valid 6-digit hex color.
    pub fn from_hex(hex: &str) -> Result<Srgb, DivergeError> {
        let hex = hex.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(DivergeError::InvalidColor(format!(
                "expected 6 hex digits, got \"{hex}\""
            )));
        }
        let r = u8::from_str_radix(&hex[0..2], 16)
            .map_err(|e| DivergeError::InvalidColor(format!("invalid red component: {e}")))?;
        let g = u8::from_str_radix(&hex[2..4], 16)
            .map_err(|e| DivergeError::InvalidColor(format!("invalid green component: {e}")))?;
        let b = u8::from_str_radix(&hex[4..6], 16)
            .map_err(|e| DivergeError::InvalidColor(format!("invalid blue component: {e}")))?;
        Ok(Srgb::from_bytes([r, g, b]))
    }

    /// Converts the color to a hex string like `"#rrggbb"`.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_bytes();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Creates a color from 8-bit channels.
    pub fn from_bytes([r, g, b]: [u8; 3]) -> Self {
        Srgb {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }

    /// Quantizes to 8-bit channels as `round(c * 255)`, clamping to [0, 1] first.
    pub fn to_bytes(self) -> [u8; 3] {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    /// Returns the channels as an array `[r, g, b]`.
    pub fn channels(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }
}

impl Serialize for Srgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Srgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Srgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Applies inverse sRGB gamma to convert a single sRGB component to linear.
fn srgb_component_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Applies sRGB gamma to convert a single linear component to sRGB.
fn linear_component_to_srgb(c: f64) -> f64 {
    if c <= 0.0031308 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

/// Converts sRGB to linear RGB by applying inverse sRGB gamma.
pub fn srgb_to_linear(c: Srgb) -> LinearRgb {
    LinearRgb {
        r: srgb_component_to_linear(c.r),
        g: srgb_component_to_linear(c.g),
        b: srgb_component_to_linear(c.b),
    }
}

/// Converts linear RGB to sRGB by applying sRGB gamma.
pub fn linear_to_srgb(c: LinearRgb) -> Srgb {
    Srgb {
        r: linear_component_to_srgb(c.r),
        g: linear_component_to_srgb(c.g),
        b: linear_component_to_srgb(c.b),
    }
}

/// Converts linear RGB to XYZ with the sRGB (D65) primaries matrix.
pub fn linear_to_xyz(c: LinearRgb) -> Xyz {
    Xyz {
        x: 0.4124564 * c.r + 0.3575761 * c.g + 0.1804375 * c.b,
        y: 0.2126729 * c.r + 0.7151522 * c.g + 0.0721750 * c.b,
        z: 0.0193339 * c.r + 0.1191920 * c.g + 0.9503041 * c.b,
    }
}

/// Converts XYZ to linear RGB with the inverse sRGB (D65) primaries matrix.
pub fn xyz_to_linear(c: Xyz) -> LinearRgb {
    LinearRgb {
        r: 3.2404542 * c.x - 1.5371385 * c.y - 0.4985314 * c.z,
        g: -0.9692660 * c.x + 1.8760108 * c.y + 0.0415560 * c.z,
        b: 0.0556434 * c.x - 0.2040259 * c.y + 1.0572252 * c.z,
    }
}

/// Lab companding function.
fn lab_f(t: f64) -> f64 {
    if t > LAB_EPSILON {
        t.cbrt()
    } else {
        LAB_KAPPA * t / 116.0 + F_OFFSET
    }
}

/// Inverse of [`lab_f`].
fn lab_f_inv(ft: f64) -> f64 {
    let cube = ft * ft * ft;
    if cube > LAB_EPSILON {
        cube
    } else {
        // Written as an offset difference so that black maps back to exactly 0.
        (ft - F_OFFSET) * 116.0 / LAB_KAPPA
    }
}

/// Converts XYZ to CIE Lab relative to D65.
pub fn xyz_to_lab(c: Xyz) -> Lab {
    let fx = lab_f(c.x / WHITE.x);
    let fy = lab_f(c.y / WHITE.y);
    let fz = lab_f(c.z / WHITE.z);
    Lab {
        l: 116.0 * (fy - F_OFFSET),
        a: 500.0 * (fx - fy),
        b: 200.0 * (fy - fz),
    }
}

/// Converts CIE Lab (D65) to XYZ.
pub fn lab_to_xyz(c: Lab) -> Xyz {
    let fy = (c.l + 16.0) / 116.0;
    let fx = fy + c.a / 500.0;
    let fz = fy - c.b / 200.0;
    let y = if c.l > LAB_KAPPA * LAB_EPSILON {
        fy * fy * fy
    } else {
        c.l / LAB_KAPPA
    };
    Xyz {
        x: lab_f_inv(fx) * WHITE.x,
        y: y * WHITE.y,
        z: lab_f_inv(fz) * WHITE.z,
    }
}

/// Convenience: sRGB to Lab via sRGB -> linear -> XYZ -> Lab.
pub fn srgb_to_lab(c: Srgb) -> Lab {
    xyz_to_lab(linear_to_xyz(srgb_to_linear(c)))
}

/// Convenience: Lab to sRGB via Lab -> XYZ -> linear -> sRGB. Not clamped.
pub fn lab_to_srgb(c: Lab) -> Srgb {
    linear_to_srgb(xyz_to_linear(lab_to_xyz(c)))
}
