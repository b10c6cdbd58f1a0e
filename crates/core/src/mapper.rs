//! Mapping scalars to colors along a [`DivergingMap`].
//!
//! Every query is a pure read of the map. Results come back as
//! [`MappedColor`], which carries the unclamped sRGB color plus a
//! [`GamutWarning`] when a channel lands outside the displayable range.

use crate::color::{lab_to_srgb, lab_to_xyz, linear_to_srgb, xyz_to_linear, Lab, LinearRgb, Srgb};
use crate::diverging::{DivergingMap, Interpolation};
use crate::error::DivergeError;
use crate::msh::{msh_to_lab, msh_to_srgb, Msh};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How far past [0, 1] a channel may stray before it counts as out of gamut.
pub const GAMUT_TOLERANCE: f64 = 0.0019;

const SPACE_NAMES: &[&str] = &["msh", "lab", "linear", "srgb"];

/// Coordinate system in which endpoint colors are interpolated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WorkingSpace {
    /// Polar Lab; the space the diverging construction is designed for.
    #[default]
    #[serde(rename = "msh")]
    Msh,
    #[serde(rename = "lab")]
    Lab,
    #[serde(rename = "linear")]
    LinearRgb,
    #[serde(rename = "srgb")]
    Srgb,
}

impl WorkingSpace {
    /// Looks up a working space by its lowercase name.
    pub fn from_name(name: &str) -> Result<Self, DivergeError> {
        match name.to_ascii_lowercase().as_str() {
            "msh" => Ok(WorkingSpace::Msh),
            "lab" => Ok(WorkingSpace::Lab),
            "linear" | "linear-rgb" => Ok(WorkingSpace::LinearRgb),
            "srgb" | "rgb" => Ok(WorkingSpace::Srgb),
            _ => Err(DivergeError::UnknownSpace(name.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            WorkingSpace::Msh => "msh",
            WorkingSpace::Lab => "lab",
            WorkingSpace::LinearRgb => "linear",
            WorkingSpace::Srgb => "srgb",
        }
    }

    pub fn list_names() -> &'static [&'static str] {
        SPACE_NAMES
    }

    /// Coordinates of `c` in this space.
    fn coords(self, c: Msh) -> [f64; 3] {
        match self {
            WorkingSpace::Msh => [c.m, c.s, c.h],
            WorkingSpace::Lab => {
                let lab = msh_to_lab(c);
                [lab.l, lab.a, lab.b]
            }
            WorkingSpace::LinearRgb => {
                let lin = xyz_to_linear(lab_to_xyz(msh_to_lab(c)));
                [lin.r, lin.g, lin.b]
            }
            WorkingSpace::Srgb => msh_to_srgb(c).channels(),
        }
    }

    /// Converts coordinates in this space to sRGB.
    fn to_srgb(self, [x, y, z]: [f64; 3]) -> Srgb {
        match self {
            WorkingSpace::Msh => msh_to_srgb(Msh::new(x, y, z)),
            WorkingSpace::Lab => lab_to_srgb(Lab { l: x, a: y, b: z }),
            WorkingSpace::LinearRgb => linear_to_srgb(LinearRgb { r: x, g: y, b: z }),
            WorkingSpace::Srgb => Srgb::new(x, y, z),
        }
    }
}

/// A mapped color fell outside the sRGB gamut.
///
/// This is a diagnostic, not an error: the color is still returned and the
/// caller decides whether to clamp it for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GamutWarning {
    /// The (clamped) scalar that was mapped.
    pub scalar: f64,
    /// The unclamped color.
    pub color: Srgb,
}

impl fmt::Display for GamutWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "color at {:.6} is out of gamut: ({:.4}, {:.4}, {:.4})",
            self.scalar, self.color.r, self.color.g, self.color.b
        )
    }
}

/// Result of mapping one scalar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MappedColor {
    /// Interpolated sRGB color, not clamped.
    pub color: Srgb,
    /// Set when any channel is outside `[-GAMUT_TOLERANCE, 1 + GAMUT_TOLERANCE]`.
    pub gamut: Option<GamutWarning>,
}

impl MappedColor {
    pub fn is_in_gamut(&self) -> bool {
        self.gamut.is_none()
    }
}

/// Returns true if every channel of `c` is within the gamut tolerance.
pub fn is_in_gamut(c: Srgb) -> bool {
    c.channels()
        .iter()
        .all(|&v| (-GAMUT_TOLERANCE..=1.0 + GAMUT_TOLERANCE).contains(&v))
}

fn lerp(a: [f64; 3], b: [f64; 3], t: f64) -> [f64; 3] {
    [
        a[0] + t * (b[0] - a[0]),
        a[1] + t * (b[1] - a[1]),
        a[2] + t * (b[2] - a[2]),
    ]
}

impl DivergingMap {
    /// Maps `x` to a color, interpolating in Msh.
    ///
    /// `x` is clamped to [0, 1]; NaN maps like 0.
    pub fn map_scalar(&self, x: f64) -> MappedColor {
        self.map_scalar_in(x, WorkingSpace::Msh)
    }

    /// Maps `x` to a color, interpolating in `space`.
    pub fn map_scalar_in(&self, x: f64, space: WorkingSpace) -> MappedColor {
        let x = if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) };

        let (from, to, t) = match self.interpolation() {
            Interpolation::Direct => (self.low(), self.high(), x),
            Interpolation::Midpoint {
                magnitude,
                low_hue,
                high_hue,
            } => {
                if x < 0.5 {
                    (self.low(), Msh::new(magnitude, 0.0, low_hue), 2.0 * x)
                } else {
                    (Msh::new(magnitude, 0.0, high_hue), self.high(), 2.0 * x - 1.0)
                }
            }
        };

        let color = space.to_srgb(lerp(space.coords(from), space.coords(to), t));
        let gamut = if is_in_gamut(color) {
            None
        } else {
            let warning = GamutWarning { scalar: x, color };
            log::warn!("{warning}");
            Some(warning)
        };
        MappedColor { color, gamut }
    }

    /// Lazily maps each scalar of `scalars`, in order, interpolating in Msh.
    pub fn map_scalars<I>(&self, scalars: I) -> MapScalars<'_, I::IntoIter>
    where
        I: IntoIterator<Item = f64>,
    {
        self.map_scalars_in(scalars, WorkingSpace::Msh)
    }

    /// Lazily maps each scalar of `scalars`, in order, interpolating in `space`.
    pub fn map_scalars_in<I>(&self, scalars: I, space: WorkingSpace) -> MapScalars<'_, I::IntoIter>
    where
        I: IntoIterator<Item = f64>,
    {
        MapScalars {
            map: self,
            space,
            scalars: scalars.into_iter(),
        }
    }

    /// Returns `n` uniformly spaced samples `(t, color)` over [0, 1], both
    /// bounds included. `n == 1` yields only `t = 0`.
    pub fn sample(&self, n: usize, space: WorkingSpace) -> Samples<'_> {
        Samples {
            map: self,
            space,
            n,
            i: 0,
            j: n,
        }
    }
}

/// Iterator returned by [`DivergingMap::map_scalars`].
///
/// Clone it (or the input) to walk the same sequence again.
#[derive(Debug, Clone)]
pub struct MapScalars<'a, I> {
    map: &'a DivergingMap,
    space: WorkingSpace,
    scalars: I,
}

impl<I: Iterator<Item = f64>> Iterator for MapScalars<'_, I> {
    type Item = MappedColor;

    fn next(&mut self) -> Option<Self::Item> {
        let x = self.scalars.next()?;
        Some(self.map.map_scalar_in(x, self.space))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.scalars.size_hint()
    }
}

impl<I: ExactSizeIterator<Item = f64>> ExactSizeIterator for MapScalars<'_, I> {}

impl<I: DoubleEndedIterator<Item = f64>> DoubleEndedIterator for MapScalars<'_, I> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let x = self.scalars.next_back()?;
        Some(self.map.map_scalar_in(x, self.space))
    }
}

/// Iterator returned by [`DivergingMap::sample`].
#[derive(Debug, Clone)]
pub struct Samples<'a> {
    map: &'a DivergingMap,
    space: WorkingSpace,
    n: usize,
    i: usize, // first position to be consumed
    j: usize, // position after the last one to be consumed
}

impl Samples<'_> {
    /// Position of sample `k`. The bounds are exact.
    fn position(&self, k: usize) -> f64 {
        if k == 0 {
            0.0
        } else if k == self.n - 1 {
            1.0
        } else {
            k as f64 / (self.n - 1) as f64
        }
    }

    fn item(&self, k: usize) -> (f64, MappedColor) {
        let t = self.position(k);
        (t, self.map.map_scalar_in(t, self.space))
    }
}

impl Iterator for Samples<'_> {
    type Item = (f64, MappedColor);

    fn next(&mut self) -> Option<Self::Item> {
        if self.i >= self.j {
            return None;
        }
        let item = self.item(self.i);
        self.i += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.j - self.i;
        (len, Some(len))
    }
}

impl ExactSizeIterator for Samples<'_> {}

impl DoubleEndedIterator for Samples<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.i >= self.j {
            return None;
        }
        self.j -= 1;
        Some(self.item(self.j))
    }
}
