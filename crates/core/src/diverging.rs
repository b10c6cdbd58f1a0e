//! Construction of a diverging color map from its endpoint colors.
//!
//! The builder classifies the endpoints by saturation and hue separation,
//! then precomputes everything the scalar mapper needs. The resulting
//! [`DivergingMap`] is immutable: endpoint hues replaced by the hue spin are
//! new [`Msh`] values chosen here, never patched afterwards.

use crate::color::Srgb;
use crate::msh::{hue_spin, msh_to_srgb, srgb_to_msh, Msh};
use serde::Serialize;
use std::f64::consts::PI;

/// Saturation (radians) at or below which a color counts as gray.
pub const SATURATION_THRESHOLD: f64 = 0.05;

/// Hue separation (radians) above which two saturated endpoints get a
/// neutral midpoint between them.
pub const HUE_DIVERGENCE: f64 = PI / 3.0;

/// Which endpoint configuration the builder found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EndpointCase {
    /// Both endpoints are saturated.
    BothSaturated,
    /// The low endpoint is saturated, the high endpoint is gray.
    LowSaturated,
    /// The low endpoint is gray. The high endpoint is expected to be
    /// saturated; if it is not the map is a flat gray ramp.
    LowUnsaturated,
}

impl EndpointCase {
    pub fn name(self) -> &'static str {
        match self {
            EndpointCase::BothSaturated => "both-saturated",
            EndpointCase::LowSaturated => "low-saturated",
            EndpointCase::LowUnsaturated => "low-unsaturated",
        }
    }
}

/// How the mapper moves between the endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Interpolation {
    /// Straight line in the working space from low to high.
    Direct,
    /// Two segments meeting at an achromatic midpoint of magnitude
    /// `magnitude`. Each half heads for the midpoint with its own spun hue.
    Midpoint {
        magnitude: f64,
        low_hue: f64,
        high_hue: f64,
    },
}

/// A precomputed diverging color map.
///
/// Build one with [`DivergingMap::new`] (sRGB endpoints) or
/// [`DivergingMap::from_msh`], then query it with
/// [`map_scalar`](DivergingMap::map_scalar) and friends. The value is
/// read-only and `Send + Sync`, so one map can serve any number of threads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DivergingMap {
    low: Msh,
    high: Msh,
    case: EndpointCase,
    interpolation: Interpolation,
}

impl DivergingMap {
    /// Builds a map from sRGB endpoint colors.
    ///
    /// `mid` only matters when both endpoints are saturated with hues more
    /// than π/3 apart; it then sets the magnitude of the neutral midpoint.
    /// Without `mid` such endpoints are joined directly.
    pub fn new(low: Srgb, high: Srgb, mid: Option<Srgb>) -> Self {
        Self::from_msh(srgb_to_msh(low), srgb_to_msh(high), mid.map(srgb_to_msh))
    }

    /// Builds a map from endpoint colors already in Msh.
    pub fn from_msh(low: Msh, high: Msh, mid: Option<Msh>) -> Self {
        let low_saturated = low.s > SATURATION_THRESHOLD;
        let high_saturated = high.s > SATURATION_THRESHOLD;

        let map = if low_saturated && high_saturated {
            let interpolation = match mid {
                Some(mid) if (low.h - high.h).abs() > HUE_DIVERGENCE => Interpolation::Midpoint {
                    magnitude: mid.m,
                    low_hue: hue_spin(low, mid),
                    high_hue: hue_spin(high, mid),
                },
                _ => Interpolation::Direct,
            };
            Self {
                low,
                high,
                case: EndpointCase::BothSaturated,
                interpolation,
            }
        } else if low_saturated {
            Self {
                low,
                high: high.with_hue(hue_spin(low, high)),
                case: EndpointCase::LowSaturated,
                interpolation: Interpolation::Direct,
            }
        } else {
            if !high_saturated {
                log::debug!("both endpoints are unsaturated; map is a gray ramp");
            }
            Self {
                low: low.with_hue(hue_spin(high, low)),
                high,
                case: EndpointCase::LowUnsaturated,
                interpolation: Interpolation::Direct,
            }
        };

        log::debug!(
            "built diverging map: case {:?}, interpolation {:?}",
            map.case,
            map.interpolation
        );
        map
    }

    /// Low endpoint in Msh, with its hue possibly replaced by the hue spin.
    pub fn low(&self) -> Msh {
        self.low
    }

    /// High endpoint in Msh, with its hue possibly replaced by the hue spin.
    pub fn high(&self) -> Msh {
        self.high
    }

    pub fn case(&self) -> EndpointCase {
        self.case
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// The achromatic midpoint approached from the low side, if any.
    pub fn midpoint_from_low(&self) -> Option<Msh> {
        match self.interpolation {
            Interpolation::Midpoint {
                magnitude, low_hue, ..
            } => Some(Msh::new(magnitude, 0.0, low_hue)),
            Interpolation::Direct => None,
        }
    }

    /// The achromatic midpoint approached from the high side, if any.
    pub fn midpoint_from_high(&self) -> Option<Msh> {
        match self.interpolation {
            Interpolation::Midpoint {
                magnitude,
                high_hue,
                ..
            } => Some(Msh::new(magnitude, 0.0, high_hue)),
            Interpolation::Direct => None,
        }
    }

    /// Low endpoint converted back to sRGB.
    pub fn low_srgb(&self) -> Srgb {
        msh_to_srgb(self.low)
    }

    /// High endpoint converted back to sRGB.
    pub fn high_srgb(&self) -> Srgb {
        msh_to_srgb(self.high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COOL: Srgb = Srgb::new(0.230, 0.299, 0.754);
    const WARM: Srgb = Srgb::new(0.706, 0.016, 0.150);
    const GRAY: Srgb = Srgb::new(0.8654, 0.8654, 0.8654);

    fn cool_warm() -> DivergingMap {
        DivergingMap::new(COOL, WARM, Some(GRAY))
    }

    #[test]
    fn case_name_matches_serialized_form() {
        for case in [
            EndpointCase::BothSaturated,
            EndpointCase::LowSaturated,
            EndpointCase::LowUnsaturated,
        ] {
            let json = serde_json::to_value(case).unwrap();
            assert_eq!(json, case.name());
        }
    }

    #[test]
    fn cool_warm_selects_midpoint_mode() {
        let map = cool_warm();
        assert_eq!(map.case(), EndpointCase::BothSaturated);
        let Interpolation::Midpoint {
            magnitude,
            low_hue,
            high_hue,
        } = map.interpolation()
        else {
            panic!("expected midpoint mode, got {:?}", map.interpolation());
        };
        assert!((magnitude - 88.0).abs() < 0.01, "magnitude: {magnitude}");
        assert!((map.low().m - 80.02).abs() < 0.05, "low m: {}", map.low().m);
        assert!((map.high().m - 80.03).abs() < 0.05, "high m: {}", map.high().m);
        // Low hue sits below −π/3 and spins backward, high hue spins forward.
        assert!(low_hue < map.low().h, "low hue: {low_hue}");
        assert!(high_hue > map.high().h, "high hue: {high_hue}");
    }

    #[test]
    fn midpoint_mode_keeps_endpoint_hues() {
        let map = cool_warm();
        assert_eq!(map.low(), srgb_to_msh(COOL));
        assert_eq!(map.high(), srgb_to_msh(WARM));
    }

    #[test]
    fn missing_mid_forces_direct_mode() {
        let map = DivergingMap::new(COOL, WARM, None);
        assert_eq!(map.case(), EndpointCase::BothSaturated);
        assert_eq!(map.interpolation(), Interpolation::Direct);
        assert!(map.midpoint_from_low().is_none());
        assert!(map.midpoint_from_high().is_none());
        assert_eq!(map.low(), srgb_to_msh(COOL));
        assert_eq!(map.high(), srgb_to_msh(WARM));
    }

    #[test]
    fn close_hues_use_direct_mode_even_with_mid() {
        let low = Msh::new(70.0, 1.0, 0.2);
        let high = Msh::new(60.0, 0.9, 0.2 + HUE_DIVERGENCE * 0.5);
        let map = DivergingMap::from_msh(low, high, Some(Msh::new(88.0, 0.0, 0.0)));
        assert_eq!(map.case(), EndpointCase::BothSaturated);
        assert_eq!(map.interpolation(), Interpolation::Direct);
        assert_eq!(map.low(), low);
        assert_eq!(map.high(), high);
    }

    #[test]
    fn hue_gap_must_exceed_divergence_strictly() {
        let low = Msh::new(70.0, 1.0, 0.0);
        let high = Msh::new(70.0, 1.0, HUE_DIVERGENCE);
        let map = DivergingMap::from_msh(low, high, Some(Msh::new(88.0, 0.0, 0.0)));
        assert_eq!(map.interpolation(), Interpolation::Direct);
    }

    #[test]
    fn saturated_low_and_gray_high_spins_high_hue() {
        let white = Srgb::new(1.0, 1.0, 1.0);
        let map = DivergingMap::new(COOL, white, Some(GRAY));
        assert_eq!(map.case(), EndpointCase::LowSaturated);
        assert_eq!(map.interpolation(), Interpolation::Direct);
        let low = srgb_to_msh(COOL);
        let expected = hue_spin(low, srgb_to_msh(white));
        assert_eq!(map.low(), low);
        assert_eq!(map.high().h, expected);
        assert_eq!(map.high().m, srgb_to_msh(white).m);
        assert_eq!(map.high().s, srgb_to_msh(white).s);
    }

    #[test]
    fn black_low_endpoint_takes_high_hue() {
        let black = Srgb::new(0.0, 0.0, 0.0);
        let map = DivergingMap::new(black, WARM, None);
        assert_eq!(map.case(), EndpointCase::LowUnsaturated);
        assert_eq!(map.interpolation(), Interpolation::Direct);
        // The saturated end is bigger than black, so no spin is applied.
        assert_eq!(map.low().h, srgb_to_msh(WARM).h);
        assert_eq!(map.low().m, 0.0);
        assert_eq!(map.low_srgb(), black);
    }

    #[test]
    fn gray_low_endpoint_spins_from_high() {
        let low = Msh::new(90.0, 0.01, 0.0);
        let high = Msh::new(60.0, 1.0, 1.0);
        let map = DivergingMap::from_msh(low, high, None);
        assert_eq!(map.case(), EndpointCase::LowUnsaturated);
        assert_eq!(map.low().h, hue_spin(high, low));
        assert!(map.low().h > 1.0);
        assert_eq!(map.high(), high);
    }

    #[test]
    fn mid_is_ignored_unless_both_saturated() {
        let low = Msh::new(90.0, 0.01, 0.0);
        let high = Msh::new(60.0, 1.0, 2.5);
        let with_mid = DivergingMap::from_msh(low, high, Some(Msh::new(88.0, 0.0, 0.0)));
        let without_mid = DivergingMap::from_msh(low, high, None);
        assert_eq!(with_mid, without_mid);
    }

    #[test]
    fn both_unsaturated_is_accepted() {
        let low = Msh::new(20.0, 0.0, 0.0);
        let high = Msh::new(90.0, 0.01, 0.3);
        let map = DivergingMap::from_msh(low, high, None);
        assert_eq!(map.case(), EndpointCase::LowUnsaturated);
        assert_eq!(map.interpolation(), Interpolation::Direct);
        assert!(map.low().h.is_finite());
    }

    #[test]
    fn threshold_saturation_counts_as_gray() {
        let low = Msh::new(60.0, SATURATION_THRESHOLD, 0.0);
        let high = Msh::new(60.0, 1.0, 2.0);
        let map = DivergingMap::from_msh(low, high, None);
        assert_eq!(map.case(), EndpointCase::LowUnsaturated);
    }

    #[test]
    fn midpoint_accessors_use_zero_saturation() {
        let map = cool_warm();
        let from_low = map.midpoint_from_low().unwrap();
        let from_high = map.midpoint_from_high().unwrap();
        assert_eq!(from_low.s, 0.0);
        assert_eq!(from_high.s, 0.0);
        assert_eq!(from_low.m, from_high.m);
        assert_ne!(from_low.h, from_high.h);
    }

    #[test]
    fn serializes_mode_tag() {
        let json = serde_json::to_value(cool_warm()).unwrap();
        assert_eq!(json["case"], "both-saturated");
        assert_eq!(json["interpolation"]["mode"], "midpoint");
        let direct = serde_json::to_value(DivergingMap::new(COOL, WARM, None)).unwrap();
        assert_eq!(direct["interpolation"]["mode"], "direct");
    }

    #[test]
    fn diverging_map_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DivergingMap>();
    }
}
