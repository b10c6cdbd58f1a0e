//! Sampled `(scalar, R, G, B)` tables.
//!
//! Rows hold display colors: channels are clamped to [0, 1] and the row
//! remembers whether the mapped color had to be clamped beyond the gamut
//! tolerance. Byte channels are `round(c * 255)`.

use diverge_core::error::DivergeError;
use diverge_core::mapper::WorkingSpace;
use diverge_core::{DivergingMap, Srgb};
use serde::Serialize;
use std::io::Write;

/// Table sizes written when none are requested: powers of two from 8 to 1024.
pub const DEFAULT_SAMPLE_COUNTS: [usize; 8] = [8, 16, 32, 64, 128, 256, 512, 1024];

/// Channel encoding of a written table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Channels {
    /// Normalized channels in [0, 1].
    #[default]
    Float,
    /// 8-bit channels in [0, 255].
    Byte,
}

/// One sampled row of a color table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Row {
    pub scalar: f64,
    /// Display color, clamped to [0, 1].
    pub rgb: [f64; 3],
    /// False when the mapped color was out of gamut before clamping.
    pub in_gamut: bool,
}

impl Row {
    pub fn bytes(&self) -> [u8; 3] {
        let [r, g, b] = self.rgb;
        Srgb::new(r, g, b).to_bytes()
    }
}

/// Samples `n` evenly spaced rows from `map`, both endpoints included.
///
/// Returns `DivergeError::InvalidSampleCount` if `n < 2`.
pub fn sample_rows(
    map: &DivergingMap,
    n: usize,
    space: WorkingSpace,
) -> Result<Vec<Row>, DivergeError> {
    if n < 2 {
        return Err(DivergeError::InvalidSampleCount(n));
    }
    Ok(map
        .sample(n, space)
        .map(|(scalar, mapped)| Row {
            scalar,
            rgb: mapped.color.channels().map(|c| c.clamp(0.0, 1.0)),
            in_gamut: mapped.is_in_gamut(),
        })
        .collect())
}

/// Writes rows as CSV with a `scalar,RGB_r,RGB_g,RGB_b` header.
pub fn write_csv(rows: &[Row], channels: Channels, out: &mut impl Write) -> Result<(), DivergeError> {
    writeln!(out, "scalar,RGB_r,RGB_g,RGB_b")?;
    for row in rows {
        match channels {
            Channels::Float => {
                let [r, g, b] = row.rgb;
                writeln!(out, "{},{r:.6},{g:.6},{b:.6}", row.scalar)?;
            }
            Channels::Byte => {
                let [r, g, b] = row.bytes();
                writeln!(out, "{},{r},{g},{b}", row.scalar)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use diverge_core::Preset;

    fn cool_warm() -> DivergingMap {
        Preset::CoolWarm.build()
    }

    #[test]
    fn sample_rows_has_requested_length_and_bounds() {
        for n in DEFAULT_SAMPLE_COUNTS {
            let rows = sample_rows(&cool_warm(), n, WorkingSpace::Msh).unwrap();
            assert_eq!(rows.len(), n);
            assert_eq!(rows[0].scalar, 0.0);
            assert_eq!(rows[n - 1].scalar, 1.0);
        }
    }

    #[test]
    fn sample_rows_rejects_fewer_than_two() {
        for n in [0, 1] {
            let result = sample_rows(&cool_warm(), n, WorkingSpace::Msh);
            assert!(matches!(result, Err(DivergeError::InvalidSampleCount(c)) if c == n));
        }
    }

    #[test]
    fn first_and_last_bytes_match_endpoints() {
        let rows = sample_rows(&cool_warm(), 8, WorkingSpace::Msh).unwrap();
        assert_eq!(rows[0].bytes(), [59, 76, 192]);
        assert_eq!(rows[7].bytes(), [180, 4, 38]);
    }

    #[test]
    fn out_of_gamut_rows_are_clamped_and_flagged() {
        let map = DivergingMap::new(Srgb::new(0.0, 1.0, 0.0), Srgb::new(1.0, 0.0, 1.0), None);
        let rows = sample_rows(&map, 16, WorkingSpace::Msh).unwrap();
        assert!(rows.iter().any(|r| !r.in_gamut));
        for row in &rows {
            assert!(row.rgb.iter().all(|c| (0.0..=1.0).contains(c)), "{row:?}");
        }
    }

    #[test]
    fn write_csv_float_layout() {
        let rows = sample_rows(&cool_warm(), 3, WorkingSpace::Msh).unwrap();
        let mut buf = Vec::new();
        write_csv(&rows, Channels::Float, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "scalar,RGB_r,RGB_g,RGB_b");
        assert!(lines[1].starts_with("0,0.230000,0.299000,0.754000"), "{}", lines[1]);
        assert!(lines[2].starts_with("0.5,0.8654"), "{}", lines[2]);
        assert!(lines[3].starts_with("1,0.706000,0.016000,0.150000"), "{}", lines[3]);
    }

    #[test]
    fn write_csv_byte_layout() {
        let rows = sample_rows(&cool_warm(), 2, WorkingSpace::Msh).unwrap();
        let mut buf = Vec::new();
        write_csv(&rows, Channels::Byte, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "scalar,RGB_r,RGB_g,RGB_b\n0,59,76,192\n1,180,4,38\n");
    }

    #[test]
    fn row_serializes_channels_as_array() {
        let rows = sample_rows(&cool_warm(), 2, WorkingSpace::Msh).unwrap();
        let json = serde_json::to_value(rows[0]).unwrap();
        assert_eq!(json["scalar"], 0.0);
        assert_eq!(json["rgb"].as_array().map(Vec::len), Some(3));
        assert_eq!(json["in_gamut"], true);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn rows_are_sorted_and_in_range(n in 2_usize..300) {
                let rows = sample_rows(&cool_warm(), n, WorkingSpace::Msh).unwrap();
                prop_assert_eq!(rows.len(), n);
                for pair in rows.windows(2) {
                    prop_assert!(pair[0].scalar < pair[1].scalar);
                }
                for row in &rows {
                    prop_assert!(row.rgb.iter().all(|c| (0.0..=1.0).contains(c)));
                }
            }
        }
    }
}
