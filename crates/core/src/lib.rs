#![deny(unsafe_code)]
//! Smooth diverging color maps built in the Msh color space.
//!
//! Provides sRGB/Lab conversion (`color`), the polar Msh space and hue spin
//! (`msh`), the map builder (`diverging`), scalar-to-color mapping with gamut
//! diagnostics (`mapper`), and serializable configurations and presets
//! (`config`).
//!
//! ```
//! use diverge_core::{DivergingMap, Srgb};
//!
//! let map = DivergingMap::new(
//!     Srgb::new(0.230, 0.299, 0.754),
//!     Srgb::new(0.706, 0.016, 0.150),
//!     Some(Srgb::new(0.8654, 0.8654, 0.8654)),
//! );
//! let center = map.map_scalar(0.5);
//! assert!(center.is_in_gamut());
//! ```

pub mod color;
pub mod config;
pub mod diverging;
pub mod error;
pub mod mapper;
pub mod msh;

pub use color::{Lab, LinearRgb, Srgb, Xyz};
pub use config::{MapConfig, Preset};
pub use diverging::{DivergingMap, EndpointCase, Interpolation};
pub use error::DivergeError;
pub use mapper::{GamutWarning, MappedColor, WorkingSpace};
pub use msh::{hue_spin, lab_to_msh, msh_to_lab, Msh};
