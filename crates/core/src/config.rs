//! Serializable map configurations and the built-in presets.
//!
//! A [`MapConfig`] captures everything needed to rebuild a map: the endpoint
//! colors, the optional midpoint color and the working space. In JSON the
//! colors are `"#rrggbb"` strings:
//!
//! ```json
//! { "low": "#3b4cc0", "high": "#b40426", "mid": "#dddddd", "space": "msh" }
//! ```

use crate::color::Srgb;
use crate::diverging::DivergingMap;
use crate::error::DivergeError;
use crate::mapper::WorkingSpace;
use serde::{Deserialize, Serialize};

/// Neutral midpoint shared by the presets: the sRGB gray with L\* = 88.
const MID_GRAY: Srgb = Srgb::new(0.8654, 0.8654, 0.8654);

const PRESET_NAMES: &[&str] = &[
    "cool-warm",
    "purple-orange",
    "green-purple",
    "blue-tan",
    "green-red",
];

/// Endpoint colors and working space for one diverging map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    pub low: Srgb,
    pub high: Srgb,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mid: Option<Srgb>,
    #[serde(default)]
    pub space: WorkingSpace,
}

impl MapConfig {
    pub fn new(low: Srgb, high: Srgb, mid: Option<Srgb>) -> Self {
        Self {
            low,
            high,
            mid,
            space: WorkingSpace::default(),
        }
    }

    /// Parses a configuration from JSON.
    ///
    /// Returns `DivergeError::InvalidConfig` for malformed JSON, missing
    /// endpoints, bad hex colors or an unknown working space.
    pub fn from_json(json: &str) -> Result<Self, DivergeError> {
        serde_json::from_str(json).map_err(|e| DivergeError::InvalidConfig(e.to_string()))
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, DivergeError> {
        serde_json::to_string_pretty(self).map_err(|e| DivergeError::InvalidConfig(e.to_string()))
    }

    /// Builds the map this configuration describes.
    pub fn build(&self) -> DivergingMap {
        DivergingMap::new(self.low, self.high, self.mid)
    }
}

/// Built-in diverging maps, all with a light gray midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Blue to red; the classic scientific diverging map.
    CoolWarm,
    PurpleOrange,
    GreenPurple,
    BlueTan,
    /// Green to red. Hard to read for red-green color blindness.
    GreenRed,
}

impl Preset {
    /// Looks up a preset by its kebab-case name.
    pub fn from_name(name: &str) -> Result<Self, DivergeError> {
        match name {
            "cool-warm" => Ok(Preset::CoolWarm),
            "purple-orange" => Ok(Preset::PurpleOrange),
            "green-purple" => Ok(Preset::GreenPurple),
            "blue-tan" => Ok(Preset::BlueTan),
            "green-red" => Ok(Preset::GreenRed),
            _ => Err(DivergeError::UnknownPreset(name.to_string())),
        }
    }

    pub fn list_names() -> &'static [&'static str] {
        PRESET_NAMES
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::CoolWarm => "cool-warm",
            Preset::PurpleOrange => "purple-orange",
            Preset::GreenPurple => "green-purple",
            Preset::BlueTan => "blue-tan",
            Preset::GreenRed => "green-red",
        }
    }

    pub fn config(self) -> MapConfig {
        let (low, high) = match self {
            Preset::CoolWarm => (Srgb::new(0.230, 0.299, 0.754), Srgb::new(0.706, 0.016, 0.150)),
            Preset::PurpleOrange => (Srgb::new(0.436, 0.308, 0.631), Srgb::new(0.759, 0.334, 0.046)),
            Preset::GreenPurple => (Srgb::new(0.085, 0.532, 0.201), Srgb::new(0.436, 0.308, 0.631)),
            Preset::BlueTan => (Srgb::new(0.217, 0.525, 0.910), Srgb::new(0.677, 0.492, 0.093)),
            Preset::GreenRed => (Srgb::new(0.085, 0.532, 0.201), Srgb::new(0.758, 0.214, 0.233)),
        };
        MapConfig::new(low, high, Some(MID_GRAY))
    }

    pub fn build(self) -> DivergingMap {
        self.config().build()
    }
}
