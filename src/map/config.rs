//! Generation parameters.
//!
//! `MapConfig` carries every knob of the pipeline and can be authored as RON.
//! Missing fields fall back to the defaults in [`crate::constants`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::map::compose::{CompositionPolicy, FallbackPolicy};
use crate::map::curve::LatitudeCurve;
use crate::map::layout::HexMetrics;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("map dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("map of {width}x{height} cells is too large")]
    TooManyCells { width: u32, height: u32 },
    #[error("parameter `{name}` must be finite, got {value}")]
    NotFinite { name: &'static str, value: f64 },
    #[error("parameter `{name}` = {value} is outside {min}..={max}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("mountain thresholds must satisfy low < high, got {low} >= {high}")]
    InvertedMountainThresholds { low: f64, high: f64 },
    #[error("temperature curve has no keys")]
    EmptyTemperatureCurve,
    #[error("temperature curve keys must be sorted by time")]
    UnsortedTemperatureCurve,
    #[error("hex metric `{name}` must be positive, got {value}")]
    NonPositiveMetric { name: &'static str, value: f32 },
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub width: u32,
    pub height: u32,
    /// 0 picks a random seed on initialization
    pub seed: u32,

    // Continents
    pub continent_scale: f64,
    pub land_threshold: f64,
    /// Radial falloff subtracted from the continent signal (0 disables it)
    pub ocean_falloff_strength: f64,
    pub border_water_size: u32,
    pub border_smoothness: f64,

    // Elevation
    pub elevation_scale: f64,
    pub mountain_low: f64,
    pub mountain_high: f64,
    pub mountain_scale: f64,
    pub mountain_influence: f64,

    // Temperature
    pub temperature_by_latitude: LatitudeCurve,
    pub temperature_noise_scale: f64,
    pub temperature_noise_strength: f64,

    // Composition
    pub composition: CompositionPolicy,
    pub fallback: FallbackPolicy,

    // Presentation
    pub hex_metrics: HexMetrics,
    pub horizontal_wrap: bool,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: MAP_WIDTH,
            height: MAP_HEIGHT,
            seed: RANDOM_SEED_SENTINEL,
            continent_scale: DEFAULT_CONTINENT_SCALE,
            land_threshold: DEFAULT_LAND_THRESHOLD,
            ocean_falloff_strength: 0.0,
            border_water_size: DEFAULT_BORDER_WATER_SIZE,
            border_smoothness: DEFAULT_BORDER_SMOOTHNESS,
            elevation_scale: DEFAULT_ELEVATION_SCALE,
            mountain_low: DEFAULT_MOUNTAIN_LOW,
            mountain_high: DEFAULT_MOUNTAIN_HIGH,
            mountain_scale: DEFAULT_MOUNTAIN_SCALE,
            mountain_influence: DEFAULT_MOUNTAIN_INFLUENCE,
            temperature_by_latitude: LatitudeCurve::default(),
            temperature_noise_scale: DEFAULT_TEMPERATURE_NOISE_SCALE,
            temperature_noise_strength: DEFAULT_TEMPERATURE_NOISE_STRENGTH,
            composition: CompositionPolicy::default(),
            fallback: FallbackPolicy::default(),
            hex_metrics: HexMetrics::default(),
            horizontal_wrap: true,
        }
    }
}

impl MapConfig {
    pub fn from_ron_str(ron_str: &str) -> Result<Self, ConfigError> {
        let config: MapConfig = ron::from_str(ron_str)?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.width.checked_mul(self.height).is_none() {
            return Err(ConfigError::TooManyCells {
                width: self.width,
                height: self.height,
            });
        }

        let finite = [
            ("continent_scale", self.continent_scale),
            ("ocean_falloff_strength", self.ocean_falloff_strength),
            ("border_smoothness", self.border_smoothness),
            ("elevation_scale", self.elevation_scale),
            ("mountain_scale", self.mountain_scale),
            ("temperature_noise_scale", self.temperature_noise_scale),
            ("temperature_noise_strength", self.temperature_noise_strength),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { name, value });
            }
        }

        // The continent mask divides by (1 - land_threshold)
        check_range("land_threshold", self.land_threshold, 0.0, 0.999)?;
        check_range("mountain_low", self.mountain_low, 0.0, 1.0)?;
        check_range("mountain_high", self.mountain_high, 0.0, 1.0)?;
        check_range("mountain_influence", self.mountain_influence, 0.0, 1.0)?;
        check_range("border_smoothness", self.border_smoothness, 0.01, 16.0)?;

        if self.mountain_low >= self.mountain_high {
            return Err(ConfigError::InvertedMountainThresholds {
                low: self.mountain_low,
                high: self.mountain_high,
            });
        }

        if self.temperature_by_latitude.is_empty() {
            return Err(ConfigError::EmptyTemperatureCurve);
        }
        if !self.temperature_by_latitude.is_sorted() {
            return Err(ConfigError::UnsortedTemperatureCurve);
        }

        self.hex_metrics.validate()
    }
}

fn check_range(name: &'static str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite { name, value });
    }
    if value < min || value > max {
        return Err(ConfigError::OutOfRange {
            name,
            value,
            min,
            max,
        });
    }
    Ok(())
}
