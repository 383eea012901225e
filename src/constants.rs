//! Map generation constants and default configuration values
//!
//! This module centralizes the magic numbers used by the generation pipeline.

// ============================================================================
// MAP CONSTANTS
// ============================================================================

/// Default map width (columns)
pub const MAP_WIDTH: u32 = 160;

/// Default map height (rows)
pub const MAP_HEIGHT: u32 = 90;

/// Upper bound (exclusive) for randomly drawn seeds
pub const RANDOM_SEED_RANGE: u32 = 1_000_000;

/// Seed value meaning "pick one at random"
pub const RANDOM_SEED_SENTINEL: u32 = 0;

// ============================================================================
// NOISE CHANNEL OFFSETS
// ============================================================================

/// Coordinate shift for the base elevation channel
pub const ELEVATION_CHANNEL_OFFSET: f64 = 1000.0;

/// Coordinate shift for the mountain mask channel
pub const MOUNTAIN_CHANNEL_OFFSET: f64 = 3000.0;

/// Coordinate shift for the temperature perturbation channel
pub const TEMPERATURE_CHANNEL_OFFSET: f64 = 5000.0;

// ============================================================================
// CONTINENT DEFAULTS
// ============================================================================

pub const DEFAULT_CONTINENT_SCALE: f64 = 0.07;
pub const DEFAULT_LAND_THRESHOLD: f64 = 0.35;
pub const DEFAULT_BORDER_WATER_SIZE: u32 = 3;
pub const DEFAULT_BORDER_SMOOTHNESS: f64 = 1.0;

// ============================================================================
// ELEVATION DEFAULTS
// ============================================================================

pub const DEFAULT_ELEVATION_SCALE: f64 = 0.08;
pub const DEFAULT_MOUNTAIN_LOW: f64 = 0.6;
pub const DEFAULT_MOUNTAIN_HIGH: f64 = 0.8;
pub const DEFAULT_MOUNTAIN_SCALE: f64 = 0.02;
pub const DEFAULT_MOUNTAIN_INFLUENCE: f64 = 0.35;

// ============================================================================
// TEMPERATURE DEFAULTS
// ============================================================================

pub const DEFAULT_TEMPERATURE_NOISE_SCALE: f64 = 0.05;
pub const DEFAULT_TEMPERATURE_NOISE_STRENGTH: f64 = 0.15;

// ============================================================================
// HEX LAYOUT DEFAULTS
// ============================================================================

/// Default sprite footprint in world units (width x height)
pub const DEFAULT_HEX_WIDTH: f32 = 1.0;
pub const DEFAULT_HEX_HEIGHT: f32 = 1.16;

/// Horizontal spacing between column centers as a fraction of hex width
pub const DEFAULT_COLUMN_SPACING: f32 = 0.985;

/// Vertical spacing between row centers as a fraction of hex height
pub const DEFAULT_ROW_SPACING: f32 = 0.753;

/// Odd rows are shifted right by `hex_width / divisor`
pub const DEFAULT_ODD_ROW_SHIFT_DIVISOR: f32 = 2.04;
