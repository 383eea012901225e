//! Hex-to-world conversion.
//!
//! Cell centers follow an odd-row-shifted layout. Spacing factors are empirical
//! fits to the hex sprite and are configuration, not geometry.

use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_COLUMN_SPACING, DEFAULT_HEX_HEIGHT, DEFAULT_HEX_WIDTH, DEFAULT_ODD_ROW_SHIFT_DIVISOR,
    DEFAULT_ROW_SPACING,
};
use crate::map::config::ConfigError;
use crate::map::tile_pos::TilePos;

/// Cell footprint and spacing factors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HexMetrics {
    pub hex_width: f32,
    pub hex_height: f32,
    pub column_spacing: f32,
    pub row_spacing: f32,
    pub odd_row_shift_divisor: f32,
}

impl Default for HexMetrics {
    fn default() -> Self {
        Self {
            hex_width: DEFAULT_HEX_WIDTH,
            hex_height: DEFAULT_HEX_HEIGHT,
            column_spacing: DEFAULT_COLUMN_SPACING,
            row_spacing: DEFAULT_ROW_SPACING,
            odd_row_shift_divisor: DEFAULT_ODD_ROW_SHIFT_DIVISOR,
        }
    }
}

impl HexMetrics {
    /// Derive the footprint from a sprite's bounding box, keeping default spacing
    pub fn from_sprite_bounds(size: Vec2) -> Self {
        Self {
            hex_width: size.x,
            hex_height: size.y,
            ..Default::default()
        }
    }

    pub fn column_step(&self) -> f32 {
        self.hex_width * self.column_spacing
    }

    pub fn row_step(&self) -> f32 {
        self.hex_height * self.row_spacing
    }

    pub fn odd_row_shift(&self) -> f32 {
        self.hex_width / self.odd_row_shift_divisor
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("hex_width", self.hex_width),
            ("hex_height", self.hex_height),
            ("column_spacing", self.column_spacing),
            ("row_spacing", self.row_spacing),
            ("odd_row_shift_divisor", self.odd_row_shift_divisor),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositiveMetric { name, value });
            }
        }
        Ok(())
    }
}

/// Axis-aligned world rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl MapBounds {
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

/// World placement of a `width × height` grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapLayout {
    pub metrics: HexMetrics,
    pub width: u32,
    pub height: u32,
    /// World position of cell (0, 0)
    pub origin: Vec2,
}

impl MapLayout {
    pub fn new(metrics: HexMetrics, width: u32, height: u32) -> Self {
        Self {
            metrics,
            width,
            height,
            origin: Vec2::ZERO,
        }
    }

    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    pub fn tile_to_world(&self, pos: TilePos) -> Vec2 {
        let mut x = pos.x as f32 * self.metrics.column_step();
        let y = pos.y as f32 * self.metrics.row_step();
        if pos.y % 2 == 1 {
            x += self.metrics.odd_row_shift();
        }
        self.origin + Vec2::new(x, y)
    }

    /// Horizontal period of the map; wrap clones are placed this far apart
    pub fn world_width(&self) -> f32 {
        self.width.saturating_sub(1) as f32 * self.metrics.column_step() + self.metrics.hex_width
    }

    pub fn world_height(&self) -> f32 {
        self.height.saturating_sub(1) as f32 * self.metrics.row_step() + self.metrics.hex_height
    }

    /// Region a camera may show: full width, rows trimmed by half a hex at top and bottom
    pub fn bounds(&self) -> MapBounds {
        let half_height = self.metrics.hex_height * 0.5;
        MapBounds {
            min: self.origin + Vec2::new(0.0, half_height),
            max: self.origin + Vec2::new(self.world_width(), self.world_height() - half_height),
        }
    }

    /// Cell whose center is nearest to `world`, wrapping horizontally.
    ///
    /// Returns `None` above or below the grid.
    pub fn world_to_tile(&self, world: Vec2) -> Option<TilePos> {
        if self.width == 0 || self.height == 0 {
            return None;
        }

        let local = world - self.origin;
        let half_height = self.metrics.hex_height * 0.5;
        let top = (self.height - 1) as f32 * self.metrics.row_step() + half_height;
        if local.y < -half_height || local.y > top {
            return None;
        }

        let period = self.world_width();
        let row_step = self.metrics.row_step();
        let column_step = self.metrics.column_step();
        let approx_row = (local.y / row_step).round() as i64;

        let mut best: Option<(TilePos, f32)> = None;
        for row in (approx_row - 1)..=(approx_row + 1) {
            if row < 0 || row >= self.height as i64 {
                continue;
            }

            let shift = if row % 2 == 1 {
                self.metrics.odd_row_shift()
            } else {
                0.0
            };
            let x = (local.x - shift).rem_euclid(period);
            let col = ((x / column_step).round() as i64).rem_euclid(self.width as i64);

            let mut dx = (x - col as f32 * column_step).abs();
            dx = dx.min(period - dx);
            let dy = local.y - row as f32 * row_step;
            let distance = dx * dx + dy * dy;

            let candidate = TilePos::new(col as u32, row as u32);
            match best {
                Some((_, best_distance)) if best_distance <= distance => {}
                _ => best = Some((candidate, distance)),
            }
        }

        best.map(|(pos, _)| pos)
    }
}
