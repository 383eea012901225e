use noise::{NoiseFn, Perlin};

use crate::constants::{
    ELEVATION_CHANNEL_OFFSET, MOUNTAIN_CHANNEL_OFFSET, TEMPERATURE_CHANNEL_OFFSET,
};
use crate::map::config::MapConfig;
use crate::map::tile_pos::TilePos;

/// Elevation and temperature of a single cell, both in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainSample {
    pub elevation: f64,
    pub temperature: f64,
}

/// Seeded elevation and temperature fields over the map grid
pub struct TerrainGenerator<'a> {
    config: &'a MapConfig,
    seed: u32,
    noise: Perlin,
}

impl<'a> TerrainGenerator<'a> {
    pub fn new(config: &'a MapConfig, seed: u32) -> Self {
        Self {
            config,
            seed,
            noise: Perlin::new(seed),
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn sample(&self, pos: TilePos) -> TerrainSample {
        TerrainSample {
            elevation: self.elevation(pos),
            temperature: self.temperature(pos),
        }
    }

    /// Layered elevation: continent mask, base height, mountain ramp, border falloff
    pub fn elevation(&self, pos: TilePos) -> f64 {
        let config = self.config;

        let mut continent = self.channel(pos, 0.0, config.continent_scale);
        continent -= self.ocean_falloff(pos) * config.ocean_falloff_strength;

        let base = self.channel(pos, ELEVATION_CHANNEL_OFFSET, config.elevation_scale);
        let mask = self.channel(pos, MOUNTAIN_CHANNEL_OFFSET, config.mountain_scale);
        let mountain_factor = smoothstep(config.mountain_low, config.mountain_high, mask);

        let blended = lerp(
            base,
            base * 0.5 + 0.5,
            mountain_factor * config.mountain_influence,
        );

        let continent_mask = inverse_lerp(config.land_threshold, 1.0, continent).clamp(0.0, 1.0);

        (blended * continent_mask * self.border_falloff(pos)).clamp(0.0, 1.0)
    }

    /// Latitude curve perturbed by noise
    pub fn temperature(&self, pos: TilePos) -> f64 {
        let config = self.config;

        let latitude = if config.height > 1 {
            pos.y as f64 / (config.height - 1) as f64
        } else {
            0.0
        };
        let base = config.temperature_by_latitude.evaluate(latitude);

        let noise = self.channel(
            pos,
            TEMPERATURE_CHANNEL_OFFSET,
            config.temperature_noise_scale,
        );

        (base + (noise - 0.5) * config.temperature_noise_strength).clamp(0.0, 1.0)
    }

    /// Multiplier in [0, 1] that forces a water ring around the map
    pub fn border_falloff(&self, pos: TilePos) -> f64 {
        let size = self.config.border_water_size;
        if size == 0 {
            return 1.0;
        }

        let distance = pos.distance_to_border(self.config.width, self.config.height);
        if distance >= size {
            return 1.0;
        }

        let t = (distance as f64 / size as f64).powf(self.config.border_smoothness);
        smoothstep(0.0, 1.0, t)
    }

    /// Radial falloff: 0 at the map center, 1 at the corners' circle
    fn ocean_falloff(&self, pos: TilePos) -> f64 {
        let nx = normalized_axis(pos.x, self.config.width);
        let ny = normalized_axis(pos.y, self.config.height);
        smoothstep(0.0, 1.0, (nx * nx + ny * ny).sqrt())
    }

    /// Noise in [0, 1] sampled at `(coord + seed + offset) * scale`
    fn channel(&self, pos: TilePos, offset: f64, scale: f64) -> f64 {
        let shift = self.seed as f64 + offset;
        let x = (pos.x as f64 + shift) * scale;
        let y = (pos.y as f64 + shift) * scale;
        ((self.noise.get([x, y]) + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

fn normalized_axis(value: u32, size: u32) -> f64 {
    if size <= 1 {
        return 0.0;
    }
    value as f64 / (size - 1) as f64 * 2.0 - 1.0
}

/// Hermite ramp from 0 at `edge0` to 1 at `edge1`
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    let t = inverse_lerp(edge0, edge1, x).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

pub fn inverse_lerp(a: f64, b: f64, value: f64) -> f64 {
    if (b - a).abs() <= f64::EPSILON {
        return 0.0;
    }
    (value - a) / (b - a)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> MapConfig {
        MapConfig::default().with_size(24, 16)
    }

    #[test]
    fn smoothstep_ramps_between_edges() {
        assert_eq!(smoothstep(0.6, 0.8, 0.5), 0.0);
        assert_eq!(smoothstep(0.6, 0.8, 0.9), 1.0);
        assert!((smoothstep(0.6, 0.8, 0.7) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn fields_stay_in_unit_range() {
        let config = config();
        for seed in [1, 42, 999_999] {
            let terrain = TerrainGenerator::new(&config, seed);
            for y in 0..config.height {
                for x in 0..config.width {
                    let sample = terrain.sample(TilePos::new(x, y));
                    assert!((0.0..=1.0).contains(&sample.elevation));
                    assert!((0.0..=1.0).contains(&sample.temperature));
                }
            }
        }
    }

    #[test]
    fn same_seed_reproduces_samples() {
        let config = config();
        let a = TerrainGenerator::new(&config, 1234);
        let b = TerrainGenerator::new(&config, 1234);
        for y in 0..config.height {
            for x in 0..config.width {
                let pos = TilePos::new(x, y);
                assert_eq!(a.sample(pos), b.sample(pos));
            }
        }
    }

    #[test]
    fn outermost_ring_is_flattened() {
        let config = config();
        let terrain = TerrainGenerator::new(&config, 77);
        for x in 0..config.width {
            assert_eq!(terrain.elevation(TilePos::new(x, 0)), 0.0);
            assert_eq!(terrain.elevation(TilePos::new(x, config.height - 1)), 0.0);
        }
        for y in 0..config.height {
            assert_eq!(terrain.elevation(TilePos::new(0, y)), 0.0);
            assert_eq!(terrain.elevation(TilePos::new(config.width - 1, y)), 0.0);
        }
    }

    #[test]
    fn border_falloff_increases_towards_interior() {
        let config = MapConfig {
            border_water_size: 4,
            ..config()
        };
        let terrain = TerrainGenerator::new(&config, 5);
        let factors: Vec<f64> = (0..6)
            .map(|x| terrain.border_falloff(TilePos::new(x, 8)))
            .collect();
        assert_eq!(factors[0], 0.0);
        assert!(factors.windows(2).all(|w| w[0] <= w[1]));
        assert!(factors[3] < 1.0);
        assert_eq!(factors[4], 1.0);
    }

    #[test]
    fn disabled_border_leaves_elevation_untouched() {
        let config = MapConfig {
            border_water_size: 0,
            ..config()
        };
        let terrain = TerrainGenerator::new(&config, 5);
        assert_eq!(terrain.border_falloff(TilePos::new(0, 0)), 1.0);
    }

    #[test]
    fn temperature_follows_constant_curve_without_noise() {
        let config = MapConfig {
            temperature_by_latitude: crate::map::curve::LatitudeCurve::constant(0.4),
            temperature_noise_strength: 0.0,
            ..config()
        };
        let terrain = TerrainGenerator::new(&config, 9);
        assert_eq!(terrain.temperature(TilePos::new(3, 7)), 0.4);
    }
}
