//! One generation pass and the seed-controlled generator around it.

use bevy::log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::constants::{RANDOM_SEED_RANGE, RANDOM_SEED_SENTINEL};
use crate::map::compose::{ComposeError, Composer};
use crate::map::config::{ConfigError, MapConfig};
use crate::map::hex_map::HexMap;
use crate::map::layout::MapLayout;
use crate::map::province::Province;
use crate::map::rules::RuleSet;
use crate::map::terrain_gen::TerrainGenerator;
use crate::map::tile_pos::TilePos;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid map config: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Compose(#[from] ComposeError),
}

/// Runs a full pass: fields, rule resolution, composition, coasts, wrap.
///
/// The same `config`, `rules` and `seed` always produce the same map.
pub fn generate_map(
    config: &MapConfig,
    rules: &RuleSet,
    seed: u32,
) -> Result<HexMap, GenerationError> {
    config.validate()?;
    let composer = Composer::new(rules, config.composition, config.fallback)?;

    if rules.reliefs.is_empty() {
        warn!("Relief database is empty, cells will only receive biomes");
    }
    if rules.biomes.water_biome().is_none() {
        warn!("Biome database has no water biome");
    }

    info!(
        "Generating {}x{} map with seed {}",
        config.width, config.height, seed
    );

    let terrain = TerrainGenerator::new(config, seed);
    let mut rng = StdRng::seed_from_u64(seed as u64);

    let mut provinces = Vec::with_capacity((config.width * config.height) as usize);
    for y in 0..config.height {
        for x in 0..config.width {
            let pos = TilePos::new(x, y);
            let sample = terrain.sample(pos);
            let base_biome = rules.biomes.select_base_biome(sample.temperature);
            let composition = composer.compose(sample, base_biome, &mut rng);
            provinces.push(Province::new(pos, config.height, sample, composition));
        }
    }

    let layout = MapLayout::new(config.hex_metrics, config.width, config.height);
    let mut map = HexMap::new(seed, layout, provinces);
    let coastal = map.classify_coasts();
    if config.horizontal_wrap {
        map.build_wrap();
    }

    let stats = map.stats();
    debug!(
        "Map {}: {} land, {} water, {} coastal, {} without biome",
        seed, stats.land, stats.water, coastal, stats.without_biome
    );
    info!("Map generation complete for seed {}", seed);

    Ok(map)
}

/// Owns the configuration, the rule set and the current map
pub struct MapGenerator {
    config: MapConfig,
    rules: RuleSet,
    seed: u32,
    map: HexMap,
}

impl MapGenerator {
    /// Validates inputs and runs the first pass. A config seed of 0 picks a random seed.
    pub fn initialize(config: MapConfig, rules: RuleSet) -> Result<Self, GenerationError> {
        let seed = if config.seed == RANDOM_SEED_SENTINEL {
            draw_seed(&mut rand::rng(), None)
        } else {
            config.seed
        };
        let map = generate_map(&config, &rules, seed)?;
        Ok(Self {
            config,
            rules,
            seed,
            map,
        })
    }

    /// Rebuilds the map, either with the last seed or a fresh random one.
    ///
    /// On error the previous map and seed are kept.
    pub fn regenerate(&mut self, use_random_seed: bool) -> Result<&HexMap, GenerationError> {
        let seed = if use_random_seed {
            draw_seed(&mut rand::rng(), Some(self.seed))
        } else {
            self.seed
        };
        self.map = generate_map(&self.config, &self.rules, seed)?;
        self.seed = seed;
        Ok(&self.map)
    }

    /// Swaps the configuration; takes effect on the next `regenerate`.
    ///
    /// A non-zero `config.seed` also replaces the current seed.
    pub fn set_config(&mut self, config: MapConfig) -> Result<(), GenerationError> {
        config.validate()?;
        if config.seed != RANDOM_SEED_SENTINEL {
            self.seed = config.seed;
        }
        self.config = config;
        Ok(())
    }

    pub fn set_rules(&mut self, rules: RuleSet) {
        self.rules = rules;
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn map(&self) -> &HexMap {
        &self.map
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}

/// Uniform seed in `0..RANDOM_SEED_RANGE`, never equal to `previous`
pub fn draw_seed<R: Rng + ?Sized>(rng: &mut R, previous: Option<u32>) -> u32 {
    loop {
        let seed = rng.random_range(0..RANDOM_SEED_RANGE);
        if Some(seed) != previous {
            return seed;
        }
    }
}
