//! Merges relief and base biome into a cell's final classification.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::map::rules::{BiomeId, BiomeRule, ReliefId, RuleSet};
use crate::map::terrain_gen::TerrainSample;

/// How a matched relief interacts with biome painting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CompositionPolicy {
    /// Relief resolves first; the biome is painted only if the relief allows it
    /// or no relief matched. Water comes from the relief or biome water flag.
    #[default]
    GateBiome,
    /// A cell is water iff its height is <= 0; a matched relief with
    /// `overrides_biome` replaces biome painting.
    OverrideBiome,
}

/// What to paint when a biome is required but no rule matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FallbackPolicy {
    WaterBiome,
    /// Drawn from the generation RNG, so still reproducible per seed
    RandomLandBiome,
    #[default]
    Unset,
}

#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("{required_by} requires a water biome, but the biome database has none")]
    MissingWaterBiome { required_by: &'static str },
}

/// Final classification of one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Composition {
    pub biome: Option<BiomeId>,
    pub relief: Option<ReliefId>,
    pub is_water: bool,
}

pub struct Composer<'a> {
    rules: &'a RuleSet,
    policy: CompositionPolicy,
    fallback: FallbackPolicy,
}

impl<'a> Composer<'a> {
    pub fn new(
        rules: &'a RuleSet,
        policy: CompositionPolicy,
        fallback: FallbackPolicy,
    ) -> Result<Self, ComposeError> {
        let has_water = rules.biomes.water_biome().is_some();
        if !has_water && policy == CompositionPolicy::OverrideBiome {
            return Err(ComposeError::MissingWaterBiome {
                required_by: "override composition",
            });
        }
        if !has_water && fallback == FallbackPolicy::WaterBiome {
            return Err(ComposeError::MissingWaterBiome {
                required_by: "water fallback",
            });
        }

        Ok(Self {
            rules,
            policy,
            fallback,
        })
    }

    pub fn compose<R: Rng + ?Sized>(
        &self,
        sample: TerrainSample,
        base_biome: Option<&BiomeRule>,
        rng: &mut R,
    ) -> Composition {
        match self.policy {
            CompositionPolicy::GateBiome => self.compose_gated(sample, base_biome, rng),
            CompositionPolicy::OverrideBiome => self.compose_override(sample, base_biome, rng),
        }
    }

    fn compose_gated<R: Rng + ?Sized>(
        &self,
        sample: TerrainSample,
        base_biome: Option<&BiomeRule>,
        rng: &mut R,
    ) -> Composition {
        let relief = self.rules.reliefs.select(sample.elevation, sample.temperature);

        let biome = if relief.is_none_or(|relief| relief.allows_biome) {
            self.paint(base_biome, rng)
        } else {
            None
        };

        Composition {
            biome: biome.map(|biome| biome.id),
            relief: relief.map(|relief| relief.id),
            is_water: relief.is_some_and(|relief| relief.is_water)
                || biome.is_some_and(|biome| biome.is_water),
        }
    }

    fn compose_override<R: Rng + ?Sized>(
        &self,
        sample: TerrainSample,
        base_biome: Option<&BiomeRule>,
        rng: &mut R,
    ) -> Composition {
        if sample.elevation <= 0.0 {
            return Composition {
                biome: self.rules.biomes.water_biome().map(|biome| biome.id),
                relief: None,
                is_water: true,
            };
        }

        let relief = self.rules.reliefs.select(sample.elevation, sample.temperature);

        let biome = if relief.is_some_and(|relief| relief.overrides_biome) {
            None
        } else {
            self.paint(base_biome, rng)
        };

        // Only height decides water here
        Composition {
            biome: biome.map(|biome| biome.id),
            relief: relief.map(|relief| relief.id),
            is_water: false,
        }
    }

    fn paint<'s, R: Rng + ?Sized>(
        &'s self,
        base_biome: Option<&'s BiomeRule>,
        rng: &mut R,
    ) -> Option<&'s BiomeRule> {
        if base_biome.is_some() {
            return base_biome;
        }
        match self.fallback {
            FallbackPolicy::WaterBiome => self.rules.biomes.water_biome(),
            FallbackPolicy::RandomLandBiome => self.rules.biomes.random_land_biome(rng),
            FallbackPolicy::Unset => None,
        }
    }
}
