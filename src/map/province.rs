use std::fmt;

use serde::{Deserialize, Serialize};

use crate::map::compose::Composition;
use crate::map::rules::{BiomeId, ReliefId};
use crate::map::terrain_gen::TerrainSample;
use crate::map::tile_pos::TilePos;

/// Unique identifier for a province, stable for a given map height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProvinceId(pub u32);

impl ProvinceId {
    /// Column-major id: `x * height + y`
    pub fn from_tile(pos: TilePos, map_height: u32) -> Self {
        ProvinceId(pos.x * map_height + pos.y)
    }
}

impl fmt::Display for ProvinceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A province is one hex cell of the generated map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Province {
    pub id: ProvinceId,
    pub name: String,
    pub tile: TilePos,
    pub elevation: f64,
    pub temperature: f64,
    pub biome: Option<BiomeId>,
    pub relief: Option<ReliefId>,
    pub is_water: bool,
    pub is_coastal: bool,
}

impl Province {
    pub fn new(
        tile: TilePos,
        map_height: u32,
        sample: TerrainSample,
        composition: Composition,
    ) -> Self {
        Self {
            id: ProvinceId::from_tile(tile, map_height),
            name: format!("Province {},{}", tile.x, tile.y),
            tile,
            elevation: sample.elevation,
            temperature: sample.temperature,
            biome: composition.biome,
            relief: composition.relief,
            is_water: composition.is_water,
            is_coastal: false,
        }
    }

    pub fn is_land(&self) -> bool {
        !self.is_water
    }
}
