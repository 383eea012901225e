use bevy::prelude::*;

use crate::map::{HexMap, MapBounds};

/// Request a new map. `use_random_seed: false` rebuilds with the current seed.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegenerateMap {
    pub use_random_seed: bool,
}

/// Written after every successful generation pass
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct MapGenerated {
    pub seed: u32,
    /// Camera clamp bounds in world units
    pub bounds: MapBounds,
    pub land_cells: usize,
    pub coastal_cells: usize,
}

impl MapGenerated {
    pub fn from_map(map: &HexMap) -> Self {
        let stats = map.stats();
        Self {
            seed: map.seed(),
            bounds: map.bounds(),
            land_cells: stats.land,
            coastal_cells: stats.coastal,
        }
    }
}
