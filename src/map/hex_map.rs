use std::collections::BTreeMap;

use bevy::math::Vec2;

use crate::map::layout::{MapBounds, MapLayout};
use crate::map::province::{Province, ProvinceId};
use crate::map::rules::BiomeId;
use crate::map::tile_pos::TilePos;
use crate::map::wrap::{WrapReplica, build_wrap_replicas};

/// Result of one generation pass: the province grid plus its world placement.
///
/// Read-only for consumers; a new pass builds a new map.
#[derive(Debug, Clone)]
pub struct HexMap {
    seed: u32,
    layout: MapLayout,
    /// Row-major: index `y * width + x`
    provinces: Vec<Province>,
    replicas: Vec<WrapReplica>,
}

/// Counts over a generated map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapStats {
    pub land: usize,
    pub water: usize,
    pub coastal: usize,
    pub without_biome: usize,
    pub biomes: BTreeMap<BiomeId, usize>,
}

impl HexMap {
    pub(crate) fn new(seed: u32, layout: MapLayout, provinces: Vec<Province>) -> Self {
        debug_assert_eq!(provinces.len(), (layout.width * layout.height) as usize);
        Self {
            seed,
            layout,
            provinces,
            replicas: Vec::new(),
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn width(&self) -> u32 {
        self.layout.width
    }

    pub fn height(&self) -> u32 {
        self.layout.height
    }

    pub fn layout(&self) -> &MapLayout {
        &self.layout
    }

    pub fn provinces(&self) -> &[Province] {
        &self.provinces
    }

    fn index(&self, pos: TilePos) -> Option<usize> {
        if pos.x < self.width() && pos.y < self.height() {
            Some((pos.y * self.width() + pos.x) as usize)
        } else {
            None
        }
    }

    pub fn province(&self, pos: TilePos) -> Option<&Province> {
        self.index(pos).map(|index| &self.provinces[index])
    }

    pub fn province_by_id(&self, id: ProvinceId) -> Option<&Province> {
        let height = self.height();
        let pos = TilePos::new(id.0 / height, id.0 % height);
        self.province(pos)
    }

    /// Hex neighbors, wrapping horizontally
    pub fn neighbors(&self, pos: TilePos) -> impl Iterator<Item = &Province> + '_ {
        pos.neighbors_wrapped(self.width(), self.height())
            .filter_map(move |neighbor| self.province(neighbor))
    }

    /// Flags land provinces bordering water. Returns the number of coastal provinces.
    pub(crate) fn classify_coasts(&mut self) -> usize {
        let coastal: Vec<bool> = self
            .provinces
            .iter()
            .map(|province| {
                province.is_land() && self.neighbors(province.tile).any(|n| n.is_water)
            })
            .collect();

        for (province, is_coastal) in self.provinces.iter_mut().zip(&coastal) {
            province.is_coastal = *is_coastal;
        }

        coastal.iter().filter(|flag| **flag).count()
    }

    pub(crate) fn build_wrap(&mut self) {
        self.replicas = build_wrap_replicas(&self.layout);
    }

    /// Left and right copies; empty when wrapping is disabled
    pub fn wrap_replicas(&self) -> &[WrapReplica] {
        &self.replicas
    }

    pub fn world_position(&self, pos: TilePos) -> Vec2 {
        self.layout.tile_to_world(pos)
    }

    pub fn bounds(&self) -> MapBounds {
        self.layout.bounds()
    }

    /// Province under a world point, wrapping horizontally
    pub fn province_at_world(&self, world: Vec2) -> Option<&Province> {
        self.layout
            .world_to_tile(world)
            .and_then(|pos| self.province(pos))
    }

    pub fn stats(&self) -> MapStats {
        let mut stats = MapStats::default();
        for province in &self.provinces {
            if province.is_water {
                stats.water += 1;
            } else {
                stats.land += 1;
            }
            if province.is_coastal {
                stats.coastal += 1;
            }
            match province.biome {
                Some(biome) => *stats.biomes.entry(biome).or_default() += 1,
                None => stats.without_biome += 1,
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::compose::Composition;
    use crate::map::layout::HexMetrics;
    use crate::map::terrain_gen::TerrainSample;

    /// Builds a map from an ASCII picture; `~` is water, anything else land.
    /// The first line is the top row.
    fn map_from_ascii(rows: &[&str]) -> HexMap {
        let height = rows.len() as u32;
        let width = rows[0].len() as u32;
        let mut provinces = Vec::new();
        for y in 0..height {
            let row = rows[(height - 1 - y) as usize].as_bytes();
            for x in 0..width {
                let is_water = row[x as usize] == b'~';
                provinces.push(Province::new(
                    TilePos::new(x, y),
                    height,
                    TerrainSample {
                        elevation: if is_water { 0.0 } else { 0.5 },
                        temperature: 0.5,
                    },
                    Composition {
                        biome: (!is_water).then_some(BiomeId(1)),
                        relief: None,
                        is_water,
                    },
                ));
            }
        }
        HexMap::new(7, MapLayout::new(HexMetrics::default(), width, height), provinces)
    }

    #[test]
    fn coasts_touch_water() {
        let mut map = map_from_ascii(&["#####", "##~##", "#####", "#####"]);
        map.classify_coasts();

        // The water cell is (2, 2); row 2 is even.
        let water = TilePos::new(2, 2);
        let coastal: Vec<TilePos> = map
            .provinces()
            .iter()
            .filter(|p| p.is_coastal)
            .map(|p| p.tile)
            .collect();

        assert_eq!(coastal.len(), 6);
        for pos in water.neighbors_wrapped(5, 4) {
            assert!(coastal.contains(&pos));
        }
        assert!(!map.province(water).unwrap().is_coastal);
    }

    #[test]
    fn coasts_wrap_across_the_seam() {
        let mut map = map_from_ascii(&["####~", "#####", "#####"]);
        map.classify_coasts();

        // Water sits at (4, 2); its east neighbor wraps to column 0.
        assert!(map.province(TilePos::new(0, 2)).unwrap().is_coastal);
        assert!(!map.province(TilePos::new(2, 0)).unwrap().is_coastal);
    }

    #[test]
    fn all_water_map_has_no_coast() {
        let mut map = map_from_ascii(&["~~~", "~~~"]);
        assert_eq!(map.classify_coasts(), 0);
    }

    #[test]
    fn ids_round_trip_through_lookup() {
        let map = map_from_ascii(&["#~#", "###", "~##", "###"]);
        for province in map.provinces() {
            assert_eq!(map.province_by_id(province.id).unwrap().tile, province.tile);
        }
        assert!(map.province(TilePos::new(3, 0)).is_none());
    }

    #[test]
    fn world_lookup_finds_provinces() {
        let map = map_from_ascii(&["###", "#~#", "###"]);
        let pos = TilePos::new(1, 1);
        let world = map.world_position(pos);
        assert_eq!(map.province_at_world(world).unwrap().tile, pos);
        let wrapped = world + Vec2::new(map.layout().world_width(), 0.0);
        assert_eq!(map.province_at_world(wrapped).unwrap().tile, pos);
    }

    #[test]
    fn stats_count_classes() {
        let mut map = map_from_ascii(&["~~~", "~##", "~~~"]);
        map.classify_coasts();
        let stats = map.stats();
        assert_eq!(stats.water, 7);
        assert_eq!(stats.land, 2);
        assert_eq!(stats.coastal, 2);
        assert_eq!(stats.without_biome, 7);
        assert_eq!(stats.biomes.get(&BiomeId(1)), Some(&2));
    }
}
