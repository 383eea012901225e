//! Horizontal wrap replication.
//!
//! A wrapping map is drawn three times side by side. Replicas own no data: they
//! are a world offset plus back-references into the generated provinces.

use bevy::math::Vec2;

use crate::map::hex_map::HexMap;
use crate::map::layout::MapLayout;
use crate::map::province::Province;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapSide {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WrapReplica {
    pub side: WrapSide,
    /// Added to every cell's world position
    pub offset: Vec2,
}

impl WrapReplica {
    /// Provinces of `map` paired with their position in this replica
    pub fn cells<'m>(&self, map: &'m HexMap) -> impl Iterator<Item = (&'m Province, Vec2)> + 'm {
        let offset = self.offset;
        let layout = *map.layout();
        map.provinces()
            .iter()
            .map(move |province| (province, layout.tile_to_world(province.tile) + offset))
    }
}

/// One replica on each side, a full map width away
pub fn build_wrap_replicas(layout: &MapLayout) -> Vec<WrapReplica> {
    let width = layout.world_width();
    vec![
        WrapReplica {
            side: WrapSide::Left,
            offset: Vec2::new(-width, 0.0),
        },
        WrapReplica {
            side: WrapSide::Right,
            offset: Vec2::new(width, 0.0),
        },
    ]
}
