use hexx::{Hex, HexOrientation, OffsetHexMode};
use serde::{Deserialize, Serialize};

/// Offset (column, row) position on the map grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TilePos {
    pub x: u32,
    pub y: u32,
}

/// Pointy hexes with odd rows shoved right
const OFFSET_MODE: OffsetHexMode = OffsetHexMode::Odd;
const ORIENTATION: HexOrientation = HexOrientation::Pointy;

impl TilePos {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    pub fn to_hex(self) -> Hex {
        Hex::from_offset_coordinates([self.x as i32, self.y as i32], OFFSET_MODE, ORIENTATION)
    }

    /// Hex neighbors on a `width × height` map that wraps horizontally.
    ///
    /// Neighbors above the top row or below the bottom row are absent.
    pub fn neighbors_wrapped(self, width: u32, height: u32) -> impl Iterator<Item = TilePos> {
        self.to_hex()
            .all_neighbors()
            .into_iter()
            .filter_map(move |hex| {
                let [x, y] = hex.to_offset_coordinates(OFFSET_MODE, ORIENTATION);
                if y < 0 || y as i64 >= height as i64 || width == 0 {
                    return None;
                }
                let x = (x as i64).rem_euclid(width as i64);
                Some(TilePos::new(x as u32, y as u32))
            })
    }

    /// Steps to the nearest grid edge on either axis
    pub fn distance_to_border(&self, width: u32, height: u32) -> u32 {
        let right = width.saturating_sub(1).saturating_sub(self.x);
        let top = height.saturating_sub(1).saturating_sub(self.y);
        self.x.min(self.y).min(right).min(top)
    }
}
