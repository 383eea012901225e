//! Hex map generation: noise fields, rule resolution, composition, coasts and wrap.

pub mod compose;
pub mod config;
pub mod curve;
pub mod generator;
pub mod hex_map;
pub mod layout;
pub mod plugin;
pub mod province;
pub mod rules;
pub mod terrain_gen;
pub mod tile_pos;
pub mod wrap;

// Re-exports for convenience
pub use compose::*;
pub use config::*;
pub use curve::*;
pub use generator::*;
pub use hex_map::*;
pub use layout::*;
pub use plugin::*;
pub use province::*;
pub use rules::*;
pub use terrain_gen::*;
pub use tile_pos::*;
pub use wrap::*;
