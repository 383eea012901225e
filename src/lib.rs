//! Hex World Generator - procedural hexagonal world maps
//!
//! Builds wrap-around hex maps from seeded noise: continents, elevation and
//! temperature fields, biome and relief rules, coastlines. The core is plain
//! library code; [`map::MapGenerationPlugin`] hosts it inside a Bevy app.

pub mod constants;
pub mod map;
pub mod messages;
