#![allow(dead_code)]

use hex_worldgen::map::{BiomeRule, MapConfig, ReliefRule, RuleSet};

/// Small fixed-seed config shared by the integration tests
pub fn small_config(seed: u32) -> MapConfig {
    MapConfig::default().with_size(30, 20).with_seed(seed)
}

/// The 10x10 scenario map
pub fn scenario_config() -> MapConfig {
    MapConfig {
        border_water_size: 2,
        ..MapConfig::default().with_size(10, 10).with_seed(42)
    }
}

/// Three-band rule set with an ocean biome and one relief of each kind
pub fn simple_rules() -> RuleSet {
    RuleSet::new(
        vec![
            BiomeRule::new(0, "Ocean").water(),
            BiomeRule::new(1, "Cold").with_temperature(0.0, 0.33),
            BiomeRule::new(2, "Mild").with_temperature(0.33, 0.66),
            BiomeRule::new(3, "Hot").with_temperature(0.66, 1.0),
        ],
        vec![
            ReliefRule::new(0, "Sea").water().with_height(0.0, 0.05).with_priority(10),
            ReliefRule::new(1, "Hills").allowing_biome().with_height(0.4, 0.6),
            ReliefRule::new(2, "Mountains").with_height(0.6, 1.0).with_priority(1),
        ],
    )
    .expect("fixture rules should be valid")
}

/// Land biomes only cover the cold and hot ends of the temperature range
pub fn gapped_rules() -> RuleSet {
    RuleSet::new(
        vec![
            BiomeRule::new(0, "Ocean").water(),
            BiomeRule::new(1, "Ice").with_temperature(0.0, 0.2),
            BiomeRule::new(2, "Dunes").with_temperature(0.8, 1.0),
        ],
        vec![ReliefRule::new(0, "Sea").water().with_height(0.0, 0.05).with_priority(10)],
    )
    .expect("fixture rules should be valid")
}
