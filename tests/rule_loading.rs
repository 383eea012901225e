//! Integration tests for rule and config files

use std::path::PathBuf;

use hex_worldgen::map::{BiomeId, MapConfig, ReliefId, RuleError, RuleSet};

fn asset(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(path)
}

#[test]
fn test_default_rules_load_from_disk() {
    let rules = RuleSet::from_path(&asset("assets/rules/default.ron")).unwrap();
    let builtin = RuleSet::builtin().unwrap();
    assert_eq!(rules.biomes.len(), builtin.biomes.len());
    assert_eq!(rules.reliefs.len(), builtin.reliefs.len());
    assert_eq!(rules.biomes.water_biome().unwrap().name, "Ocean");
    assert!(rules.biomes.land_biomes().all(|biome| !biome.is_water));
}

#[test]
fn test_builtin_priorities_resolve_overlaps() {
    let rules = RuleSet::builtin().unwrap();
    // Forest outranks Grassland inside 0.45..=0.6
    assert_eq!(rules.biome_name(rules.biomes.select_base_biome(0.5).map(|b| b.id)), "Forest");
    assert_eq!(rules.biome_name(rules.biomes.select_base_biome(0.42).map(|b| b.id)), "Grassland");
    // Sea outranks everything at the bottom of the height range
    assert_eq!(rules.reliefs.select(0.0, 0.5).map(|r| r.id), Some(ReliefId(0)));
    assert_eq!(rules.relief_name(rules.reliefs.select(0.9, 0.5).map(|r| r.id)), "Peaks");
}

#[test]
fn test_equal_priority_keeps_first_rule() {
    let rules = RuleSet::from_ron_str(
        r#"(
            biomes: [
                (id: 1, name: "First"),
                (id: 2, name: "Second"),
            ],
        )"#,
    )
    .unwrap();
    for temperature in [0.0, 0.25, 0.5, 1.0] {
        let chosen = rules.biomes.select_base_biome(temperature).unwrap();
        assert_eq!(chosen.id, BiomeId(1));
    }
    assert!(rules.reliefs.is_empty());
}

#[test]
fn test_duplicate_ids_are_rejected() {
    let result = RuleSet::from_ron_str(
        r#"(
            biomes: [
                (id: 1, name: "A"),
                (id: 1, name: "B"),
            ],
        )"#,
    );
    assert!(matches!(result, Err(RuleError::DuplicateBiomeId(1))));
}

#[test]
fn test_malformed_rules_report_parse_error() {
    let result = RuleSet::from_ron_str("(biomes: [ (id: \"x\") ])");
    assert!(matches!(result, Err(RuleError::Ron(_))));
}

#[test]
fn test_missing_rule_file_reports_io_error() {
    let result = RuleSet::from_path(&asset("assets/rules/does_not_exist.ron"));
    assert!(matches!(result, Err(RuleError::Io(_))));
}

#[test]
fn test_config_round_trips_through_ron() {
    let config = MapConfig::default().with_size(64, 32).with_seed(9);
    let text = ron::to_string(&config).unwrap();
    let parsed = MapConfig::from_ron_str(&text).unwrap();
    assert_eq!(parsed, config);
}
