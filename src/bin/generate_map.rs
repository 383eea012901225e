//! Generates a map and prints it as ASCII.
//! Run with: cargo run --bin generate_map -- [--config map.ron] [--rules rules.ron] [--seed N]

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use hex_worldgen::map::{HexMap, MapConfig, MapGenerator, Province, RuleSet, TilePos};

/// Generate a hex world map and print it as ASCII.
#[derive(Parser, Debug)]
#[command(name = "generate_map", about = "Generate a hex world map")]
struct Args {
    /// RON map config; defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// RON rule file; the built-in rules are used when omitted.
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Seed override (0 picks a random seed).
    #[arg(long)]
    seed: Option<u32>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => MapConfig::from_path(path)?,
        None => MapConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    let rules = match &args.rules {
        Some(path) => RuleSet::from_path(path)?,
        None => RuleSet::builtin()?,
    };

    let generator = MapGenerator::initialize(config, rules)?;
    let map = generator.map();

    println!("Seed {} ({}x{})", map.seed(), map.width(), map.height());
    print_map(map, generator.rules());
    print_stats(map, generator.rules());

    Ok(())
}

/// Top row first; odd rows are indented to show the hex offset.
/// Water is `~`, land shows its relief or biome initial, lowercase when coastal.
fn print_map(map: &HexMap, rules: &RuleSet) {
    for y in (0..map.height()).rev() {
        let mut line = String::new();
        if y % 2 == 1 {
            line.push(' ');
        }
        for x in 0..map.width() {
            let glyph = map
                .province(TilePos::new(x, y))
                .map_or(' ', |province| glyph(province, rules));
            line.push(glyph);
            line.push(' ');
        }
        println!("{}", line.trim_end());
    }
}

fn glyph(province: &Province, rules: &RuleSet) -> char {
    if province.is_water {
        return '~';
    }
    let name = if province.relief.is_some() {
        rules.relief_name(province.relief)
    } else {
        rules.biome_name(province.biome)
    };
    let initial = if province.biome.is_none() && province.relief.is_none() {
        '?'
    } else {
        name.chars().next().unwrap_or('?')
    };
    if province.is_coastal {
        initial.to_ascii_lowercase()
    } else {
        initial.to_ascii_uppercase()
    }
}

fn print_stats(map: &HexMap, rules: &RuleSet) {
    let stats = map.stats();
    let total = map.provinces().len() as f64;
    println!();
    println!(
        "Land: {} ({:.1}%), water: {}, coastal: {}",
        stats.land,
        stats.land as f64 / total * 100.0,
        stats.water,
        stats.coastal
    );
    for (biome, count) in &stats.biomes {
        println!("  {:<12} {}", rules.biome_name(Some(*biome)), count);
    }
    if stats.without_biome > 0 {
        println!("  {:<12} {}", "(no biome)", stats.without_biome);
    }

    let bounds = map.bounds();
    println!(
        "Camera bounds: ({:.2}, {:.2}) .. ({:.2}, {:.2})",
        bounds.min.x, bounds.min.y, bounds.max.x, bounds.max.y
    );
}
