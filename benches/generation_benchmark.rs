use criterion::{Criterion, criterion_group, criterion_main};
use hex_worldgen::map::{MapConfig, RuleSet, TerrainGenerator, TilePos, generate_map};

fn bench_full_pass(c: &mut Criterion) {
    // Default 160x90 map, 14400 cells
    let config = MapConfig::default();
    let rules = RuleSet::builtin().expect("builtin rules should load");

    c.bench_function("generate_map_160x90", |b| {
        b.iter(|| generate_map(&config, &rules, 42).expect("generation should succeed"))
    });
}

fn bench_terrain_sampling(c: &mut Criterion) {
    let config = MapConfig::default();
    let terrain = TerrainGenerator::new(&config, 42);

    c.bench_function("terrain_sample_row", |b| {
        b.iter(|| {
            (0..config.width)
                .map(|x| terrain.sample(TilePos::new(x, config.height / 2)).elevation)
                .sum::<f64>()
        })
    });
}

criterion_group!(benches, bench_full_pass, bench_terrain_sampling);
criterion_main!(benches);
