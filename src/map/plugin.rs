use bevy::prelude::*;

use crate::map::config::MapConfig;
use crate::map::generator::MapGenerator;
use crate::map::rules::RuleSet;
use crate::messages::{MapGenerated, RegenerateMap};

/// Inputs for the startup pass
#[derive(Resource, Clone)]
pub struct MapGenerationSettings {
    pub config: MapConfig,
    pub rules: RuleSet,
}

/// The live generator and its current map
#[derive(Resource)]
pub struct WorldMap(pub MapGenerator);

/// Builds the map at startup and rebuilds it on [`RegenerateMap`]
pub struct MapGenerationPlugin {
    pub config: MapConfig,
    pub rules: RuleSet,
}

impl MapGenerationPlugin {
    pub fn new(config: MapConfig, rules: RuleSet) -> Self {
        Self { config, rules }
    }
}

impl Plugin for MapGenerationPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<RegenerateMap>()
            .add_message::<MapGenerated>()
            .insert_resource(MapGenerationSettings {
                config: self.config.clone(),
                rules: self.rules.clone(),
            })
            .add_systems(Startup, initialize_world_map)
            .add_systems(Update, handle_regenerate_requests);
    }
}

fn initialize_world_map(
    mut commands: Commands,
    settings: Res<MapGenerationSettings>,
    mut generated: MessageWriter<MapGenerated>,
) {
    match MapGenerator::initialize(settings.config.clone(), settings.rules.clone()) {
        Ok(generator) => {
            generated.write(MapGenerated::from_map(generator.map()));
            commands.insert_resource(WorldMap(generator));
        }
        Err(err) => error!("Map generation aborted: {}", err),
    }
}

/// Requests arriving in the same frame collapse into one pass
fn handle_regenerate_requests(
    mut requests: MessageReader<RegenerateMap>,
    world_map: Option<ResMut<WorldMap>>,
    mut generated: MessageWriter<MapGenerated>,
) {
    let mut requested = false;
    let mut use_random_seed = false;
    for request in requests.read() {
        requested = true;
        use_random_seed |= request.use_random_seed;
    }
    if !requested {
        return;
    }

    let Some(mut world_map) = world_map else {
        warn!("Regeneration requested before a map was generated");
        return;
    };

    match world_map.0.regenerate(use_random_seed) {
        Ok(map) => {
            info!("Regenerated map with seed {}", map.seed());
            generated.write(MapGenerated::from_map(map));
        }
        Err(err) => error!("Map regeneration failed, keeping previous map: {}", err),
    }
}

#[cfg(test)]
mod tests {
    use bevy::ecs::message::MessageReader;
    use bevy::ecs::system::SystemState;

    use super::*;

    fn test_app(config: MapConfig) -> App {
        let mut app = App::new();
        app.add_plugins(MapGenerationPlugin::new(config, RuleSet::builtin().unwrap()));
        app
    }

    fn drain_generated(world: &mut World) -> Vec<MapGenerated> {
        let mut state: SystemState<MessageReader<MapGenerated>> = SystemState::new(world);
        let mut reader = state.get_mut(world);
        let generated: Vec<MapGenerated> = reader.read().copied().collect();
        state.apply(world);
        generated
    }

    fn request(app: &mut App, use_random_seed: bool) {
        app.world_mut()
            .resource_mut::<Messages<RegenerateMap>>()
            .write(RegenerateMap { use_random_seed });
    }

    #[test]
    fn startup_builds_world_map() {
        let mut app = test_app(MapConfig::default().with_size(12, 10).with_seed(42));
        app.update();

        let world_map = app.world().resource::<WorldMap>();
        assert_eq!(world_map.0.seed(), 42);
        assert_eq!(world_map.0.map().provinces().len(), 120);

        let generated = drain_generated(app.world_mut());
        assert_eq!(generated.len(), 1);
        assert_eq!(generated[0].seed, 42);
    }

    #[test]
    fn regenerate_with_same_seed_reports_same_map() {
        let mut app = test_app(MapConfig::default().with_size(12, 10).with_seed(42));
        app.update();
        let first = app.world().resource::<WorldMap>().0.map().provinces().to_vec();
        drain_generated(app.world_mut());

        request(&mut app, false);
        app.update();

        let generated = drain_generated(app.world_mut());
        assert_eq!(generated.len(), 1);
        assert_eq!(generated[0].seed, 42);
        let second = app.world().resource::<WorldMap>().0.map().provinces();
        assert_eq!(first.as_slice(), second);
    }

    #[test]
    fn random_request_wins_when_coalesced() {
        let mut app = test_app(MapConfig::default().with_size(12, 10).with_seed(42));
        app.update();
        drain_generated(app.world_mut());

        request(&mut app, false);
        request(&mut app, true);
        app.update();

        let generated = drain_generated(app.world_mut());
        assert_eq!(generated.len(), 1);
        assert_ne!(generated[0].seed, 42);
    }

    #[test]
    fn invalid_config_leaves_no_world_map() {
        let mut app = test_app(MapConfig::default().with_size(0, 10));
        app.update();
        assert!(app.world().get_resource::<WorldMap>().is_none());

        request(&mut app, true);
        app.update();
        assert!(drain_generated(app.world_mut()).is_empty());
    }
}
