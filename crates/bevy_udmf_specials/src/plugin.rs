//! Plugin for `bevy_udmf_specials`.

use std::path::PathBuf;

use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
use bevy_udmf_map::map::UdmfMap;

use crate::config::{GameConfig, GameConfigAsset};
use crate::events::MapSpecialsProcessed;
use crate::specials::MapSpecials;

/// Asset extension for game-configuration definitions.
///
/// Distinct from plain `.json` so the loader does not claim every JSON
/// asset in the app.
pub const GAME_CONFIG_EXTENSION: &str = "gamecfg.json";

/// Configuration for [`UdmfSpecialsPlugin`].
///
/// # Example
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use bevy_udmf_specials::plugin::{UdmfSpecialsConfig, UdmfSpecialsPlugin};
///
/// App::new()
///     .add_plugins(UdmfSpecialsPlugin::new(UdmfSpecialsConfig {
///         game_config_path: Some("configs/zdoom.gamecfg.json".into()),
///     }));
/// ```
#[derive(Debug, Clone, Default)]
pub struct UdmfSpecialsConfig {
    /// Optional asset path of a JSON game-configuration definition.
    ///
    /// When set, the plugin loads it at startup and replaces the
    /// [`GameConfig`] resource once the asset is available. When unset,
    /// the built-in ZDoom default applies.
    pub game_config_path: Option<PathBuf>,
}

/// Plugin for the specials processing systems.
///
/// Reprocesses every changed [`UdmfMap`] entity in `PreUpdate`: rescans the
/// embedded scripts for colour bindings, reruns the specials pipeline
/// against the active rule-set, marks colour-tagged sectors modified, and
/// triggers [`MapSpecialsProcessed`] on the entity.
#[derive(Default)]
pub struct UdmfSpecialsPlugin {
    config: UdmfSpecialsConfig,
}

/// Resource holding the config path until the startup load runs.
#[derive(Resource)]
struct PendingGameConfig {
    path: PathBuf,
}

/// Handle to the loaded game-configuration asset.
#[derive(Resource)]
struct GameConfigHandle(Handle<GameConfigAsset>);

impl UdmfSpecialsPlugin {
    /// Create a new plugin with custom configuration.
    pub fn new(config: UdmfSpecialsConfig) -> Self {
        Self { config }
    }
}

impl Plugin for UdmfSpecialsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(JsonAssetPlugin::<GameConfigAsset>::new(&[GAME_CONFIG_EXTENSION]));

        // The built-in ZDoom rule-set applies until a definition loads.
        app.init_resource::<GameConfig>();

        if let Some(path) = &self.config.game_config_path {
            app.insert_resource(PendingGameConfig { path: path.clone() });
            app.add_systems(Startup, load_game_config);
        }

        // Config application runs before map processing so a definition
        // loaded this frame gates the same frame's reprocessing.
        app.add_systems(
            PreUpdate,
            (
                apply_game_config.run_if(resource_exists::<GameConfigHandle>),
                process_changed_maps,
            )
                .chain(),
        );
    }
}

fn load_game_config(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    pending: Res<PendingGameConfig>,
) {
    let handle = asset_server.load(pending.path.clone());
    commands.insert_resource(GameConfigHandle(handle));
    commands.remove_resource::<PendingGameConfig>();
}

/// Replace the [`GameConfig`] resource when the definition asset loads or
/// hot-reloads.
fn apply_game_config(
    handle: Res<GameConfigHandle>,
    assets: Res<Assets<GameConfigAsset>>,
    mut config: ResMut<GameConfig>,
) {
    if !assets.is_changed() {
        return;
    }
    let Some(asset) = assets.get(&handle.0) else {
        return;
    };
    *config = GameConfig::from_asset(asset);
    info!("Applied game configuration for port {:?}", config.port());
}

/// Reactive system that reprocesses specials for changed map entities.
///
/// # Triggers
///
/// - `Changed<UdmfMap>` - when map data is added or edited
///
/// Each map entity owns its own [`MapSpecials`] component (inserted here on
/// first processing), so multiple open maps keep independent colour
/// tables.
fn process_changed_maps(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut maps: Query<(Entity, &mut UdmfMap, Option<&mut MapSpecials>), Changed<UdmfMap>>,
) {
    for (entity, mut map, specials) in maps.iter_mut() {
        debug!("Processing map specials for entity {entity:?}");

        if let Err(error) = map.data.validate() {
            warn!("Skipping specials for map {entity:?}: {error}");
            continue;
        }

        match specials {
            Some(mut specials) => {
                run_map_pipeline(&mut map, &mut specials, &config);
            }
            None => {
                let mut specials = MapSpecials::new();
                run_map_pipeline(&mut map, &mut specials, &config);
                commands.entity(entity).insert(specials);
            }
        }

        commands
            .entity(entity)
            .trigger(|entity| MapSpecialsProcessed { entity });
    }
}

fn run_map_pipeline(map: &mut UdmfMap, specials: &mut MapSpecials, config: &GameConfig) {
    specials.process_acs_scripts(map.scripts.as_deref().unwrap_or_default());
    specials.process_map_specials(&mut map.data, config);
    specials.update_tagged_sectors(&mut map.data);
}
