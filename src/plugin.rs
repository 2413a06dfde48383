//! Unified plugin for bevy_udmf.

use bevy::prelude::*;

use bevy_udmf_specials::{UdmfSpecialsConfig, UdmfSpecialsPlugin};

/// Unified plugin that wires up all bevy_udmf functionality.
///
/// This plugin adds the specials processor ([`UdmfSpecialsPlugin`]), which
/// watches spawned maps and derives their rendering and geometry attributes.
///
/// # Example
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use bevy_udmf::prelude::*;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(BevyUdmfPlugin::default())
///     .run();
/// ```
///
/// # With Custom Configuration
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use bevy_udmf::prelude::*;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(
///         BevyUdmfPlugin::default()
///             .with_specials(UdmfSpecialsConfig {
///                 game_config_path: Some("assets/game_configs/zdoom.gamecfg.json".into()),
///             })
///     )
///     .run();
/// ```
#[derive(Default)]
pub struct BevyUdmfPlugin {
    /// Specials processing configuration
    pub specials: UdmfSpecialsConfig,
}

impl BevyUdmfPlugin {
    /// Create with custom specials configuration
    pub fn with_specials(mut self, config: UdmfSpecialsConfig) -> Self {
        self.specials = config;
        self
    }
}

impl Plugin for BevyUdmfPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(UdmfSpecialsPlugin::new(self.specials.clone()));

        info!("BevyUdmfPlugin initialized");
    }
}
