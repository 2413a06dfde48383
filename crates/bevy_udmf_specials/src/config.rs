//! Game configuration: active source port and recognized UDMF properties.
//!
//! The specials processor consults this to decide whether the extended
//! specials apply at all (only the ZDoom rule-set implements them) and
//! whether a UDMF property is recognized for an entity kind (the vertex
//! `zfloor`/`zceiling` capability gate).
//!
//! Configurations can be loaded from JSON via [`GameConfigAsset`]:
//!
//! ```json
//! {
//!     "port": "zdoom",
//!     "udmfProperties": [
//!         { "name": "zfloor", "entity": "vertex" },
//!         { "name": "zceiling", "entity": "vertex" }
//!     ]
//! }
//! ```

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// The active rule-set identifier.
///
/// Port naming follows the usual source-port family tree. Note that only
/// [`SourcePort::ZDoom`] enables extended specials processing; `GZDoom` is a
/// distinct identifier and is deliberately not matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourcePort {
    Doom,
    Heretic,
    Hexen,
    Strife,
    Boom,
    Mbf,
    #[default]
    ZDoom,
    GzDoom,
    Eternity,
    Vavoom,
}

/// The kind of map entity a UDMF property applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Vertex,
    Line,
    Sector,
    Thing,
}

/// A recognized UDMF property declaration in a configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct UdmfPropertyDef {
    pub name: String,
    pub entity: EntityKind,
}

/// JSON-loadable game configuration definition.
///
/// Loaded through `bevy_common_assets`' `JsonAssetPlugin` when
/// [`crate::plugin::UdmfSpecialsConfig::game_config_path`] is set, or parsed
/// directly with [`GameConfig::from_json`].
#[derive(Asset, TypePath, Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfigAsset {
    /// Active source port.
    #[serde(default)]
    pub port: SourcePort,

    /// Recognized UDMF properties per entity kind.
    #[serde(default)]
    pub udmf_properties: Vec<UdmfPropertyDef>,
}

/// Failed to parse a game configuration definition.
#[derive(Debug, Error)]
pub enum GameConfigError {
    #[error("invalid game configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The active game configuration.
///
/// The default recognizes the ZDoom UDMF properties this crate interprets.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    port: SourcePort,
    udmf_properties: HashMap<EntityKind, HashSet<String>>,
}

impl Default for GameConfig {
    fn default() -> Self {
        let mut config = Self {
            port: SourcePort::ZDoom,
            udmf_properties: HashMap::new(),
        };
        for name in ["zfloor", "zceiling"] {
            config.recognize_property(EntityKind::Vertex, name);
        }
        for name in ["alpha", "renderstyle"] {
            config.recognize_property(EntityKind::Line, name);
        }
        config.recognize_property(EntityKind::Sector, "lightcolor");
        config.recognize_property(EntityKind::Thing, "height");
        config
    }
}

impl GameConfig {
    /// Parse a configuration from a JSON definition.
    pub fn from_json(json: &str) -> Result<Self, GameConfigError> {
        let asset: GameConfigAsset = serde_json::from_str(json)?;
        Ok(Self::from_asset(&asset))
    }

    pub fn from_asset(asset: &GameConfigAsset) -> Self {
        let mut config = Self {
            port: asset.port,
            udmf_properties: HashMap::new(),
        };
        for def in &asset.udmf_properties {
            config.recognize_property(def.entity, &def.name);
        }
        config
    }

    pub fn port(&self) -> SourcePort {
        self.port
    }

    pub fn set_port(&mut self, port: SourcePort) {
        self.port = port;
    }

    pub fn recognize_property(&mut self, entity: EntityKind, name: impl Into<String>) {
        self.udmf_properties
            .entry(entity)
            .or_default()
            .insert(name.into());
    }

    /// Whether the active rule-set recognizes `name` for `entity` entities.
    pub fn is_property_recognized(&self, name: &str, entity: EntityKind) -> bool {
        self.udmf_properties
            .get(&entity)
            .is_some_and(|names| names.contains(name))
    }
}
