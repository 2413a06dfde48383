//! # `bevy_udmf`
//!
//! UDMF/ZDoom map specials processing for Bevy.
//!
//! This is a unified meta-crate combining the `bevy_udmf_*` sub-crates:
//! the in-memory map data model and the specials processor that derives
//! rendering and geometry attributes (line translucency, sector colour
//! bindings, floor/ceiling slope planes) from the declarative markers
//! embedded in a map.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use bevy_udmf::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(BevyUdmfPlugin::default())
//!         .add_systems(Startup, spawn_map)
//!         .run();
//! }
//!
//! fn spawn_map(mut commands: Commands) {
//!     let mut map = UdmfMap::default();
//!     // ... fill map.data with sectors, lines, things ...
//!     commands.spawn(map);
//! }
//! ```
//!
//! ## Architecture
//!
//! This crate is organized into 2 layers:
//!
//! - **Layer 1** ([`map`]): the entity arenas, lookup indices and geometry
//!   kernel
//! - **Layer 2** ([`specials`]): the tokenizer, rule-set configuration and
//!   the ordered specials pipeline
//!
//! ## Using Individual Crates
//!
//! The sub-crates can also be used directly, or entirely without an `App`:
//!
//! ```rust
//! use bevy_udmf_map::prelude::*;
//! use bevy_udmf_specials::prelude::*;
//!
//! let mut map = MapData::default();
//! // ... build the map ...
//! let state = MapSpecials::new();
//! state.process_map_specials(&mut map, &GameConfig::default());
//! ```

pub mod plugin;

// Re-export sub-crates for advanced usage
pub use bevy_udmf_map as map;
pub use bevy_udmf_specials as specials;

/// Unified prelude for `bevy_udmf`
pub mod prelude {
    pub use crate::plugin::BevyUdmfPlugin;
    pub use bevy_udmf_map::prelude::*;
    pub use bevy_udmf_specials::prelude::*;
}
