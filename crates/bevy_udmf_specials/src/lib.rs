//! # `bevy_udmf_specials`
//!
//! Map specials processing for `bevy_udmf`. Derives rendering and geometry
//! attributes from declarative markers embedded in the map: line specials
//! (translucency, slope alignment, plane sharing), slope things, vertex
//! height properties and the `Sector_SetColor` calls of embedded ACS OPEN
//! scripts.
//!
//! Processing is deterministic and recomputes derived state from scratch on
//! every invocation; there is no incremental mode. Malformed input never
//! aborts a run - affected entities are skipped with a diagnostic and the
//! map degrades to flat or partially-sloped geometry.
//!
//! ## Architecture
//!
//! Layer 2 (this crate) sits on top of:
//! - **Layer 1** (`bevy_udmf_map`): the map data model being read and
//!   annotated
//!
//! The [`specials::MapSpecials`] orchestrator is the entry point for direct
//! library use; [`plugin::UdmfSpecialsPlugin`] wires it into a Bevy app so
//! changed [`bevy_udmf_map::map::UdmfMap`] components are reprocessed
//! automatically.
//!
//! ## Rule-set gating
//!
//! Only the ZDoom rule-set implements these extended specials. For any other
//! active [`config::SourcePort`] the whole-map and per-line entry points are
//! no-ops.

pub mod acs;
pub mod config;
pub mod events;
pub mod line_specials;
pub mod plugin;
pub mod slopes;
pub mod specials;
pub mod tokenizer;

pub mod prelude {
    //! Common imports for specials processing.
    pub use crate::acs::{ColourBinding, Rgba};
    pub use crate::config::{EntityKind, GameConfig, GameConfigAsset, SourcePort};
    pub use crate::events::MapSpecialsProcessed;
    pub use crate::plugin::{UdmfSpecialsConfig, UdmfSpecialsPlugin};
    pub use crate::specials::MapSpecials;
}

pub use plugin::{UdmfSpecialsConfig, UdmfSpecialsPlugin};
