//! # `bevy_udmf_map`
//!
//! In-memory map data model for `bevy_udmf`. Holds the entity containers
//! (vertices, lines, sectors, things), the reverse indices used for indirect
//! targeting (sector tags, line ids), and the spatial query that resolves
//! which sector contains a point.
//!
//! **This crate does NOT process specials** - that is the job of
//! `bevy_udmf_specials`, which reads and writes this data model.
//!
//! ## Architecture
//!
//! Layer 1 (this crate) sits below:
//! - **Layer 2** (`bevy_udmf_specials`): specials processing (slopes,
//!   translucency, sector colours)
//!
//! ## What Layer 1 Provides
//!
//! 1. **Entity arenas**: `MapData` with index-based, non-owning references
//!    between entities
//! 2. **Reverse indices**: `sectors_with_tag`, `lines_with_id`
//! 3. **Spatial query**: `sector_at` (nearest-line side resolution)
//! 4. **Geometry kernel**: plane fitting and 2D line classification
//!
//! ## What Layer 1 Does NOT Provide
//!
//! - Map file parsing or serialization
//! - Structural validation beyond index sanity
//! - Rendering of any kind

pub mod geom;
pub mod map;
pub mod properties;

pub mod prelude {
    //! Common imports for working with the map data model.
    pub use crate::geom::{Plane, distance_to_segment, line_side, plane_from_triangle};
    pub use crate::map::{
        Line, MapData, MapError, PlaneKind, RenderStyle, Sector, Thing, UdmfMap, Vertex,
    };
    pub use crate::properties::{Properties, UdmfValue};
}
