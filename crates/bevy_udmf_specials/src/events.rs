//! Events fired by the specials processing systems.
//!
//! These let downstream plugins (rendering, editor UI) react once a map's
//! derived state is up to date, instead of polling sector modification
//! flags.

use bevy::prelude::*;

/// Fired on a map entity after its specials have been reprocessed.
///
/// At this point the map's sector planes, line translucency and the
/// entity's [`crate::specials::MapSpecials`] colour table reflect the
/// current map data.
///
/// This is an `EntityEvent` that can be observed on the map entity.
///
/// # Example
///
/// ```ignore
/// commands.spawn(UdmfMap { ... })
///     .observe(|trigger: On<MapSpecialsProcessed>, maps: Query<&UdmfMap>| {
///         let map = maps.get(trigger.event().entity).unwrap();
///         // rebuild sector meshes from map.data.sectors[..].floor_plane ...
///     });
/// ```
#[derive(EntityEvent, Debug, Clone)]
pub struct MapSpecialsProcessed {
    /// The map entity that was processed.
    #[event_target]
    pub entity: Entity,
}
