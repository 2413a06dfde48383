//! The specials orchestrator.
//!
//! [`MapSpecials`] owns the sector colour-binding table and coordinates the
//! line special translator and the slope solver against the active
//! rule-set. One instance per open map: the table's lifetime is
//! reset/rescan, independent of slope state, which lives on the sectors and
//! is recomputed (not reset) by the solver.

use bevy::prelude::*;
use bevy_udmf_map::map::MapData;

use crate::acs::{self, ColourBinding, Rgba};
use crate::config::{GameConfig, SourcePort};
use crate::line_specials;
use crate::slopes;

/// Per-map specials state and processing entry points.
///
/// All entry points are synchronous and run to completion; callers must
/// serialize concurrent access to the same map. No input can make them
/// fail - malformed maps degrade to flat or partially-sloped geometry.
#[derive(Component, Debug, Clone, Default)]
pub struct MapSpecials {
    sector_colours: Vec<ColourBinding>,
}

impl MapSpecials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear out all internal state.
    pub fn reset(&mut self) {
        self.sector_colours.clear();
    }

    /// Process map specials, depending on the active rule-set. Only the
    /// ZDoom rule-set implements extended specials; for any other port this
    /// is a no-op.
    pub fn process_map_specials(&self, map: &mut MapData, config: &GameConfig) {
        if config.port() != SourcePort::ZDoom {
            return;
        }

        // Line specials, in line order.
        for line_index in 0..map.lines.len() {
            line_specials::process_line_special(map, line_index);
        }

        // All slope specials, which must be done in a particular order.
        slopes::process_slopes(map, config);
    }

    /// Process a single line's special, for incremental edits.
    pub fn process_line_special(&self, map: &mut MapData, line_index: usize, config: &GameConfig) {
        if config.port() != SourcePort::ZDoom {
            return;
        }
        line_specials::process_line_special(map, line_index);
    }

    /// Rescan the embedded script source for sector colour bindings,
    /// replacing any previous bindings. An empty buffer clears the table.
    pub fn process_acs_scripts(&mut self, data: &[u8]) {
        self.sector_colours = acs::extract_sector_colours(data);
    }

    /// The colour bound to `tag`, if any. First binding in scan order
    /// wins.
    pub fn tag_colour(&self, tag: i32) -> Option<Rgba> {
        self.sector_colours
            .iter()
            .find(|binding| binding.tag == tag)
            .map(|binding| binding.colour)
    }

    /// Whether any sector tags should be coloured.
    pub fn tag_colours_set(&self) -> bool {
        !self.sector_colours.is_empty()
    }

    /// Mark every sector carrying a bound tag as modified, so a rendering
    /// layer knows to refresh it.
    pub fn update_tagged_sectors(&self, map: &mut MapData) {
        for binding in &self.sector_colours {
            for sector in map.sectors_with_tag(binding.tag) {
                map.sectors[sector].modified = true;
            }
        }
    }
}
