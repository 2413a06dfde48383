//! Map entity arenas and lookup indices.
//!
//! Entities reference each other by index into the `MapData` arenas (lines
//! reference vertices and sectors, never the other way around). References
//! are non-owning: entities are created and destroyed by whoever edits the
//! map, the specials processor only reads them and writes derived state.

use bevy::math::DVec2;
use bevy::prelude::*;
use thiserror::Error;

use crate::geom::{self, Plane};
use crate::properties::Properties;

/// Which of a sector's two planes an operation applies to.
///
/// Slope passes run identical control flow for floors and ceilings; this
/// discriminant selects the plane instead of duplicating each pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaneKind {
    Floor,
    Ceiling,
}

impl PlaneKind {
    /// The UDMF vertex property that declares a height for this plane.
    pub fn vertex_height_property(self) -> &'static str {
        match self {
            PlaneKind::Floor => "zfloor",
            PlaneKind::Ceiling => "zceiling",
        }
    }
}

/// Blending mode for translucent lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderStyle {
    /// Normal alpha blending (UDMF `"translucent"`)
    #[default]
    Translucent,
    /// Additive blending (UDMF `"add"`)
    Add,
}

impl RenderStyle {
    /// The UDMF `renderstyle` keyword for this mode.
    pub fn as_udmf(self) -> &'static str {
        match self {
            RenderStyle::Translucent => "translucent",
            RenderStyle::Add => "add",
        }
    }
}

/// A 2D map vertex, shared by the lines (and thus sectors) that reference it.
#[derive(Debug, Clone, Default)]
pub struct Vertex {
    pub position: DVec2,
    /// Custom properties; `zfloor`/`zceiling` drive triangle-sector slopes.
    pub properties: Properties,
}

impl Vertex {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            position: DVec2::new(x, y),
            properties: Properties::new(),
        }
    }
}

/// A directed wall segment bordering up to two sectors.
///
/// `front` is the sector on the right of `v1 -> v2`, `back` the one on the
/// left. A boundary line has one `None` side. `alpha` and `render_style` are
/// derived rendering state written by the specials processor.
#[derive(Debug, Clone)]
pub struct Line {
    pub v1: usize,
    pub v2: usize,
    pub front: Option<usize>,
    pub back: Option<usize>,
    /// Numeric special code; 0 means none.
    pub special: i32,
    pub args: [i32; 5],
    /// Line id for indirect targeting; non-unique, 0 means untagged.
    pub id: i32,
    pub alpha: f64,
    pub render_style: RenderStyle,
    pub properties: Properties,
}

impl Line {
    pub fn new(v1: usize, v2: usize, front: Option<usize>, back: Option<usize>) -> Self {
        Self {
            v1,
            v2,
            front,
            back,
            special: 0,
            args: [0; 5],
            id: 0,
            alpha: 1.0,
            render_style: RenderStyle::default(),
            properties: Properties::new(),
        }
    }

    pub fn with_special(mut self, special: i32, args: [i32; 5]) -> Self {
        self.special = special;
        self.args = args;
        self
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }
}

/// A floor+ceiling region of the map.
///
/// `floor_height`/`ceiling_height` are the authored scalar heights; the
/// planes are derived state recomputed from scratch on every solver run.
#[derive(Debug, Clone)]
pub struct Sector {
    pub floor_height: f64,
    pub ceiling_height: f64,
    pub floor_plane: Plane,
    pub ceiling_plane: Plane,
    /// Sector tag for indirect targeting; non-unique, 0 means untagged.
    pub tag: i32,
    /// Cache-invalidation flag consumed by a rendering layer.
    pub modified: bool,
    pub properties: Properties,
}

impl Sector {
    pub fn new(floor_height: f64, ceiling_height: f64, tag: i32) -> Self {
        Self {
            floor_height,
            ceiling_height,
            floor_plane: Plane::flat(floor_height),
            ceiling_plane: Plane::flat(ceiling_height),
            tag,
            modified: false,
            properties: Properties::new(),
        }
    }

    /// The authored scalar height for the given plane.
    pub fn plane_height(&self, kind: PlaneKind) -> f64 {
        match kind {
            PlaneKind::Floor => self.floor_height,
            PlaneKind::Ceiling => self.ceiling_height,
        }
    }

    pub fn plane(&self, kind: PlaneKind) -> Plane {
        match kind {
            PlaneKind::Floor => self.floor_plane,
            PlaneKind::Ceiling => self.ceiling_plane,
        }
    }

    pub fn set_plane(&mut self, kind: PlaneKind, plane: Plane) {
        match kind {
            PlaneKind::Floor => self.floor_plane = plane,
            PlaneKind::Ceiling => self.ceiling_plane = plane,
        }
    }
}

/// A point placement in the map.
///
/// In this crate things only matter as slope/tilt/copy markers, selected by
/// their `doomednum`.
#[derive(Debug, Clone)]
pub struct Thing {
    pub position: DVec2,
    /// Facing angle in degrees, 0 = east, counter-clockwise.
    pub angle: f64,
    /// Editor type number.
    pub doomednum: i32,
    pub args: [i32; 5],
    pub properties: Properties,
}

impl Thing {
    pub fn new(x: f64, y: f64, doomednum: i32) -> Self {
        Self {
            position: DVec2::new(x, y),
            angle: 0.0,
            doomednum,
            args: [0; 5],
            properties: Properties::new(),
        }
    }

    pub fn with_args(mut self, args: [i32; 5]) -> Self {
        self.args = args;
        self
    }

    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// The `height` property, a vertical offset from the containing sector's
    /// plane. Defaults to 0 when unset.
    pub fn height_offset(&self) -> f64 {
        self.properties.float("height").unwrap_or(0.0)
    }
}

/// A dangling index reference inside the map data.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("line {line} references missing vertex {vertex}")]
    DanglingVertex { line: usize, vertex: usize },

    #[error("line {line} references missing sector {sector}")]
    DanglingSector { line: usize, sector: usize },
}

/// The entity arenas for one map, plus the lookup indices the specials
/// processor needs.
#[derive(Debug, Clone, Default)]
pub struct MapData {
    pub vertices: Vec<Vertex>,
    pub lines: Vec<Line>,
    pub sectors: Vec<Sector>,
    pub things: Vec<Thing>,
}

impl MapData {
    pub fn add_vertex(&mut self, vertex: Vertex) -> usize {
        self.vertices.push(vertex);
        self.vertices.len() - 1
    }

    pub fn add_line(&mut self, line: Line) -> usize {
        self.lines.push(line);
        self.lines.len() - 1
    }

    pub fn add_sector(&mut self, sector: Sector) -> usize {
        self.sectors.push(sector);
        self.sectors.len() - 1
    }

    pub fn add_thing(&mut self, thing: Thing) -> usize {
        self.things.push(thing);
        self.things.len() - 1
    }

    /// All sectors carrying `tag`, in creation order.
    pub fn sectors_with_tag(&self, tag: i32) -> Vec<usize> {
        self.sectors
            .iter()
            .enumerate()
            .filter(|(_, s)| s.tag == tag)
            .map(|(i, _)| i)
            .collect()
    }

    /// All lines carrying `id`, in creation order.
    pub fn lines_with_id(&self, id: i32) -> Vec<usize> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, l)| l.id == id)
            .map(|(i, _)| i)
            .collect()
    }

    /// Endpoint positions of a line.
    pub fn line_vertices(&self, line: usize) -> (DVec2, DVec2) {
        let line = &self.lines[line];
        (
            self.vertices[line.v1].position,
            self.vertices[line.v2].position,
        )
    }

    /// Vertex indices bounding `sector`, in line order, first occurrence
    /// kept.
    pub fn sector_vertices(&self, sector: usize) -> Vec<usize> {
        let mut result = Vec::new();
        for line in &self.lines {
            if line.front != Some(sector) && line.back != Some(sector) {
                continue;
            }
            for v in [line.v1, line.v2] {
                if !result.contains(&v) {
                    result.push(v);
                }
            }
        }
        result
    }

    /// The sector containing `point`, resolved via the nearest line's facing
    /// side. Ties keep the earliest line; a point exactly on a line counts
    /// as the front side. Returns `None` for points in the void or on an
    /// empty map.
    pub fn sector_at(&self, point: DVec2) -> Option<usize> {
        let mut nearest: Option<(f64, usize)> = None;
        for index in 0..self.lines.len() {
            let (a, b) = self.line_vertices(index);
            let distance = geom::distance_to_segment(point, a, b);
            if nearest.is_none_or(|(best, _)| distance < best) {
                nearest = Some((distance, index));
            }
        }

        let (_, index) = nearest?;
        let line = &self.lines[index];
        let (a, b) = self.line_vertices(index);
        if geom::line_side(point, a, b) >= 0.0 {
            line.front
        } else {
            line.back
        }
    }

    /// Index sanity check. The specials processor assumes all line
    /// references resolve; callers should validate after structural edits.
    pub fn validate(&self) -> Result<(), MapError> {
        for (index, line) in self.lines.iter().enumerate() {
            for vertex in [line.v1, line.v2] {
                if vertex >= self.vertices.len() {
                    return Err(MapError::DanglingVertex {
                        line: index,
                        vertex,
                    });
                }
            }
            for sector in [line.front, line.back].into_iter().flatten() {
                if sector >= self.sectors.len() {
                    return Err(MapError::DanglingSector {
                        line: index,
                        sector,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Component wrapping one map's data plus its embedded ACS script source.
///
/// The specials plugin reprocesses the map whenever this component changes.
#[derive(Component, Debug, Clone, Default)]
pub struct UdmfMap {
    pub data: MapData,
    /// Raw BEHAVIOR/SCRIPTS source, scanned for OPEN scripts. `None` when
    /// the map has no embedded scripts.
    pub scripts: Option<Vec<u8>>,
}
