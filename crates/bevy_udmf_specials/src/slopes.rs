//! The six-pass slope solver.
//!
//! ZDoom has a variety of slope mechanisms which must be evaluated in a
//! specific order, because later passes read sector planes written by
//! earlier ones through tag/id indirection:
//!
//! 1. reset every sector to flat planes
//! 2. Plane_Align (special 181), in line order
//! 3. line slope + sector tilt things, in thing order
//! 4. slope copy things, in thing order
//! 5. vertex triangle slopes, in sector order
//! 6. Plane_Copy (special 118), in line order
//!
//! Every rejection is non-fatal: the offending entity is skipped with a
//! diagnostic and its planes keep their value from an earlier pass.

use bevy::math::DVec3;
use bevy::prelude::*;
use bevy_udmf_map::geom::{self, plane_from_triangle};
use bevy_udmf_map::map::{MapData, PlaneKind};

use crate::config::{EntityKind, GameConfig};

/// Plane_Align line special.
pub const PLANE_ALIGN: i32 = 181;
/// Plane_Copy line special.
pub const PLANE_COPY: i32 = 118;

/// Line slope thing types (floor, ceiling).
pub const THING_LINE_SLOPE_FLOOR: i32 = 9500;
pub const THING_LINE_SLOPE_CEILING: i32 = 9501;
/// Sector tilt thing types (floor, ceiling).
pub const THING_SECTOR_TILT_FLOOR: i32 = 9502;
pub const THING_SECTOR_TILT_CEILING: i32 = 9503;
/// Slope copy thing types (floor, ceiling).
pub const THING_COPY_FLOOR: i32 = 9510;
pub const THING_COPY_CEILING: i32 = 9511;

/// A Plane_Align reference vertex closer than this to the line cannot
/// define a slope.
const ALIGN_EPSILON: f64 = 0.01;

/// Run the full ordered slope pipeline over the map.
pub fn process_slopes(map: &mut MapData, config: &GameConfig) {
    // First things first: reset every sector to flat planes so even
    // untouched sectors end up with a well-defined plane.
    for sector in &mut map.sectors {
        for kind in [PlaneKind::Floor, PlaneKind::Ceiling] {
            sector.set_plane(kind, geom::Plane::flat(sector.plane_height(kind)));
        }
    }

    // Plane_Align, in line order.
    for line_index in 0..map.lines.len() {
        let line = &map.lines[line_index];
        if line.special != PLANE_ALIGN {
            continue;
        }
        let (front, back) = (line.front, line.back);
        let (floor_arg, ceiling_arg) = (line.args[0], line.args[1]);

        let (Some(front), Some(back)) = (front, back) else {
            warn!("Ignoring Plane_Align on one-sided line {line_index}");
            continue;
        };
        if front == back {
            warn!(
                "Ignoring Plane_Align on line {line_index}, which has the same sector on both sides"
            );
            continue;
        }

        for (kind, arg) in [(PlaneKind::Floor, floor_arg), (PlaneKind::Ceiling, ceiling_arg)] {
            match arg {
                1 => apply_plane_align(map, line_index, kind, front, back),
                2 => apply_plane_align(map, line_index, kind, back, front),
                _ => {}
            }
        }
    }

    // Line slope things and sector tilt things, in thing order.
    // (Vavoom slope things are not implemented.)
    for thing_index in 0..map.things.len() {
        match map.things[thing_index].doomednum {
            THING_LINE_SLOPE_FLOOR => apply_line_slope_thing(map, thing_index, PlaneKind::Floor),
            THING_LINE_SLOPE_CEILING => {
                apply_line_slope_thing(map, thing_index, PlaneKind::Ceiling);
            }
            THING_SECTOR_TILT_FLOOR => apply_sector_tilt_thing(map, thing_index, PlaneKind::Floor),
            THING_SECTOR_TILT_CEILING => {
                apply_sector_tilt_thing(map, thing_index, PlaneKind::Ceiling);
            }
            _ => {}
        }
    }

    // Slope copy things, in thing order.
    for thing_index in 0..map.things.len() {
        let thing = &map.things[thing_index];
        let kind = match thing.doomednum {
            THING_COPY_FLOOR => PlaneKind::Floor,
            THING_COPY_CEILING => PlaneKind::Ceiling,
            _ => continue,
        };
        let position = thing.position;
        let tag = thing.args[0];

        let Some(target) = map.sector_at(position) else {
            continue;
        };
        if tag == 0 {
            warn!("Ignoring slope copy thing in sector {target} with no tag argument");
            continue;
        }
        let tagged = map.sectors_with_tag(tag);
        let Some(&source) = tagged.first() else {
            warn!("Ignoring slope copy thing in sector {target}; no sectors have target tag {tag}");
            continue;
        };

        let plane = map.sectors[source].plane(kind);
        map.sectors[target].set_plane(kind, plane);
    }

    // Vertex heights -- only applies for sectors with exactly three
    // vertices.
    for sector_index in 0..map.sectors.len() {
        let vertices = map.sector_vertices(sector_index);
        if vertices.len() != 3 {
            continue;
        }
        for kind in [PlaneKind::Floor, PlaneKind::Ceiling] {
            apply_vertex_height_slope(map, config, sector_index, &vertices, kind);
        }
    }

    // Plane_Copy, in line order. The "share" argument copies from one side
    // of the line to the other.
    for line_index in 0..map.lines.len() {
        let line = &map.lines[line_index];
        if line.special != PLANE_COPY {
            continue;
        }
        let (Some(front), Some(back)) = (line.front, line.back) else {
            continue;
        };
        let share = line.args[4];

        // Bits 0-1 control the floor, bits 2-3 the ceiling: 01 copies
        // front to back, 10 copies back to front. Remaining argument bits
        // are reserved.
        for (kind, bits) in [(PlaneKind::Floor, share & 3), (PlaneKind::Ceiling, (share >> 2) & 3)] {
            let (from, to) = match bits {
                1 => (front, back),
                2 => (back, front),
                _ => continue,
            };
            let plane = map.sectors[from].plane(kind);
            map.sectors[to].set_plane(kind, plane);
        }
    }
}

/// Slope `target`'s plane along the line, using `model`'s height at the
/// line and `target`'s height at the vertex furthest from it.
fn apply_plane_align(
    map: &mut MapData,
    line_index: usize,
    kind: PlaneKind,
    target: usize,
    model: usize,
) {
    let (l1, l2) = map.line_vertices(line_index);

    // The slope is between the line and the point in the target sector
    // furthest away from it, which can only be at a vertex.
    let mut furthest_dist = 0.0;
    let mut furthest_vertex = None;
    for vertex in map.sector_vertices(target) {
        let position = map.vertices[vertex].position;
        let dist = geom::distance_to_segment(position, l1, l2);
        if dist > furthest_dist {
            furthest_dist = dist;
            furthest_vertex = Some(position);
        }
    }

    let Some(reference) = furthest_vertex else {
        warn!(
            "Ignoring Plane_Align on line {line_index}; sector {target} has no appropriate reference vertex"
        );
        return;
    };
    if furthest_dist < ALIGN_EPSILON {
        warn!(
            "Ignoring Plane_Align on line {line_index}; sector {target} has no appropriate reference vertex"
        );
        return;
    }

    // Three points: the line's endpoints at the model sector's height, and
    // the reference vertex at the target sector's height.
    let model_z = map.sectors[model].plane_height(kind);
    let target_z = map.sectors[target].plane_height(kind);
    let p1 = l1.extend(model_z);
    let p2 = l2.extend(model_z);
    let p3 = reference.extend(target_z);

    match plane_from_triangle(p1, p2, p3) {
        Some(plane) => map.sectors[target].set_plane(kind, plane),
        None => warn!("Ignoring Plane_Align on line {line_index}; degenerate slope geometry"),
    }
}

/// Slope the sector facing the thing across every line sharing the thing's
/// line id. Multiple matches each overwrite the plane in turn.
fn apply_line_slope_thing(map: &mut MapData, thing_index: usize, kind: PlaneKind) {
    let position = map.things[thing_index].position;
    let line_id = map.things[thing_index].args[0];
    if line_id == 0 {
        warn!("Ignoring line slope thing {thing_index} with no line id argument");
        return;
    }

    // The thing's true height is computed on first use, to avoid the
    // containment query when no lines match.
    let mut thing_z = None;

    for line_index in map.lines_with_id(line_id) {
        // Line slope things only affect the sector on the side of the line
        // that faces the thing.
        let (l1, l2) = map.line_vertices(line_index);
        let side = geom::line_side(position, l1, l2);
        let target = if side < 0.0 {
            map.lines[line_index].back
        } else if side > 0.0 {
            map.lines[line_index].front
        } else {
            None
        };
        let Some(target) = target else {
            continue;
        };

        let z = match thing_z {
            Some(z) => z,
            None => {
                let Some(containing) = map.sector_at(position) else {
                    return;
                };
                let z = map.sectors[containing].plane(kind).height_at(position)
                    + map.things[thing_index].height_offset();
                thing_z = Some(z);
                z
            }
        };

        // Three points: endpoints of the line on the target's current
        // plane, and the thing itself.
        let target_plane = map.sectors[target].plane(kind);
        let p1 = l1.extend(target_plane.height_at(l1));
        let p2 = l2.extend(target_plane.height_at(l2));
        let p3 = position.extend(z);

        match plane_from_triangle(p1, p2, p3) {
            Some(plane) => map.sectors[target].set_plane(kind, plane),
            None => warn!(
                "Ignoring line slope thing {thing_index} on line {line_index}; degenerate slope geometry"
            ),
        }
    }
}

/// Tilt the containing sector's plane by the thing's facing and tilt
/// angles.
fn apply_sector_tilt_thing(map: &mut MapData, thing_index: usize, kind: PlaneKind) {
    let position = map.things[thing_index].position;
    let Some(target) = map.sector_at(position) else {
        return;
    };

    // The first argument is the tilt angle, starting with 0 as straight
    // down; subtracting 90 makes 90 mean level.
    let raw_angle = map.things[thing_index].args[0];
    if raw_angle == 0 || raw_angle == 180 {
        debug!("Ignoring sector tilt thing {thing_index} with vertical tilt");
        return;
    }

    let angle = map.things[thing_index].angle.to_radians();
    let tilt = f64::from(raw_angle - 90).to_radians();

    // The resulting plane goes through the position of the thing.
    let z = map.sectors[target].plane_height(kind) + map.things[thing_index].height_offset();
    let point = position.extend(z);

    let (sin_angle, cos_angle) = angle.sin_cos();
    let (sin_tilt, cos_tilt) = tilt.sin_cos();

    // Two vectors lying on the plane. The line perpendicular to the facing
    // direction is the axis the tilt rotates around, so it lies flat. The
    // second vector combines the tilt (sin along z, cos away from the z
    // axis) with the facing direction.
    let vec1 = DVec3::new(-sin_angle, cos_angle, 0.0);
    let vec2 = DVec3::new(cos_tilt * cos_angle, cos_tilt * sin_angle, sin_tilt);

    match plane_from_triangle(point, point + vec1, point + vec2) {
        Some(plane) => map.sectors[target].set_plane(kind, plane),
        None => warn!("Ignoring sector tilt thing {thing_index}; degenerate tilt geometry"),
    }
}

/// Slope a triangular sector through the declared heights of its three
/// vertices.
fn apply_vertex_height_slope(
    map: &mut MapData,
    config: &GameConfig,
    sector_index: usize,
    vertices: &[usize],
    kind: PlaneKind,
) {
    let prop = kind.vertex_height_property();
    if !config.is_property_recognized(prop, EntityKind::Vertex) {
        return;
    }

    let z1 = map.vertices[vertices[0]].properties.float(prop).unwrap_or(0.0);
    let z2 = map.vertices[vertices[1]].properties.float(prop).unwrap_or(0.0);
    let z3 = map.vertices[vertices[2]].properties.float(prop).unwrap_or(0.0);
    // A height of 0 cannot be told apart from an unset height, so all
    // zeroes means no slope was declared. A known limitation of the
    // source representation, not something to reinterpret.
    if z1 == 0.0 && z2 == 0.0 && z3 == 0.0 {
        return;
    }

    let p1 = map.vertices[vertices[0]].position.extend(z1);
    let p2 = map.vertices[vertices[1]].position.extend(z2);
    let p3 = map.vertices[vertices[2]].position.extend(z3);

    match plane_from_triangle(p1, p2, p3) {
        Some(plane) => map.sectors[sector_index].set_plane(kind, plane),
        None => warn!("Ignoring vertex heights on sector {sector_index}; degenerate slope geometry"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::DVec2;
    use bevy_udmf_map::geom::Plane;
    use bevy_udmf_map::map::{Line, Sector, Thing, Vertex};
    use bevy_udmf_map::properties::UdmfValue;

    /// Axis-aligned rectangular sector with all four lines fronting it
    /// (vertices wound clockwise so the interior is on the right).
    /// Returns (sector, [v0..v3], [l0..l3]); l1 is the edge from
    /// (x0, y1) to (x1, y1).
    fn add_rect_sector(
        map: &mut MapData,
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        sector: Sector,
    ) -> (usize, [usize; 4], [usize; 4]) {
        let s = map.add_sector(sector);
        let v0 = map.add_vertex(Vertex::new(x0, y0));
        let v1 = map.add_vertex(Vertex::new(x0, y1));
        let v2 = map.add_vertex(Vertex::new(x1, y1));
        let v3 = map.add_vertex(Vertex::new(x1, y0));
        let l0 = map.add_line(Line::new(v0, v1, Some(s), None));
        let l1 = map.add_line(Line::new(v1, v2, Some(s), None));
        let l2 = map.add_line(Line::new(v2, v3, Some(s), None));
        let l3 = map.add_line(Line::new(v3, v0, Some(s), None));
        (s, [v0, v1, v2, v3], [l0, l1, l2, l3])
    }

    fn height_at(map: &MapData, sector: usize, kind: PlaneKind, x: f64, y: f64) -> f64 {
        map.sectors[sector].plane(kind).height_at(DVec2::new(x, y))
    }

    #[test]
    fn test_reset_dominance() {
        // Sectors untouched by any pass end up flat at their scalar
        // heights, even if their planes started out as garbage.
        let mut map = MapData::default();
        let s = map.add_sector(Sector::new(16.0, 144.0, 0));
        map.sectors[s].floor_plane = Plane {
            a: 0.5,
            b: 0.5,
            c: 0.7,
            d: 123.0,
        };
        process_slopes(&mut map, &GameConfig::default());
        assert_eq!(map.sectors[s].floor_plane, Plane::flat(16.0));
        assert_eq!(map.sectors[s].ceiling_plane, Plane::flat(144.0));
    }

    #[test]
    fn test_plane_align_back_sector_target() {
        // Shared line from (0,0) to (64,0): front sector F below (y < 0),
        // back sector B above with its far edge at y = 100. arg0 = 2 makes
        // B the target and F the model.
        let mut map = MapData::default();
        let f = map.add_sector(Sector::new(0.0, 128.0, 0));
        let b = map.add_sector(Sector::new(64.0, 128.0, 0));
        let a0 = map.add_vertex(Vertex::new(0.0, 0.0));
        let a1 = map.add_vertex(Vertex::new(64.0, 0.0));
        let c0 = map.add_vertex(Vertex::new(64.0, 100.0));
        let c1 = map.add_vertex(Vertex::new(0.0, 100.0));
        map.add_line(
            Line::new(a0, a1, Some(f), Some(b)).with_special(PLANE_ALIGN, [2, 0, 0, 0, 0]),
        );
        map.add_line(Line::new(a1, c0, Some(b), None));
        map.add_line(Line::new(c0, c1, Some(b), None));
        map.add_line(Line::new(c1, a0, Some(b), None));

        process_slopes(&mut map, &GameConfig::default());

        // The plane passes through the line's endpoints at the model
        // height and the far vertices at the target height.
        assert!((height_at(&map, b, PlaneKind::Floor, 0.0, 0.0)).abs() < 1e-9);
        assert!((height_at(&map, b, PlaneKind::Floor, 64.0, 0.0)).abs() < 1e-9);
        assert!((height_at(&map, b, PlaneKind::Floor, 64.0, 100.0) - 64.0).abs() < 1e-9);
        assert!((height_at(&map, b, PlaneKind::Floor, 0.0, 100.0) - 64.0).abs() < 1e-9);
        // The model keeps its flat plane.
        assert_eq!(map.sectors[f].floor_plane, Plane::flat(0.0));
    }

    #[test]
    fn test_plane_align_one_sided_skipped() {
        let mut map = MapData::default();
        let s = map.add_sector(Sector::new(0.0, 128.0, 0));
        let v0 = map.add_vertex(Vertex::new(0.0, 0.0));
        let v1 = map.add_vertex(Vertex::new(64.0, 0.0));
        map.add_line(Line::new(v0, v1, Some(s), None).with_special(PLANE_ALIGN, [1, 0, 0, 0, 0]));

        process_slopes(&mut map, &GameConfig::default());
        assert_eq!(map.sectors[s].floor_plane, Plane::flat(0.0));
    }

    #[test]
    fn test_plane_align_self_referencing_skipped() {
        let mut map = MapData::default();
        let s = map.add_sector(Sector::new(0.0, 128.0, 0));
        let v0 = map.add_vertex(Vertex::new(0.0, 0.0));
        let v1 = map.add_vertex(Vertex::new(64.0, 0.0));
        map.add_line(
            Line::new(v0, v1, Some(s), Some(s)).with_special(PLANE_ALIGN, [1, 0, 0, 0, 0]),
        );

        process_slopes(&mut map, &GameConfig::default());
        assert_eq!(map.sectors[s].floor_plane, Plane::flat(0.0));
    }

    #[test]
    fn test_plane_align_no_reference_vertex() {
        // Target sector whose only vertices lie on the line itself.
        let mut map = MapData::default();
        let f = map.add_sector(Sector::new(0.0, 128.0, 0));
        let b = map.add_sector(Sector::new(64.0, 128.0, 0));
        let v0 = map.add_vertex(Vertex::new(0.0, 0.0));
        let v1 = map.add_vertex(Vertex::new(64.0, 0.0));
        map.add_line(
            Line::new(v0, v1, Some(f), Some(b)).with_special(PLANE_ALIGN, [2, 0, 0, 0, 0]),
        );

        process_slopes(&mut map, &GameConfig::default());
        assert_eq!(map.sectors[b].floor_plane, Plane::flat(64.0));
    }

    #[test]
    fn test_line_slope_thing() {
        // Square sector below the id-5 line, thing inside it with a height
        // offset of 16.
        let mut map = MapData::default();
        let (s, _, lines) = add_rect_sector(&mut map, 0.0, -64.0, 64.0, 0.0, Sector::new(0.0, 128.0, 0));
        // The top edge (from (0,0) to (64,0)) carries the line id.
        map.lines[lines[1]].id = 5;
        let mut thing = Thing::new(32.0, -32.0, THING_LINE_SLOPE_FLOOR).with_args([5, 0, 0, 0, 0]);
        thing.properties.insert("height", UdmfValue::Float(16.0));
        map.add_thing(thing);

        process_slopes(&mut map, &GameConfig::default());

        assert!((height_at(&map, s, PlaneKind::Floor, 0.0, 0.0)).abs() < 1e-9);
        assert!((height_at(&map, s, PlaneKind::Floor, 64.0, 0.0)).abs() < 1e-9);
        assert!((height_at(&map, s, PlaneKind::Floor, 32.0, -32.0) - 16.0).abs() < 1e-9);
        // The ceiling is unaffected by a floor slope thing.
        assert_eq!(map.sectors[s].ceiling_plane, Plane::flat(128.0));
    }

    #[test]
    fn test_line_slope_thing_multiple_matches_last_wins() {
        // Two edges share line id 5: the top edge (matched first) and the
        // bottom edge. The second fit goes through the bottom edge's
        // endpoints at the height the first fit left there, 64 * 16 / 44,
        // and the thing's cached height.
        let mut map = MapData::default();
        let (s, _, lines) =
            add_rect_sector(&mut map, 0.0, -64.0, 64.0, 0.0, Sector::new(0.0, 128.0, 0));
        map.lines[lines[1]].id = 5;
        map.lines[lines[3]].id = 5;
        let mut thing = Thing::new(32.0, -44.0, THING_LINE_SLOPE_FLOOR).with_args([5, 0, 0, 0, 0]);
        thing.properties.insert("height", UdmfValue::Float(16.0));
        map.add_thing(thing);

        process_slopes(&mut map, &GameConfig::default());

        let bottom = 64.0 * 16.0 / 44.0;
        assert!((height_at(&map, s, PlaneKind::Floor, 0.0, -64.0) - bottom).abs() < 1e-9);
        assert!((height_at(&map, s, PlaneKind::Floor, 64.0, -64.0) - bottom).abs() < 1e-9);
        assert!((height_at(&map, s, PlaneKind::Floor, 32.0, -44.0) - 16.0).abs() < 1e-9);
        // The top edge stays at the model height of the first fit.
        assert!((height_at(&map, s, PlaneKind::Floor, 32.0, 0.0)).abs() < 1e-9);
    }

    #[test]
    fn test_line_slope_thing_outside_any_sector() {
        // A thing in the void has no containing sector to resolve its
        // height from; the remaining id matches are abandoned and every
        // matched line keeps its plane.
        let mut map = MapData::default();
        let (s, _, lines) =
            add_rect_sector(&mut map, 0.0, -64.0, 64.0, 0.0, Sector::new(0.0, 128.0, 0));
        map.lines[lines[1]].id = 5;
        map.lines[lines[3]].id = 5;
        map.add_thing(Thing::new(-32.0, -32.0, THING_LINE_SLOPE_FLOOR).with_args([5, 0, 0, 0, 0]));

        process_slopes(&mut map, &GameConfig::default());
        assert_eq!(map.sectors[s].floor_plane, Plane::flat(0.0));
    }

    #[test]
    fn test_line_slope_thing_no_line_id() {
        let mut map = MapData::default();
        let (s, _, _) = add_rect_sector(&mut map, 0.0, -64.0, 64.0, 0.0, Sector::new(0.0, 128.0, 0));
        map.add_thing(Thing::new(32.0, -32.0, THING_LINE_SLOPE_FLOOR));

        process_slopes(&mut map, &GameConfig::default());
        assert_eq!(map.sectors[s].floor_plane, Plane::flat(0.0));
    }

    #[test]
    fn test_sector_tilt_thing() {
        // Thing facing east with a raw tilt of 135 degrees: the floor
        // rises eastward at 45 degrees through the thing's position.
        let mut map = MapData::default();
        let (s, _, _) = add_rect_sector(&mut map, 0.0, -64.0, 64.0, 0.0, Sector::new(0.0, 128.0, 0));
        map.add_thing(
            Thing::new(32.0, -32.0, THING_SECTOR_TILT_FLOOR).with_args([135, 0, 0, 0, 0]),
        );

        process_slopes(&mut map, &GameConfig::default());

        assert!((height_at(&map, s, PlaneKind::Floor, 32.0, -32.0)).abs() < 1e-9);
        assert!((height_at(&map, s, PlaneKind::Floor, 33.0, -32.0) - 1.0).abs() < 1e-9);
        assert!((height_at(&map, s, PlaneKind::Floor, 0.0, -32.0) + 32.0).abs() < 1e-9);
        // No variation along the tilt axis.
        assert!((height_at(&map, s, PlaneKind::Floor, 32.0, -64.0)).abs() < 1e-9);
    }

    #[test]
    fn test_sector_tilt_thing_vertical_rejected() {
        let mut map = MapData::default();
        let (s, _, _) = add_rect_sector(&mut map, 0.0, -64.0, 64.0, 0.0, Sector::new(0.0, 128.0, 0));
        map.add_thing(Thing::new(32.0, -32.0, THING_SECTOR_TILT_FLOOR).with_args([0, 0, 0, 0, 0]));
        map.add_thing(
            Thing::new(32.0, -32.0, THING_SECTOR_TILT_FLOOR).with_args([180, 0, 0, 0, 0]),
        );

        process_slopes(&mut map, &GameConfig::default());
        assert_eq!(map.sectors[s].floor_plane, Plane::flat(0.0));
    }

    #[test]
    fn test_slope_copy_thing() {
        let mut map = MapData::default();
        let (target, _, _) =
            add_rect_sector(&mut map, 0.0, -64.0, 64.0, 0.0, Sector::new(0.0, 128.0, 0));
        // Source sector needs no geometry, only the tag.
        let source = map.add_sector(Sector::new(32.0, 128.0, 3));
        map.add_thing(Thing::new(32.0, -32.0, THING_COPY_FLOOR).with_args([3, 0, 0, 0, 0]));

        process_slopes(&mut map, &GameConfig::default());
        assert_eq!(map.sectors[target].floor_plane, Plane::flat(32.0));
        assert_eq!(map.sectors[source].floor_plane, Plane::flat(32.0));
        assert_eq!(map.sectors[target].ceiling_plane, Plane::flat(128.0));
    }

    #[test]
    fn test_slope_copy_thing_missing_tag() {
        let mut map = MapData::default();
        let (target, _, _) =
            add_rect_sector(&mut map, 0.0, -64.0, 64.0, 0.0, Sector::new(0.0, 128.0, 0));
        map.add_sector(Sector::new(32.0, 128.0, 3));
        // No tag argument, then a tag nothing carries.
        map.add_thing(Thing::new(32.0, -32.0, THING_COPY_FLOOR));
        map.add_thing(Thing::new(32.0, -32.0, THING_COPY_FLOOR).with_args([9, 0, 0, 0, 0]));

        process_slopes(&mut map, &GameConfig::default());
        assert_eq!(map.sectors[target].floor_plane, Plane::flat(0.0));
    }

    fn add_triangle_sector(map: &mut MapData, heights: [f64; 3]) -> usize {
        let s = map.add_sector(Sector::new(0.0, 128.0, 0));
        let positions = [(0.0, 0.0), (64.0, 0.0), (32.0, 64.0)];
        let mut vertices = [0; 3];
        for (i, (x, y)) in positions.into_iter().enumerate() {
            let mut vertex = Vertex::new(x, y);
            vertex.properties.insert("zfloor", UdmfValue::Float(heights[i]));
            vertices[i] = map.add_vertex(vertex);
        }
        map.add_line(Line::new(vertices[0], vertices[1], Some(s), None));
        map.add_line(Line::new(vertices[1], vertices[2], Some(s), None));
        map.add_line(Line::new(vertices[2], vertices[0], Some(s), None));
        s
    }

    #[test]
    fn test_vertex_height_slope() {
        let mut map = MapData::default();
        let s = add_triangle_sector(&mut map, [0.0, 0.0, 32.0]);

        process_slopes(&mut map, &GameConfig::default());

        assert!((height_at(&map, s, PlaneKind::Floor, 0.0, 0.0)).abs() < 1e-9);
        assert!((height_at(&map, s, PlaneKind::Floor, 64.0, 0.0)).abs() < 1e-9);
        assert!((height_at(&map, s, PlaneKind::Floor, 32.0, 64.0) - 32.0).abs() < 1e-9);
        // zceiling was never set, so the ceiling stays flat.
        assert_eq!(map.sectors[s].ceiling_plane, Plane::flat(128.0));
    }

    #[test]
    fn test_vertex_height_all_zero_stays_flat() {
        // All-zero heights are indistinguishable from unset heights and
        // must not produce a fitted slope.
        let mut map = MapData::default();
        let s = add_triangle_sector(&mut map, [0.0, 0.0, 0.0]);
        map.sectors[s].floor_height = 24.0;

        process_slopes(&mut map, &GameConfig::default());
        assert_eq!(map.sectors[s].floor_plane, Plane::flat(24.0));
    }

    #[test]
    fn test_vertex_height_unrecognized_property() {
        let mut map = MapData::default();
        let s = add_triangle_sector(&mut map, [0.0, 0.0, 32.0]);

        // A rule-set that does not recognize zfloor on vertices.
        let config = GameConfig::from_json("{ \"port\": \"zdoom\" }").unwrap();
        process_slopes(&mut map, &config);
        assert_eq!(map.sectors[s].floor_plane, Plane::flat(0.0));
    }

    #[test]
    fn test_vertex_height_ignores_non_triangles() {
        let mut map = MapData::default();
        let (s, vertices, _) =
            add_rect_sector(&mut map, 0.0, 0.0, 64.0, 64.0, Sector::new(0.0, 128.0, 0));
        for v in vertices {
            map.vertices[v].properties.insert("zfloor", UdmfValue::Float(32.0));
        }

        process_slopes(&mut map, &GameConfig::default());
        assert_eq!(map.sectors[s].floor_plane, Plane::flat(0.0));
    }

    #[test]
    fn test_plane_copy_share_bits() {
        // share = 0b0110: floor bits = 10 (back to front), ceiling bits =
        // 01 (front to back).
        let mut map = MapData::default();
        let f = map.add_sector(Sector::new(0.0, 128.0, 0));
        let b = map.add_sector(Sector::new(64.0, 256.0, 0));
        let v0 = map.add_vertex(Vertex::new(0.0, 0.0));
        let v1 = map.add_vertex(Vertex::new(64.0, 0.0));
        map.add_line(
            Line::new(v0, v1, Some(f), Some(b)).with_special(PLANE_COPY, [0, 0, 0, 0, 6]),
        );

        process_slopes(&mut map, &GameConfig::default());

        assert_eq!(map.sectors[f].floor_plane, Plane::flat(64.0));
        assert_eq!(map.sectors[b].ceiling_plane, Plane::flat(128.0));
        // The other two planes keep their own heights.
        assert_eq!(map.sectors[f].ceiling_plane, Plane::flat(128.0));
        assert_eq!(map.sectors[b].floor_plane, Plane::flat(64.0));
    }

    #[test]
    fn test_plane_copy_share_zero_is_noop() {
        let mut map = MapData::default();
        let f = map.add_sector(Sector::new(0.0, 128.0, 0));
        let b = map.add_sector(Sector::new(64.0, 256.0, 0));
        let v0 = map.add_vertex(Vertex::new(0.0, 0.0));
        let v1 = map.add_vertex(Vertex::new(64.0, 0.0));
        map.add_line(
            Line::new(v0, v1, Some(f), Some(b)).with_special(PLANE_COPY, [0, 0, 0, 0, 0]),
        );

        process_slopes(&mut map, &GameConfig::default());
        assert_eq!(map.sectors[f].floor_plane, Plane::flat(0.0));
        assert_eq!(map.sectors[b].floor_plane, Plane::flat(64.0));
    }

    #[test]
    fn test_plane_copy_runs_after_vertex_heights() {
        // A Plane_Copy line propagates a slope created by the vertex
        // height pass in the same run.
        let mut map = MapData::default();
        let sloped = add_triangle_sector(&mut map, [0.0, 0.0, 32.0]);
        let flat = map.add_sector(Sector::new(0.0, 128.0, 0));
        // Share an existing edge so the triangle keeps exactly three
        // vertices for the vertex height pass.
        map.add_line(
            Line::new(0, 1, Some(sloped), Some(flat)).with_special(PLANE_COPY, [0, 0, 0, 0, 1]),
        );

        process_slopes(&mut map, &GameConfig::default());
        assert_eq!(map.sectors[flat].floor_plane, map.sectors[sloped].floor_plane);
        assert_ne!(map.sectors[flat].floor_plane, Plane::flat(0.0));
    }
}
