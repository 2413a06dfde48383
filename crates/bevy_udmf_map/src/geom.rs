//! Geometry kernel: planes, plane fitting and 2D line classification.
//!
//! All coordinates are f64. Map geometry is 2D; the third axis only appears
//! in the fitted floor/ceiling planes.

use bevy::math::{DVec2, DVec3};

/// Cross products below this magnitude are treated as collinear input.
const COLLINEAR_EPSILON: f64 = 1e-9;

/// An oriented plane in 3-space, stored as `a*x + b*y + c*z = d` with the
/// normal `(a, b, c)` normalized and pointing upward (`c >= 0`).
///
/// Planes are immutable derived state: the slope solver replaces them
/// wholesale, it never mutates them in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Plane {
    /// A horizontal plane at `height`.
    pub fn flat(height: f64) -> Self {
        Self {
            a: 0.0,
            b: 0.0,
            c: 1.0,
            d: height,
        }
    }

    /// Height of the plane above the given 2D point.
    pub fn height_at(&self, point: DVec2) -> f64 {
        (self.d - self.a * point.x - self.b * point.y) / self.c
    }

    /// The plane normal.
    pub fn normal(&self) -> DVec3 {
        DVec3::new(self.a, self.b, self.c)
    }
}

/// Fit a plane through three points.
///
/// Returns `None` when the points are collinear or the resulting plane is
/// vertical (no well-defined height function). Callers are expected to guard
/// against degenerate input and skip the affected entity.
pub fn plane_from_triangle(p1: DVec3, p2: DVec3, p3: DVec3) -> Option<Plane> {
    let cross = (p2 - p1).cross(p3 - p1);
    if cross.length_squared() < COLLINEAR_EPSILON {
        return None;
    }

    let mut normal = cross.normalize();
    if normal.z < 0.0 {
        normal = -normal;
    }
    if normal.z < COLLINEAR_EPSILON {
        // Vertical plane: height_at would divide by zero.
        return None;
    }

    Some(Plane {
        a: normal.x,
        b: normal.y,
        c: normal.z,
        d: normal.dot(p1),
    })
}

/// Which side of the directed line `a -> b` the point lies on.
///
/// Positive means the right side (the front side of a map line), negative the
/// left (back) side, zero exactly on the line.
pub fn line_side(point: DVec2, a: DVec2, b: DVec2) -> f64 {
    (point.x - a.x) * (b.y - a.y) - (point.y - a.y) * (b.x - a.x)
}

/// Shortest distance from `point` to the segment `a -> b`.
pub fn distance_to_segment(point: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let length_squared = ab.length_squared();
    if length_squared < COLLINEAR_EPSILON {
        return (point - a).length();
    }
    let t = ((point - a).dot(ab) / length_squared).clamp(0.0, 1.0);
    (point - (a + ab * t)).length()
}
