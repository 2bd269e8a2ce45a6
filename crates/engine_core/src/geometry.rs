//! Sphere geometry helpers shared by the topology builder and the arena.

use glam::Vec3;

/// Central angle between two adjacent icosahedron vertices (radians).
pub const ICOSAHEDRON_EDGE_ANGLE: f32 = 1.107_148_7; // atan(2)

/// A plane passing through the world origin, stored by its unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OriginPlane {
    pub normal: Vec3,
}

impl OriginPlane {
    /// Plane through the origin and the two points `a` and `b`.
    /// Returns `None` when the points are collinear with the origin.
    pub fn through(a: Vec3, b: Vec3) -> Option<Self> {
        let normal = a.cross(b);
        if normal.length_squared() <= f32::EPSILON {
            return None;
        }
        Some(Self {
            normal: normal.normalize(),
        })
    }

    /// Signed distance of `p` from the plane (positive on the normal side).
    #[inline]
    pub fn signed_distance(&self, p: Vec3) -> f32 {
        self.normal.dot(p)
    }

    /// Unsigned distance of `p` from the plane.
    #[inline]
    pub fn distance(&self, p: Vec3) -> f32 {
        self.signed_distance(p).abs()
    }
}

/// Signed angle in radians that rotates `from` onto `to` around `axis`
/// (counter-clockwise positive, right-hand rule). Both vectors are measured
/// in the plane perpendicular to `axis`.
pub fn signed_angle(from: Vec3, to: Vec3, axis: Vec3) -> f32 {
    let axis = axis.normalize_or_zero();
    let from = (from - axis * from.dot(axis)).normalize_or_zero();
    let to = (to - axis * to.dot(axis)).normalize_or_zero();
    axis.dot(from.cross(to)).atan2(from.dot(to))
}

/// Push `p` radially onto the sphere of the given radius centred at the origin.
#[inline]
pub fn project_to_sphere(p: Vec3, radius: f32) -> Vec3 {
    p.normalize_or_zero() * radius
}
