//! Point generation by recursive icosahedron subdivision, plus deduplication.

use engine_core::SpatialHash;
use glam::Vec3;

const PHI: f32 = 1.618_034; // golden ratio

/// Corners of the unit icosahedron. Their order fixes the pentagon ids 0..11.
pub fn icosahedron_vertices() -> [Vec3; 12] {
    [
        Vec3::new(-1.0, PHI, 0.0).normalize(),
        Vec3::new(1.0, PHI, 0.0).normalize(),
        Vec3::new(-1.0, -PHI, 0.0).normalize(),
        Vec3::new(1.0, -PHI, 0.0).normalize(),
        Vec3::new(0.0, -1.0, PHI).normalize(),
        Vec3::new(0.0, 1.0, PHI).normalize(),
        Vec3::new(0.0, -1.0, -PHI).normalize(),
        Vec3::new(0.0, 1.0, -PHI).normalize(),
        Vec3::new(PHI, 0.0, -1.0).normalize(),
        Vec3::new(PHI, 0.0, 1.0).normalize(),
        Vec3::new(-PHI, 0.0, -1.0).normalize(),
        Vec3::new(-PHI, 0.0, 1.0).normalize(),
    ]
}

/// The 20 triangular faces, as indices into [`icosahedron_vertices`].
pub const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// Closed-form tile count for subdivision depth `n`:
/// `12 + 30·(2^n − 1) + 20·(2^n − 1)·(2^(n−1) − 1)`.
pub fn expected_tile_count(n: u32) -> usize {
    let side = 1usize << n;
    let half = side / 2;
    12 + 30 * (side - 1) + 20 * (side - 1) * (half.saturating_sub(1))
}

/// Every corner of every leaf triangle after `depth` 1→4 splits of each face,
/// scaled onto the sphere of `radius`. Shared corners appear once per face
/// that touches them; see [`dedup`].
pub fn generate_points(depth: u32, radius: f32) -> Vec<Vec3> {
    let verts = icosahedron_vertices();
    let mut out = Vec::with_capacity(20 * 3 * 4usize.pow(depth));
    for face in ICOSAHEDRON_FACES {
        subdivide(verts[face[0]], verts[face[1]], verts[face[2]], depth, &mut out);
    }
    for p in &mut out {
        *p *= radius;
    }
    out
}

fn subdivide(a: Vec3, b: Vec3, c: Vec3, depth: u32, out: &mut Vec<Vec3>) {
    if depth == 0 {
        out.extend_from_slice(&[a, b, c]);
        return;
    }
    let ab = ((a + b) * 0.5).normalize();
    let bc = ((b + c) * 0.5).normalize();
    let ca = ((c + a) * 0.5).normalize();
    subdivide(a, ab, ca, depth - 1, out);
    subdivide(b, bc, ab, depth - 1, out);
    subdivide(c, ca, bc, depth - 1, out);
    subdivide(ab, bc, ca, depth - 1, out);
}

/// Collapse points closer than `epsilon` into the first one seen,
/// preserving generation order.
pub fn dedup(points: &[Vec3], epsilon: f32) -> Vec<Vec3> {
    let mut hash = SpatialHash::new(epsilon);
    let mut unique: Vec<Vec3> = Vec::new();
    for &p in points {
        let seen = hash
            .candidates(p, epsilon)
            .into_iter()
            .any(|i| unique[i].distance(p) < epsilon);
        if !seen {
            hash.insert(p, unique.len());
            unique.push(p);
        }
    }
    unique
}
