//! Semantic vertex slots for tile prisms.
//!
//! Each polygon shape has a fixed vertex layout, decided here rather than
//! recovered from an imported mesh:
//!
//! | index          | slot            |
//! |----------------|-----------------|
//! | 0              | `TopCenter`     |
//! | 1 ..= c        | `Top(0..c)`     |
//! | c+1 ..= 2c     | `Bottom(0..c)`  |
//!
//! where `c` is the corner count. Corners are numbered by increasing azimuth,
//! measured from local +X toward local +Z (see [`slot_azimuth`]). The layout puts a flat edge across
//! local -Z, the direction the builder aligns toward a tile's source neighbour.

use glam::Vec3;
use std::f32::consts::{PI, TAU};

use crate::tile::Tile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolygonShape {
    Pentagon,
    Hexagon,
}

impl PolygonShape {
    pub fn corners(self) -> usize {
        match self {
            PolygonShape::Pentagon => 5,
            PolygonShape::Hexagon => 6,
        }
    }

    /// Vertices in the prism layout.
    pub fn vertex_count(self) -> usize {
        1 + 2 * self.corners()
    }

    /// Centre-to-corner distance for a regular polygon of edge `edge`.
    pub fn circumradius(self, edge: f32) -> f32 {
        edge / (2.0 * (PI / self.corners() as f32).sin())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexSlot {
    TopCenter,
    Top(u8),
    Bottom(u8),
}

impl VertexSlot {
    /// Position of this slot in the vertex layout of `shape`.
    pub fn index(self, shape: PolygonShape) -> usize {
        let c = shape.corners();
        match self {
            VertexSlot::TopCenter => 0,
            VertexSlot::Top(i) => 1 + (i as usize % c),
            VertexSlot::Bottom(i) => 1 + c + (i as usize % c),
        }
    }

    /// Every slot of `shape`, in layout order.
    pub fn all(shape: PolygonShape) -> Vec<VertexSlot> {
        let c = shape.corners() as u8;
        std::iter::once(VertexSlot::TopCenter)
            .chain((0..c).map(VertexSlot::Top))
            .chain((0..c).map(VertexSlot::Bottom))
            .collect()
    }
}

/// Azimuth of corner `corner` from local +X toward local +Z.
///
/// Hexagon corners sit at multiples of 60°, so the edge between corners 4 and 5
/// spans 240°..300° and faces -Z. Pentagon corners start at 90° (+Z), which
/// leaves the edge between corners 2 and 3 (234°..306°) across -Z.
pub fn slot_azimuth(shape: PolygonShape, corner: usize) -> f32 {
    let c = shape.corners();
    let step = TAU / c as f32;
    let start = match shape {
        PolygonShape::Hexagon => 0.0,
        PolygonShape::Pentagon => PI * 0.5,
    };
    start + step * (corner % c) as f32
}

/// World-space prism vertices for `tile` raised by `height` along its up axis,
/// with a column of `depth` below the top face. Ordered by [`VertexSlot::index`].
pub fn tile_vertices(tile: &Tile, height: f32, depth: f32) -> Vec<Vec3> {
    let shape = tile.shape();
    let up = tile.up();
    let top = tile.position + up * height;
    let bottom = top - up * depth;
    let radius = shape.circumradius(tile.edge_length);

    let corner = |i: usize| {
        let a = slot_azimuth(shape, i);
        tile.orientation * Vec3::new(a.cos() * radius, 0.0, a.sin() * radius)
    };

    VertexSlot::all(shape)
        .into_iter()
        .map(|slot| match slot {
            VertexSlot::TopCenter => top,
            VertexSlot::Top(i) => top + corner(i as usize),
            VertexSlot::Bottom(i) => bottom + corner(i as usize),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::TileId;
    use glam::Quat;

    fn flat_tile(is_pentagon: bool) -> Tile {
        Tile {
            id: TileId(0),
            is_pentagon,
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            degree: if is_pentagon { 0 } else { 2 },
            edge_length: 2.0,
            neighbors: Vec::new(),
            arc: None,
        }
    }

    #[test]
    fn layout_indices_are_unique_and_dense() {
        for shape in [PolygonShape::Pentagon, PolygonShape::Hexagon] {
            let mut seen: Vec<usize> = VertexSlot::all(shape).iter().map(|s| s.index(shape)).collect();
            seen.sort_unstable();
            assert_eq!(seen, (0..shape.vertex_count()).collect::<Vec<_>>());
        }
    }

    #[test]
    fn hexagon_edges_match_edge_length() {
        let verts = tile_vertices(&flat_tile(false), 0.0, 1.0);
        for i in 0..6 {
            let a = verts[VertexSlot::Top(i).index(PolygonShape::Hexagon)];
            let b = verts[VertexSlot::Top(i + 1).index(PolygonShape::Hexagon)];
            assert!((a.distance(b) - 2.0).abs() < 1e-4);
        }
    }

    #[test]
    fn flat_edge_faces_negative_z() {
        for (shape, pentagon, (i, j)) in [
            (PolygonShape::Hexagon, false, (4u8, 5u8)),
            (PolygonShape::Pentagon, true, (2u8, 3u8)),
        ] {
            let verts = tile_vertices(&flat_tile(pentagon), 0.0, 1.0);
            let a = verts[VertexSlot::Top(i).index(shape)];
            let b = verts[VertexSlot::Top(j).index(shape)];
            assert!((a.z - b.z).abs() < 1e-4);
            assert!(a.z < 0.0);
            assert!((a.x + b.x).abs() < 1e-4);
        }
    }

    #[test]
    fn bottom_ring_sits_depth_below_top() {
        let verts = tile_vertices(&flat_tile(true), 3.0, 5.0);
        let shape = PolygonShape::Pentagon;
        assert_eq!(verts[VertexSlot::TopCenter.index(shape)], Vec3::new(0.0, 3.0, 0.0));
        let top = verts[VertexSlot::Top(1).index(shape)];
        let bottom = verts[VertexSlot::Bottom(1).index(shape)];
        assert!((top - bottom - Vec3::new(0.0, 5.0, 0.0)).length() < 1e-5);
    }
}
