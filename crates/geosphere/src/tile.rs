//! Static per-tile data produced by the topology builder.

use engine_core::Transform;
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::slots::PolygonShape;

/// Stable tile index. Pentagons are 0..11. This is the only thing a hit event
/// carries over the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub u32);

impl TileId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<usize> for TileId {
    fn from(index: usize) -> Self {
        Self(index as u32)
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One hexagon or pentagon cell of the lattice.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub id: TileId,
    pub is_pentagon: bool,
    /// Tile centre on the base sphere.
    pub position: Vec3,
    /// Local +Y is the surface up, local -Z faces the tile it was aligned to.
    pub orientation: Quat,
    /// 0 for pentagons, 1 on a pentagon-to-pentagon arc, growing toward face centres.
    pub degree: u32,
    pub edge_length: f32,
    /// Adjacent tile ids, ascending. 5 for pentagons, 6 for hexagons.
    pub neighbors: Vec<TileId>,
    /// For degree-1 hexagons, the plane-table index of their arc.
    pub arc: Option<usize>,
}

impl Tile {
    pub fn shape(&self) -> PolygonShape {
        if self.is_pentagon {
            PolygonShape::Pentagon
        } else {
            PolygonShape::Hexagon
        }
    }

    pub fn transform(&self) -> Transform {
        Transform::from_position_rotation(self.position, self.orientation)
    }

    /// Surface up at this tile (the direction its pillar extends).
    pub fn up(&self) -> Vec3 {
        self.orientation * Vec3::Y
    }

    pub fn expected_neighbor_count(&self) -> usize {
        self.shape().corners()
    }

    pub fn is_neighbor(&self, other: TileId) -> bool {
        self.neighbors.binary_search(&other).is_ok()
    }
}
