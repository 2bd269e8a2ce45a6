//! Procedural geosphere: the hexagon/pentagon tiling of a subdivided icosahedron.
//!
//! [`TopologyBuilder::build`] turns a [`TopologyParams`] into an immutable
//! [`Topology`]: ordered tiles (pentagons first, then hexagons by degree band),
//! their neighbor lists, static orientations and edge lengths.

pub mod degree;
pub mod error;
pub mod icosphere;
pub mod neighbors;
pub mod orientation;
pub mod params;
pub mod planes;
pub mod relax;
pub mod slots;
pub mod tile;
pub mod topology;

pub use degree::DegreeRanges;
pub use error::TopologyError;
pub use icosphere::expected_tile_count;
pub use params::{EdgeParams, Surface, TopologyParams};
pub use planes::{PentagonPlane, PlaneTable};
pub use slots::{PolygonShape, VertexSlot};
pub use tile::{Tile, TileId};
pub use topology::{Topology, TopologyBuilder, TopologySummary};

/// Number of pentagons in every lattice (the icosahedron's vertices).
pub const PENTAGON_COUNT: usize = 12;
