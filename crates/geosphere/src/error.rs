//! Topology construction errors.
//!
//! Every variant is a configuration error: the lattice parameters are
//! inconsistent and the arena cannot be built on top of the result.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TopologyError {
    #[error("invalid topology parameters: {0}")]
    InvalidParams(String),

    #[error("deduplicated point count {found} does not match the closed form {expected} for N={subdivisions}")]
    TileCountMismatch {
        subdivisions: u32,
        expected: usize,
        found: usize,
    },

    #[error("expected 12 pentagon centres, matched {found}")]
    PentagonCountMismatch { found: usize },

    #[error("expected 30 pentagon-pair planes, found {found}")]
    PlaneCountMismatch { found: usize },

    #[error("degree {degree} band holds {found} tiles, expected {expected}")]
    DegreeBandMismatch {
        degree: u32,
        expected: usize,
        found: usize,
    },

    #[error("tile {tile} has {found} neighbour candidates, needs {expected}")]
    TooFewNeighbors {
        tile: usize,
        expected: usize,
        found: usize,
    },

    #[error("neighbour lists are not symmetric: {a} lists {b} but not the reverse")]
    AsymmetricNeighbors { a: usize, b: usize },

    #[error("tile {tile} has no already-oriented neighbour to align to")]
    OrientationOrphan { tile: usize },
}
