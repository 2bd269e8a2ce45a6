use geosphere::TileId;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PhysicsError {
    #[error("tile {0} has a degenerate collision hull")]
    DegenerateHull(TileId),
    #[error("tile {0} has no collider")]
    MissingCollider(TileId),
}
