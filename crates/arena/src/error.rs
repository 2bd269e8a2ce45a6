use geosphere::{TileId, TopologyError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("topology build failed: {0}")]
    Topology(#[from] TopologyError),
    #[error("invalid arena config: {0}")]
    InvalidConfig(String),
    #[error("tile {id} does not exist (arena has {tiles} tiles)")]
    UnknownTile { id: TileId, tiles: usize },
}
