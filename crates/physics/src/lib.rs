//! Tile colliders and ground queries using Rapier3D.

pub mod collision;
pub mod error;
pub mod raycast;
pub mod tile_world;

pub use collision::*;
pub use error::PhysicsError;
pub use raycast::*;
pub use tile_world::*;

// Re-export Rapier for downstream crates
pub use rapier3d;

pub use rapier3d::prelude::ColliderHandle;
