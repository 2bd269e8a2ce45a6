//! Static pillar colliders for every live tile of a geosphere.

use crate::collision::CollisionGroup;
use crate::error::PhysicsError;
use geosphere::slots::tile_vertices;
use geosphere::{Tile, TileId, Topology};
use glam::Vec3;
use rapier3d::prelude::*;

/// One convex column per tile, moved along the tile's up axis as its height changes.
///
/// Colliders have no parent body. The id of the tile each one belongs to is
/// stored in its `user_data`.
pub struct TileWorld {
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub island_manager: IslandManager,
    pub query_pipeline: QueryPipeline,
    handles: Vec<Option<ColliderHandle>>,
    /// Base position and up axis per tile.
    anchors: Vec<(Vec3, Vec3)>,
    column_depth: f32,
}

fn to_vector(v: Vec3) -> Vector<Real> {
    vector![v.x, v.y, v.z]
}

impl TileWorld {
    /// Build a column of `column_depth` for every tile, with its top face at
    /// `height_of(tile)` above the base sphere.
    pub fn new(
        topology: &Topology,
        column_depth: f32,
        height_of: impl Fn(TileId) -> f32,
    ) -> Result<Self, PhysicsError> {
        let mut world = Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            island_manager: IslandManager::new(),
            query_pipeline: QueryPipeline::new(),
            handles: Vec::with_capacity(topology.len()),
            anchors: Vec::with_capacity(topology.len()),
            column_depth,
        };
        for tile in topology.tiles() {
            let collider = column_collider(tile, column_depth, height_of(tile.id))?;
            world.handles.push(Some(world.collider_set.insert(collider)));
            world.anchors.push((tile.position, tile.up()));
        }
        world.update_query_pipeline();
        log::info!("Built {} tile colliders (column depth {:.2})", world.handles.len(), column_depth);
        Ok(world)
    }

    /// Update query pipeline for raycasting.
    pub fn update_query_pipeline(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    pub fn column_depth(&self) -> f32 {
        self.column_depth
    }

    pub fn collider(&self, id: TileId) -> Option<ColliderHandle> {
        self.handles.get(id.index()).copied().flatten()
    }

    pub fn live_colliders(&self) -> usize {
        self.handles.iter().flatten().count()
    }

    /// Tile id stored on a collider.
    pub fn tile_of(&self, handle: ColliderHandle) -> Option<TileId> {
        self.collider_set.get(handle).map(|c| TileId(c.user_data as u32))
    }

    /// Move a tile's top face to `height` above its base position.
    pub fn set_height(&mut self, id: TileId, height: f32) -> Result<(), PhysicsError> {
        let handle = self.collider(id).ok_or(PhysicsError::MissingCollider(id))?;
        let (base, up) = self.anchors[id.index()];
        let collider = self
            .collider_set
            .get_mut(handle)
            .ok_or(PhysicsError::MissingCollider(id))?;
        collider.set_translation(to_vector(base + up * height));
        Ok(())
    }

    /// Apply a batch of height changes and refresh the query pipeline once.
    pub fn sync_heights(&mut self, moved: &[(TileId, f32)]) {
        if moved.is_empty() {
            return;
        }
        for &(id, height) in moved {
            if let Err(e) = self.set_height(id, height) {
                log::debug!("Skipping height sync: {}", e);
            }
        }
        self.update_query_pipeline();
    }

    /// Remove a destroyed tile's collider. Removing twice is a no-op.
    pub fn remove_tile(&mut self, id: TileId) {
        let Some(handle) = self.handles.get_mut(id.index()).and_then(Option::take) else {
            return;
        };
        self.collider_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.rigid_body_set,
            true,
        );
        self.update_query_pipeline();
        log::debug!("Removed collider for tile {}", id);
    }
}

fn column_collider(tile: &Tile, depth: f32, height: f32) -> Result<Collider, PhysicsError> {
    // Corner rings only; the top centre lies inside the top face.
    let points: Vec<Point<Real>> = tile_vertices(tile, 0.0, depth)
        .into_iter()
        .filter(|v| *v != tile.position)
        .map(|v| {
            let local = v - tile.position;
            point![local.x, local.y, local.z]
        })
        .collect();
    let builder = ColliderBuilder::convex_hull(&points).ok_or(PhysicsError::DegenerateHull(tile.id))?;
    Ok(builder
        .translation(to_vector(tile.position + tile.up() * height))
        .user_data(tile.id.0 as u128)
        .collision_groups(CollisionGroup::tile())
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use geosphere::{TopologyBuilder, TopologyParams};

    fn world() -> (Topology, TileWorld) {
        let topology = TopologyBuilder::new(TopologyParams::new(20.0, 1)).build().unwrap();
        let world = TileWorld::new(&topology, 8.0, |_| 0.0).unwrap();
        (topology, world)
    }

    #[test]
    fn one_collider_per_tile_tagged_with_its_id() {
        let (topology, world) = world();
        assert_eq!(world.live_colliders(), topology.len());
        for tile in topology.tiles() {
            let handle = world.collider(tile.id).unwrap();
            assert_eq!(world.tile_of(handle), Some(tile.id));
        }
    }

    #[test]
    fn set_height_moves_the_column_along_up() {
        let (topology, mut world) = world();
        let tile = &topology.tiles()[3];
        world.set_height(tile.id, 2.5).unwrap();
        let handle = world.collider(tile.id).unwrap();
        let t = world.collider_set[handle].translation();
        let expected = tile.position + tile.up() * 2.5;
        assert!((Vec3::new(t.x, t.y, t.z) - expected).length() < 1e-4);
    }

    #[test]
    fn removed_tiles_lose_their_collider() {
        let (topology, mut world) = world();
        let id = topology.tiles()[7].id;
        world.remove_tile(id);
        world.remove_tile(id);
        assert_eq!(world.collider(id), None);
        assert_eq!(world.live_colliders(), topology.len() - 1);
        assert_eq!(world.set_height(id, 1.0), Err(PhysicsError::MissingCollider(id)));
    }
}
