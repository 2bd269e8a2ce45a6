//! Ray queries against tile columns: ground probes and weapon hits.

use crate::collision::CollisionGroup;
use crate::TileWorld;
use geosphere::TileId;
use glam::Vec3;
use rapier3d::prelude::*;

/// Result of a ray query that landed on a tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileHit {
    pub tile: TileId,
    /// Distance along the ray to the hit point.
    pub distance: f32,
    /// World position of the hit.
    pub point: Vec3,
    /// Surface normal at the hit point.
    pub normal: Vec3,
}

impl TileWorld {
    fn cast(&self, origin: Vec3, direction: Vec3, max_distance: f32, groups: InteractionGroups) -> Option<TileHit> {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }
        let ray = Ray::new(
            point![origin.x, origin.y, origin.z],
            vector![direction.x, direction.y, direction.z],
        );
        let filter = QueryFilter::default().groups(groups);

        self.query_pipeline
            .cast_ray_and_get_normal(
                &self.rigid_body_set,
                &self.collider_set,
                &ray,
                max_distance,
                true,
                filter,
            )
            .and_then(|(collider, intersection)| {
                let tile = self.tile_of(collider)?;
                let point = ray.point_at(intersection.time_of_impact);
                Some(TileHit {
                    tile,
                    distance: intersection.time_of_impact,
                    point: Vec3::new(point.x, point.y, point.z),
                    normal: Vec3::new(
                        intersection.normal.x,
                        intersection.normal.y,
                        intersection.normal.z,
                    ),
                })
            })
    }

    /// Tile below a body: a ray from `position` along `down`, at most `max_distance` long.
    pub fn ground_probe(&self, position: Vec3, down: Vec3, max_distance: f32) -> Option<TileHit> {
        self.cast(position, down, max_distance, CollisionGroup::occupant())
    }

    /// Whether a body at `position` with feet `foot_offset` below it stands on `tile`,
    /// allowing `tolerance` of air between feet and the top face.
    pub fn is_body_grounded_on_tile(
        &self,
        position: Vec3,
        down: Vec3,
        foot_offset: f32,
        tolerance: f32,
        tile: TileId,
    ) -> bool {
        self.ground_probe(position, down, foot_offset + tolerance)
            .is_some_and(|hit| hit.tile == tile)
    }

    /// First tile a weapon ray hits.
    pub fn raycast_tile(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<TileHit> {
        self.cast(origin, direction, max_distance, CollisionGroup::projectile())
    }
}
