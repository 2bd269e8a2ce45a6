//! Orientation propagation: spin every tile about its up axis so one flat
//! edge faces an already-oriented neighbour.

use engine_core::{signed_angle, Transform};
use glam::Vec3;
use std::f32::consts::PI;

use crate::degree::DegreeRanges;
use crate::error::TopologyError;
use crate::params::Surface;
use crate::planes::PlaneTable;
use crate::tile::Tile;
use crate::PENTAGON_COUNT;

/// Align `target` to a tile centred at `source`.
///
/// With `c = source × target`, the target is rotated by `π − signed_angle(c, right, up)`
/// about its own up axis, which leaves its right axis on `-c`. On an interior
/// surface that puts the forward axis on the source.
pub fn align(source: Vec3, target: &mut Transform) {
    let c = source.cross(target.position);
    if c.length_squared() <= f32::EPSILON {
        return;
    }
    let angle = signed_angle(c, target.right(), target.up());
    target.rotate_about_up(PI - angle);
}

fn align_tile(tiles: &mut [Tile], source: usize, target: usize) {
    let from = tiles[source].position;
    let mut transform = tiles[target].transform();
    align(from, &mut transform);
    tiles[target].orientation = transform.rotation;
}

/// Orient every tile, assuming `tiles` is in builder order.
///
/// Pentagon 0 keeps the base frame. Other pentagons take the first oriented
/// pentagon they share a plane with, arc hexagons take the lower pentagon of
/// their arc, and interior hexagons take their first oriented neighbour of
/// strictly lower degree.
pub fn propagate(
    tiles: &mut [Tile],
    planes: &PlaneTable,
    ranges: &DegreeRanges,
    surface: Surface,
) -> Result<(), TopologyError> {
    for tile in tiles.iter_mut() {
        tile.orientation = Transform::on_surface(tile.position, surface.up_at(tile.position)).rotation;
    }
    if tiles.is_empty() {
        return Ok(());
    }

    let mut oriented = vec![false; tiles.len()];
    oriented[0] = true;

    let mut pending: Vec<usize> = (1..PENTAGON_COUNT.min(tiles.len())).collect();
    while !pending.is_empty() {
        let before = pending.len();
        pending.retain(|&p| match planes.adjacent_pentagons(p).into_iter().find(|&q| oriented[q]) {
            Some(q) => {
                align_tile(tiles, q, p);
                oriented[p] = true;
                false
            }
            None => true,
        });
        if pending.len() == before {
            return Err(TopologyError::OrientationOrphan { tile: pending[0] });
        }
    }

    for id in ranges.ids_of_degree(1) {
        let pentagon = tiles[id]
            .arc
            .and_then(|arc| planes.get(arc))
            .map(|entry| entry.a)
            .ok_or(TopologyError::OrientationOrphan { tile: id })?;
        align_tile(tiles, pentagon, id);
        oriented[id] = true;
    }

    for degree in 2..=ranges.max_degree() {
        for id in ranges.ids_of_degree(degree) {
            let source = tiles[id]
                .neighbors
                .iter()
                .map(|n| n.index())
                .find(|&n| oriented[n] && tiles[n].degree < degree)
                .ok_or(TopologyError::OrientationOrphan { tile: id })?;
            align_tile(tiles, source, id);
            oriented[id] = true;
        }
    }

    log::debug!("Oriented {} tiles", oriented.iter().filter(|o| **o).count());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_points_forward_at_source() {
        let target_pos = Vec3::new(0.0, 0.0, 10.0);
        let source = Vec3::new(2.0, 1.0, 9.7);
        let mut t = Transform::on_surface(target_pos, -target_pos);
        align(source, &mut t);

        let c = source.cross(target_pos).normalize();
        assert!(t.right().dot(-c) > 0.999);
        // Source, projected into the tile plane, lies straight ahead.
        let to_source = source - target_pos;
        let flat = (to_source - t.up() * to_source.dot(t.up())).normalize();
        assert!(t.forward().dot(flat) > 0.999);
        assert!(t.up().dot(-Vec3::Z) > 0.999);
    }

    #[test]
    fn align_is_independent_of_starting_spin() {
        let target_pos = Vec3::new(3.0, -4.0, 8.0);
        let source = Vec3::new(4.0, -3.0, 8.0);
        let mut a = Transform::on_surface(target_pos, target_pos);
        let mut b = a;
        b.rotate_about_up(1.234);
        align(source, &mut a);
        align(source, &mut b);
        assert!(a.right().dot(b.right()) > 0.9999);
        assert!(a.forward().dot(b.forward()) > 0.9999);
    }

    #[test]
    fn align_ignores_coincident_directions() {
        let mut t = Transform::on_surface(Vec3::Z * 5.0, Vec3::Z);
        let before = t;
        align(Vec3::Z * 2.0, &mut t);
        assert_eq!(t, before);
    }
}
