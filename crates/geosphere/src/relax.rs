//! Laplacian relaxation of tile centres to even out subdivision clustering.

use engine_core::project_to_sphere;
use glam::Vec3;

use crate::planes::PlaneTable;
use crate::PENTAGON_COUNT;

/// Neighbours a tile may average over. Arc hexagons only follow their own arc
/// (its pentagon endpoints and fellow arc tiles) so they never leave it.
fn partners(
    id: usize,
    neighbors: &[Vec<usize>],
    degrees: &[u32],
    arcs: &[Option<usize>],
    planes: &PlaneTable,
) -> Vec<usize> {
    if degrees[id] > 1 || id < PENTAGON_COUNT {
        return neighbors[id].clone();
    }
    let Some(arc) = arcs[id] else {
        return Vec::new();
    };
    let Some(entry) = planes.get(arc) else {
        return Vec::new();
    };
    neighbors[id]
        .iter()
        .copied()
        .filter(|&j| {
            if j < PENTAGON_COUNT {
                entry.contains_pentagon(j)
            } else {
                degrees[j] == 1 && arcs[j] == Some(arc)
            }
        })
        .collect()
}

fn average(positions: &[Vec3], ids: &[usize], radius: f32) -> Option<Vec3> {
    if ids.is_empty() {
        return None;
    }
    let sum: Vec3 = ids.iter().map(|&j| positions[j]).sum();
    Some(project_to_sphere(sum / ids.len() as f32, radius))
}

/// Run `passes` Jacobi sweeps over every hexagon, then one sweep over the pentagons.
pub fn relax(
    positions: &mut [Vec3],
    neighbors: &[Vec<usize>],
    degrees: &[u32],
    arcs: &[Option<usize>],
    planes: &PlaneTable,
    radius: f32,
    passes: u32,
) {
    let subsets: Vec<Vec<usize>> = (0..positions.len())
        .map(|id| partners(id, neighbors, degrees, arcs, planes))
        .collect();

    for _ in 0..passes {
        let previous = positions.to_vec();
        for id in PENTAGON_COUNT..positions.len() {
            if let Some(p) = average(&previous, &subsets[id], radius) {
                positions[id] = p;
            }
        }
    }

    let previous = positions.to_vec();
    for id in 0..PENTAGON_COUNT.min(positions.len()) {
        if let Some(p) = average(&previous, &subsets[id], radius) {
            positions[id] = p;
        }
    }
}
