//! Neighbour inference from geometry alone.
//!
//! Subdivision does not keep a mesh graph, so adjacency is recovered by taking
//! the closest 5 (pentagon) or 6 (hexagon) tiles within the search radius.

use engine_core::SpatialHash;
use glam::Vec3;

use crate::error::TopologyError;
use crate::PENTAGON_COUNT;

/// Neighbour lists for `positions`, where the first [`PENTAGON_COUNT`] entries
/// are pentagons. Each list is sorted ascending.
pub fn infer_neighbors(positions: &[Vec3], search_radius: f32) -> Result<Vec<Vec<usize>>, TopologyError> {
    let mut hash = SpatialHash::new(search_radius);
    for (i, p) in positions.iter().enumerate() {
        hash.insert(*p, i);
    }

    let mut lists = Vec::with_capacity(positions.len());
    for (i, p) in positions.iter().enumerate() {
        let expected = if i < PENTAGON_COUNT { 5 } else { 6 };
        let mut candidates: Vec<(f32, usize)> = hash
            .candidates(*p, search_radius)
            .into_iter()
            .filter(|&j| j != i)
            .map(|j| (positions[j].distance(*p), j))
            .filter(|(d, _)| *d < search_radius)
            .collect();

        if candidates.len() < expected {
            log::error!(
                "Tile {} has only {} neighbour candidates within {:.3}",
                i,
                candidates.len(),
                search_radius
            );
            return Err(TopologyError::TooFewNeighbors {
                tile: i,
                expected,
                found: candidates.len(),
            });
        }

        candidates.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        let mut chosen: Vec<usize> = candidates[..expected].iter().map(|(_, j)| *j).collect();
        chosen.sort_unstable();
        lists.push(chosen);
    }

    check_symmetry(&lists)?;
    Ok(lists)
}

fn check_symmetry(lists: &[Vec<usize>]) -> Result<(), TopologyError> {
    for (a, list) in lists.iter().enumerate() {
        for &b in list {
            if lists[b].binary_search(&a).is_err() {
                return Err(TopologyError::AsymmetricNeighbors { a, b });
            }
        }
    }
    Ok(())
}
