//! Uniform-grid spatial hash for point proximity queries.

use glam::{IVec3, Vec3};
use std::collections::HashMap;

/// Buckets point indices into cubic cells so radius queries only touch nearby cells.
#[derive(Debug, Clone)]
pub struct SpatialHash {
    cell_size: f32,
    cells: HashMap<IVec3, Vec<usize>>,
}

impl SpatialHash {
    /// Create an empty hash. Queries are cheapest when `cell_size` is close to the query radius.
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size: cell_size.max(f32::EPSILON),
            cells: HashMap::new(),
        }
    }

    fn cell_of(&self, p: Vec3) -> IVec3 {
        (p / self.cell_size).floor().as_ivec3()
    }

    /// Insert index `id` at position `p`.
    pub fn insert(&mut self, p: Vec3, id: usize) {
        let cell = self.cell_of(p);
        self.cells.entry(cell).or_default().push(id);
    }

    /// Indices stored in every cell overlapping the cube of half-size `radius`
    /// around `p`, in ascending order. Callers still filter by exact distance.
    pub fn candidates(&self, p: Vec3, radius: f32) -> Vec<usize> {
        let min = self.cell_of(p - Vec3::splat(radius));
        let max = self.cell_of(p + Vec3::splat(radius));
        let mut out = Vec::new();
        for x in min.x..=max.x {
            for y in min.y..=max.y {
                for z in min.z..=max.z {
                    if let Some(ids) = self.cells.get(&IVec3::new(x, y, z)) {
                        out.extend_from_slice(ids);
                    }
                }
            }
        }
        out.sort_unstable();
        out
    }

    /// Number of stored points.
    pub fn len(&self) -> usize {
        self.cells.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidates_include_neighbouring_cells() {
        let mut hash = SpatialHash::new(1.0);
        hash.insert(Vec3::new(0.95, 0.0, 0.0), 0);
        hash.insert(Vec3::new(1.05, 0.0, 0.0), 1);
        hash.insert(Vec3::new(10.0, 0.0, 0.0), 2);
        assert_eq!(hash.candidates(Vec3::new(1.0, 0.0, 0.0), 0.2), vec![0, 1]);
        assert_eq!(hash.len(), 3);
    }

    #[test]
    fn candidates_are_sorted() {
        let mut hash = SpatialHash::new(2.0);
        for (i, x) in [5.0_f32, -1.0, 0.5, 3.0].iter().enumerate() {
            hash.insert(Vec3::new(*x, 0.0, 0.0), 3 - i);
        }
        let found = hash.candidates(Vec3::ZERO, 6.0);
        assert_eq!(found, vec![0, 1, 2, 3]);
    }

    #[test]
    fn empty_hash() {
        let hash = SpatialHash::new(1.0);
        assert!(hash.is_empty());
        assert!(hash.candidates(Vec3::ZERO, 5.0).is_empty());
    }
}
