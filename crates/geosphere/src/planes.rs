//! Pentagon-pair plane table.
//!
//! One plane through the origin per icosahedron edge. A hexagon lying in one
//! of these planes, between its two pentagons, sits on the arc joining them.

use engine_core::OriginPlane;
use glam::Vec3;

use crate::error::TopologyError;

/// Number of pentagon-pair planes in any valid lattice.
pub const EXPECTED_PLANES: usize = 30;

/// Two adjacent pentagons and the plane through them and the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PentagonPlane {
    /// Lower pentagon id.
    pub a: usize,
    /// Higher pentagon id.
    pub b: usize,
    pub plane: OriginPlane,
}

impl PentagonPlane {
    pub fn contains_pentagon(&self, id: usize) -> bool {
        self.a == id || self.b == id
    }
}

#[derive(Debug, Clone)]
pub struct PlaneTable {
    pentagons: Vec<Vec3>,
    planes: Vec<PentagonPlane>,
    /// Distance between adjacent pentagons.
    spacing: f32,
    tolerance: f32,
}

impl PlaneTable {
    /// Record a plane for every pentagon pair closer than 1.02 × the smallest
    /// pentagon distance.
    pub fn build(pentagons: &[Vec3], tolerance: f32) -> Result<Self, TopologyError> {
        let mut spacing = f32::MAX;
        for (i, a) in pentagons.iter().enumerate() {
            for b in &pentagons[i + 1..] {
                spacing = spacing.min(a.distance(*b));
            }
        }

        let mut planes = Vec::with_capacity(EXPECTED_PLANES);
        for (i, a) in pentagons.iter().enumerate() {
            for (j, b) in pentagons.iter().enumerate().skip(i + 1) {
                if a.distance(*b) >= spacing * 1.02 {
                    continue;
                }
                if let Some(plane) = OriginPlane::through(*a, *b) {
                    planes.push(PentagonPlane { a: i, b: j, plane });
                }
            }
        }

        if planes.len() != EXPECTED_PLANES {
            return Err(TopologyError::PlaneCountMismatch {
                found: planes.len(),
            });
        }
        log::debug!("Plane table: {} planes, pentagon spacing {:.3}", planes.len(), spacing);

        Ok(Self {
            pentagons: pentagons.to_vec(),
            planes,
            spacing,
            tolerance,
        })
    }

    pub fn len(&self) -> usize {
        self.planes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PentagonPlane> {
        self.planes.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PentagonPlane> {
        self.planes.iter()
    }

    /// Distance between adjacent pentagons.
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// A plane qualifies for `p` when both of its pentagons are within
    /// pentagon spacing of `p`. This keeps the far side of each great circle
    /// (which cuts through unrelated faces) out of the picture.
    fn qualifies(&self, entry: &PentagonPlane, p: Vec3) -> bool {
        let reach = self.spacing + self.tolerance;
        p.distance(self.pentagons[entry.a]) <= reach && p.distance(self.pentagons[entry.b]) <= reach
    }

    /// Index of the plane whose arc `p` lies on, if any.
    pub fn arc_of(&self, p: Vec3) -> Option<usize> {
        self.planes
            .iter()
            .position(|entry| entry.plane.distance(p) < self.tolerance && self.qualifies(entry, p))
    }

    /// Distance from `p` to the nearest qualifying plane (`f32::MAX` when none qualifies).
    pub fn nearest_distance(&self, p: Vec3) -> f32 {
        self.planes
            .iter()
            .filter(|entry| self.qualifies(entry, p))
            .map(|entry| entry.plane.distance(p))
            .fold(f32::MAX, f32::min)
    }

    /// Pentagons sharing a plane with `pentagon`, ascending.
    pub fn adjacent_pentagons(&self, pentagon: usize) -> Vec<usize> {
        let mut out: Vec<usize> = self
            .planes
            .iter()
            .filter_map(|entry| {
                if entry.a == pentagon {
                    Some(entry.b)
                } else if entry.b == pentagon {
                    Some(entry.a)
                } else {
                    None
                }
            })
            .collect();
        out.sort_unstable();
        out
    }
}
