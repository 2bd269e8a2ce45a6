//! Closed-form id ranges for each degree band.
//!
//! After the builder's sort, tiles of one degree occupy a contiguous id range:
//! 12 pentagons, then `30·(2^N − 1)` arc hexagons, then `60·(2^N − 3(k−1))`
//! hexagons for every degree `k ≥ 2` while that count stays positive.

use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegreeRanges {
    /// `bands[d]` holds the ids of degree `d`.
    bands: Vec<Range<usize>>,
}

impl DegreeRanges {
    pub fn new(subdivisions: u32) -> Self {
        let side = 1i64 << subdivisions;
        let arc_end = 12 + 30 * (side as usize - 1);
        let mut bands = vec![0..12, 12..arc_end];
        let mut start = arc_end;
        for k in 2i64.. {
            let count = 60 * (side - 3 * (k - 1));
            if count <= 0 {
                break;
            }
            let end = start + count as usize;
            bands.push(start..end);
            start = end;
        }
        Self { bands }
    }

    /// Degree of tile `id`, or `None` past the last band.
    pub fn degree_of(&self, id: usize) -> Option<u32> {
        // Bands are sorted and contiguous, so the first band whose end exceeds id holds it.
        let idx = self.bands.partition_point(|band| band.end <= id);
        (idx < self.bands.len()).then_some(idx as u32)
    }

    /// All ids of degree `degree`; empty when there is no such band.
    pub fn ids_of_degree(&self, degree: u32) -> Range<usize> {
        self.bands.get(degree as usize).cloned().unwrap_or(0..0)
    }

    /// Number of tiles in band `degree`.
    pub fn count(&self, degree: u32) -> usize {
        self.ids_of_degree(degree).len()
    }

    pub fn max_degree(&self) -> u32 {
        self.bands.len() as u32 - 1
    }

    /// Total number of ids covered by all bands.
    pub fn total(&self) -> usize {
        self.bands.last().map_or(0, |band| band.end)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, Range<usize>)> + '_ {
        self.bands.iter().cloned().enumerate().map(|(d, r)| (d as u32, r))
    }
}
