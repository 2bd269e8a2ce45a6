//! The topology builder: points → tiles with degree, neighbours, orientation
//! and edge length.

use glam::Vec3;

use crate::degree::DegreeRanges;
use crate::error::TopologyError;
use crate::icosphere::{dedup, expected_tile_count, generate_points, icosahedron_vertices};
use crate::neighbors::infer_neighbors;
use crate::orientation::propagate;
use crate::params::{EdgeParams, TopologyParams};
use crate::planes::PlaneTable;
use crate::relax::relax;
use crate::tile::{Tile, TileId};
use crate::PENTAGON_COUNT;

/// Counts reported after a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopologySummary {
    pub tiles: usize,
    pub pentagons: usize,
    pub planes: usize,
    /// Tiles per degree, index = degree.
    pub per_degree: Vec<usize>,
}

/// A finished lattice. Immutable apart from [`Topology::rescale_edges`].
#[derive(Debug, Clone)]
pub struct Topology {
    params: TopologyParams,
    tiles: Vec<Tile>,
    planes: PlaneTable,
    ranges: DegreeRanges,
}

impl Topology {
    pub fn params(&self) -> &TopologyParams {
        &self.params
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn sphere_radius(&self) -> f32 {
        self.params.sphere_radius
    }

    pub fn planes(&self) -> &PlaneTable {
        &self.planes
    }

    pub fn degree_ranges(&self) -> &DegreeRanges {
        &self.ranges
    }

    /// Ids of every tile of `degree`, contiguous in builder order.
    pub fn ids_of_degree(&self, degree: u32) -> impl Iterator<Item = TileId> {
        self.ranges.ids_of_degree(degree).map(TileId::from)
    }

    pub fn neighbors(&self, id: TileId) -> &[TileId] {
        self.tile(id).map(|t| t.neighbors.as_slice()).unwrap_or(&[])
    }

    /// Adjacency table indexed by tile id.
    pub fn adjacency(&self) -> Vec<Vec<TileId>> {
        self.tiles.iter().map(|t| t.neighbors.clone()).collect()
    }

    /// Re-run only the edge-length pass with new shaping parameters.
    pub fn rescale_edges(&mut self, edges: EdgeParams) {
        self.params.edges = edges;
        assign_edge_lengths(&mut self.tiles, &self.params);
        log::debug!("Rescaled edge lengths: {:?}", edges);
    }

    pub fn summary(&self) -> TopologySummary {
        TopologySummary {
            tiles: self.tiles.len(),
            pentagons: self.tiles.iter().filter(|t| t.is_pentagon).count(),
            planes: self.planes.len(),
            per_degree: self.ranges.iter().map(|(_, r)| r.len()).collect(),
        }
    }
}

fn assign_edge_lengths(tiles: &mut [Tile], params: &TopologyParams) {
    let base = params.base_edge_length();
    for tile in tiles {
        tile.edge_length = base * params.edges.degree_multiplier(tile.degree);
    }
}

/// Builds a [`Topology`] from parameters.
pub struct TopologyBuilder {
    params: TopologyParams,
}

impl TopologyBuilder {
    pub fn new(params: TopologyParams) -> Self {
        Self { params }
    }

    pub fn build(self) -> Result<Topology, TopologyError> {
        let params = self.params;
        params.validate()?;
        let n = params.subdivisions;
        let radius = params.sphere_radius;
        let eps = params.epsilon();

        // 1-2: points, deduplicated in generation order
        let raw = generate_points(n, radius);
        let points = dedup(&raw, eps);
        let expected = expected_tile_count(n);
        if points.len() != expected {
            log::error!("Lattice N={} produced {} points, expected {}", n, points.len(), expected);
            return Err(TopologyError::TileCountMismatch {
                subdivisions: n,
                expected,
                found: points.len(),
            });
        }
        log::debug!("Generated {} raw points, {} unique", raw.len(), points.len());

        // 3: pentagons keep the icosahedron vertex order as their ids
        let centres: Vec<Vec3> = icosahedron_vertices().iter().map(|v| *v * radius).collect();
        let mut pentagons: Vec<Option<Vec3>> = vec![None; PENTAGON_COUNT];
        let mut hexagons: Vec<Vec3> = Vec::with_capacity(points.len());
        for p in points {
            match centres.iter().position(|c| c.distance(p) < eps) {
                Some(k) if pentagons[k].is_none() => pentagons[k] = Some(p),
                Some(_) => {
                    return Err(TopologyError::PentagonCountMismatch {
                        found: PENTAGON_COUNT + 1,
                    })
                }
                None => hexagons.push(p),
            }
        }
        let pentagons: Vec<Vec3> = pentagons.iter().flatten().copied().collect();
        if pentagons.len() != PENTAGON_COUNT {
            return Err(TopologyError::PentagonCountMismatch {
                found: pentagons.len(),
            });
        }

        // 6: plane table (needed by 4 and 5)
        let planes = PlaneTable::build(&pentagons, eps)?;

        // 4-5: arc hexagons, then the rest by distance to the nearest qualifying plane
        let mut arc_tiles: Vec<(Vec3, usize)> = Vec::new();
        let mut interior: Vec<(f32, Vec3)> = Vec::new();
        for p in hexagons {
            match planes.arc_of(p) {
                Some(arc) => arc_tiles.push((p, arc)),
                None => interior.push((planes.nearest_distance(p), p)),
            }
        }
        let ranges = DegreeRanges::new(n);
        if arc_tiles.len() != ranges.count(1) {
            return Err(TopologyError::DegreeBandMismatch {
                degree: 1,
                expected: ranges.count(1),
                found: arc_tiles.len(),
            });
        }
        // Stable: equal distances keep generation order.
        interior.sort_by(|a, b| a.0.total_cmp(&b.0));

        let ordered: Vec<(Vec3, Option<usize>)> = pentagons
            .iter()
            .map(|p| (*p, None))
            .chain(arc_tiles.iter().map(|(p, arc)| (*p, Some(*arc))))
            .chain(interior.iter().map(|(_, p)| (*p, None)))
            .collect();
        if ordered.len() != ranges.total() {
            return Err(TopologyError::TileCountMismatch {
                subdivisions: n,
                expected: ranges.total(),
                found: ordered.len(),
            });
        }

        let mut positions: Vec<Vec3> = ordered.iter().map(|(p, _)| *p).collect();
        let arcs: Vec<Option<usize>> = ordered.iter().map(|(_, a)| *a).collect();
        let degrees: Vec<u32> = (0..positions.len())
            .map(|id| ranges.degree_of(id).unwrap_or(ranges.max_degree()))
            .collect();

        // 7: adjacency
        let neighbors = infer_neighbors(&positions, params.neighbor_search_radius())?;

        // 9: relaxation, before orientation so frames match final positions
        relax(
            &mut positions,
            &neighbors,
            &degrees,
            &arcs,
            &planes,
            radius,
            params.relax_passes,
        );

        let mut tiles: Vec<Tile> = positions
            .iter()
            .enumerate()
            .map(|(id, p)| Tile {
                id: TileId::from(id),
                is_pentagon: id < PENTAGON_COUNT,
                position: *p,
                orientation: glam::Quat::IDENTITY,
                degree: degrees[id],
                edge_length: 0.0,
                neighbors: neighbors[id].iter().map(|&j| TileId::from(j)).collect(),
                arc: arcs[id],
            })
            .collect();

        // 8: orientation
        propagate(&mut tiles, &planes, &ranges, params.surface)?;

        // 10: edge lengths
        assign_edge_lengths(&mut tiles, &params);

        let topology = Topology {
            params,
            tiles,
            planes,
            ranges,
        };
        let summary = topology.summary();
        log::info!(
            "Built geosphere: R={} N={} -> {} tiles ({} pentagons), {} planes, degrees {:?}",
            radius,
            n,
            summary.tiles,
            summary.pentagons,
            summary.planes,
            summary.per_degree
        );
        Ok(topology)
    }
}
