use geosphere::{
    expected_tile_count, Surface, TileId, Topology, TopologyBuilder, TopologyParams, PENTAGON_COUNT,
};
use glam::Vec3;

fn build(radius: f32, n: u32) -> Topology {
    TopologyBuilder::new(TopologyParams::new(radius, n))
        .build()
        .expect("lattice should build")
}

#[test]
fn tile_count_matches_closed_form() {
    for n in 1..=4 {
        let topo = build(70.0, n);
        assert_eq!(topo.len(), expected_tile_count(n), "N={n}");
        let pentagons: Vec<usize> = topo
            .tiles()
            .iter()
            .filter(|t| t.is_pentagon)
            .map(|t| t.id.index())
            .collect();
        assert_eq!(pentagons, (0..PENTAGON_COUNT).collect::<Vec<_>>());
    }
}

#[test]
fn ids_match_positions_in_tile_array() {
    let topo = build(70.0, 2);
    for (i, tile) in topo.tiles().iter().enumerate() {
        assert_eq!(tile.id, TileId::from(i));
    }
}

#[test]
fn neighbors_are_symmetric_and_sized() {
    for n in 1..=4 {
        let topo = build(70.0, n);
        let adjacency = topo.adjacency();
        for tile in topo.tiles() {
            assert_eq!(tile.neighbors.len(), tile.expected_neighbor_count(), "tile {} N={n}", tile.id);
            assert!(!tile.is_neighbor(tile.id));
            assert_eq!(topo.neighbors(tile.id), tile.neighbors.as_slice());
            for other in &tile.neighbors {
                assert!(adjacency[other.index()].contains(&tile.id));
                assert!(topo.tile(*other).is_some_and(|t| t.is_neighbor(tile.id)));
            }
        }
    }
}

#[test]
fn plane_table_always_has_thirty_entries() {
    for (radius, n) in [(1.0, 1), (70.0, 2), (70.0, 3), (250.0, 4), (12.5, 3)] {
        assert_eq!(build(radius, n).planes().len(), 30);
    }
}

#[test]
fn degree_bands_partition_tile_ids() {
    for n in 1..=4 {
        let topo = build(70.0, n);
        let ranges = topo.degree_ranges();
        let mut covered = vec![0u32; topo.len()];
        let mut expected_start = 0;
        for d in 0..=ranges.max_degree() {
            let ids: Vec<TileId> = topo.ids_of_degree(d).collect();
            assert!(!ids.is_empty());
            assert_eq!(ids[0].index(), expected_start, "band {d} not contiguous");
            for w in ids.windows(2) {
                assert_eq!(w[1].index(), w[0].index() + 1);
            }
            for id in &ids {
                covered[id.index()] += 1;
                assert_eq!(topo.tile(*id).map(|t| t.degree), Some(d));
            }
            expected_start = ids[ids.len() - 1].index() + 1;
        }
        assert!(covered.iter().all(|c| *c == 1));
    }
}

#[test]
fn interior_tiles_touch_a_lower_degree_band() {
    let topo = build(70.0, 4);
    for tile in topo.tiles().iter().filter(|t| t.degree >= 2) {
        let lower = tile
            .neighbors
            .iter()
            .filter_map(|id| topo.tile(*id))
            .any(|n| n.degree + 1 == tile.degree);
        assert!(lower, "tile {} of degree {} has no neighbour one band lower", tile.id, tile.degree);
    }
}

#[test]
fn radius_seventy_depth_three_scenario() {
    let topo = build(70.0, 3);
    let summary = topo.summary();
    assert_eq!(summary.tiles, 642);
    assert_eq!(summary.pentagons, 12);
    assert_eq!(summary.planes, 30);
    assert_eq!(summary.per_degree, vec![12, 210, 300, 120]);
    let max_degree = topo.tiles().iter().map(|t| t.degree).max();
    assert_eq!(max_degree, Some((8 / 3) + 1));
}

#[test]
fn relaxed_tiles_stay_on_sphere_and_arcs() {
    let topo = build(70.0, 3);
    for tile in topo.tiles() {
        assert!((tile.position.length() - 70.0).abs() < 1e-3);
    }
    for id in topo.ids_of_degree(1) {
        let tile = topo.tile(id).unwrap();
        let entry = topo.planes().get(tile.arc.unwrap()).unwrap();
        assert!(entry.plane.distance(tile.position) < 1e-2);
    }
}

#[test]
fn orientation_frames_follow_the_surface() {
    let topo = build(70.0, 3);
    for tile in topo.tiles() {
        let inward = -tile.position.normalize();
        assert!(tile.up().dot(inward) > 0.999, "tile {}", tile.id);
    }

    let mut params = TopologyParams::new(70.0, 2);
    params.surface = Surface::Exterior;
    let outside = TopologyBuilder::new(params).build().unwrap();
    for tile in outside.tiles() {
        assert!(tile.up().dot(tile.position.normalize()) > 0.999);
    }
}

#[test]
fn pentagons_face_an_adjacent_pentagon() {
    let topo = build(70.0, 3);
    let first = topo.tile(TileId(0)).unwrap();
    let base = engine_core::Transform::on_surface(first.position, -first.position.normalize());
    assert!(first.transform().right().dot(base.right()) > 0.9999);
    assert!(first.transform().forward().dot(base.forward()) > 0.9999);

    for p in 1..PENTAGON_COUNT {
        let tile = topo.tile(TileId(p as u32)).unwrap();
        assert!(tile.is_pentagon);
        let frame = tile.transform();
        let adjacent = topo.planes().adjacent_pentagons(p);
        assert_eq!(adjacent.len(), 5, "pentagon {p}");
        let facing = adjacent.iter().copied().find(|&q| {
            let source = topo.tile(TileId(q as u32)).unwrap().position;
            let c = source.cross(tile.position).normalize();
            let to_source = source - tile.position;
            let flat = (to_source - frame.up() * to_source.dot(frame.up())).normalize();
            frame.right().dot(-c) > 0.999 && frame.forward().dot(flat) > 0.999
        });
        assert!(facing.is_some(), "pentagon {p} faces none of {adjacent:?}");
    }
}

#[test]
fn arc_hexagons_align_with_their_arc() {
    let topo = build(70.0, 3);
    for id in topo.ids_of_degree(1) {
        let tile = topo.tile(id).unwrap();
        let normal = topo.planes().get(tile.arc.unwrap()).unwrap().plane.normal;
        let right = tile.transform().right();
        assert!(right.dot(normal).abs() > 0.999, "tile {} right axis off its arc normal", tile.id);
    }
}

#[test]
fn interior_hexagons_face_a_lower_degree_neighbor() {
    let topo = build(70.0, 3);
    for d in 2..=topo.degree_ranges().max_degree() {
        for id in topo.ids_of_degree(d) {
            let tile = topo.tile(id).unwrap();
            let t = tile.transform();
            let faces_lower = tile.neighbors.iter().filter_map(|n| topo.tile(*n)).any(|n| {
                let to = n.position - tile.position;
                let flat: Vec3 = (to - t.up() * to.dot(t.up())).normalize();
                n.degree < d && t.forward().dot(flat) > 0.999
            });
            assert!(faces_lower, "tile {} does not face a lower-degree neighbour", tile.id);
        }
    }
}

#[test]
fn builds_are_deterministic() {
    let a = build(70.0, 3);
    let b = build(70.0, 3);
    assert_eq!(a.tiles(), b.tiles());
}

#[test]
fn edge_lengths_follow_degree_multiplier() {
    let topo = build(70.0, 3);
    let params = topo.params();
    let base = params.base_edge_length();
    for tile in topo.tiles() {
        let expected = base * params.edges.degree_multiplier(tile.degree);
        assert!((tile.edge_length - expected).abs() < 1e-5);
    }
}
