use arena::{
    Arena, ArenaConfig, BodyProbe, HitEvent, HitKind, NoBodies, TileEvent, TileState,
};
use engine_core::BodyId;
use geosphere::{Surface, TileId, TopologyParams};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const DT: f32 = 1.0 / 60.0;

struct StandingOn {
    bodies: Vec<(BodyId, Vec3, Option<TileId>)>,
}

impl BodyProbe for StandingOn {
    fn bodies(&self) -> Vec<(BodyId, Vec3)> {
        self.bodies.iter().map(|(b, p, _)| (*b, *p)).collect()
    }

    fn grounded_tile(&self, body: BodyId) -> Option<TileId> {
        self.bodies.iter().find(|(b, _, _)| *b == body).and_then(|(_, _, t)| *t)
    }
}

fn arena(radius: f32, subdivisions: u32) -> Arena {
    let mut config = ArenaConfig::default();
    config.topology = TopologyParams::new(radius, subdivisions);
    Arena::new(&config).unwrap()
}

fn random_hits(rng: &mut StdRng, tiles: usize, count: usize) -> Vec<HitEvent> {
    (0..count)
        .map(|_| {
            let tile = TileId(rng.gen_range(0..tiles as u32));
            if rng.gen_bool(0.7) {
                HitEvent::extend(tile)
            } else {
                HitEvent::retract(tile)
            }
        })
        .collect()
}

#[test]
fn reference_hit_reaches_next_step_in_base_duration_with_one_launch() {
    let mut arena = arena(70.0, 3);
    assert_eq!(arena.topology().len(), 642);

    let id = TileId(100);
    arena.set_height(id, 0.3 * 70.0).unwrap();
    let tile = arena.tile(id).unwrap().clone();
    let standing = tile.position + tile.up() * 21.0;
    let bystander = arena.tile(TileId(200)).unwrap().position;
    let probe = StandingOn {
        bodies: vec![
            (BodyId(1), standing, Some(id)),
            (BodyId(2), bystander, Some(TileId(200))),
            (BodyId(3), Vec3::ZERO, None),
        ],
    };

    arena.on_tile_hit(HitEvent::extend(id));
    let mut impulses = Vec::new();
    let mut ticks = 0;
    loop {
        let out = arena.tick(DT, &probe);
        impulses.extend(out.impulses);
        ticks += 1;
        if arena.state(id) == Some(TileState::Resting) || ticks > 120 {
            break;
        }
    }

    // 0.5 s of base ease at 60 Hz.
    assert_eq!(ticks, 30);
    assert!((arena.height(id).unwrap() - 0.4 * 70.0).abs() < 1e-4);
    assert_eq!(impulses.len(), 1);
    let (body, impulse) = impulses[0];
    assert_eq!(body, BodyId(1));
    let expected = tile.up() * arena.limits().launch_multiplier * 7.0;
    assert!((impulse - expected).length() < 1e-2, "{impulse:?} vs {expected:?}");
}

#[test]
fn hit_at_max_locks_without_moving() {
    let mut arena = arena(70.0, 2);
    let id = TileId(30);
    let max = arena.limits().max_height;
    arena.set_height(id, max).unwrap();
    arena.queue_hit(HitEvent::extend(id));
    let out = arena.tick(DT, &NoBodies);
    assert!(out.events.contains(&TileEvent::Locked(id)));
    assert!(out.moved.iter().all(|(t, _)| *t != id));
    assert_eq!(arena.height(id), Some(max));
    assert_eq!(arena.state(id), Some(TileState::Locked));
}

#[test]
fn heights_stay_in_bounds_under_random_hits() {
    let mut arena = arena(40.0, 2);
    let limits = *arena.limits();
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..600 {
        let n = rng.gen_range(0..6);
        for hit in random_hits(&mut rng, arena.topology().len(), n) {
            arena.queue_hit(hit);
        }
        arena.tick(DT, &NoBodies);
        for (id, h) in arena.heights() {
            assert!(
                h >= limits.min_height && h <= limits.max_height,
                "tile {id} at {h} outside {}..{}",
                limits.min_height,
                limits.max_height
            );
        }
    }
}

#[test]
fn identical_hit_streams_give_identical_heights() {
    let mut a = arena(40.0, 2);
    let mut b = arena(40.0, 2);
    let mut rng = StdRng::seed_from_u64(1234);
    for _ in 0..400 {
        let n = rng.gen_range(0..4);
        for hit in random_hits(&mut rng, a.topology().len(), n) {
            a.queue_hit(hit);
            b.queue_hit(hit);
        }
        a.tick(DT, &NoBodies);
        b.tick(DT, &NoBodies);
    }
    let ha: Vec<u32> = a.heights().map(|(_, h)| h.to_bits()).collect();
    let hb: Vec<u32> = b.heights().map(|(_, h)| h.to_bits()).collect();
    assert_eq!(ha, hb);
}

#[test]
fn hit_log_replays_to_the_same_state() {
    let mut live = arena(40.0, 2);
    let mut rng = StdRng::seed_from_u64(99);
    let ticks = 300;
    for _ in 0..ticks {
        if rng.gen_bool(0.2) {
            let tile = TileId(rng.gen_range(0..live.topology().len() as u32));
            live.on_tile_hit(HitEvent::extend(tile));
        }
        live.tick(DT, &NoBodies);
    }

    let log = live.hit_log().clone();
    let mut replay = arena(40.0, 2);
    for tick in 0..ticks as u64 {
        for hit in log.hits_at(tick) {
            replay.queue_hit(hit);
        }
        replay.tick(DT, &NoBodies);
    }

    for ((_, a), (_, b)) in live.heights().zip(replay.heights()) {
        assert_eq!(a.to_bits(), b.to_bits());
    }
    assert_eq!(live.hit_log(), replay.hit_log());
}

#[test]
fn locked_tiles_never_change_again() {
    let mut arena = arena(40.0, 2);
    let id = TileId(50);
    for _ in 0..10 {
        arena.queue_hit(HitEvent::extend(id));
    }
    for _ in 0..120 {
        arena.tick(DT, &NoBodies);
    }
    assert_eq!(arena.state(id), Some(TileState::Locked));
    let locked_at = arena.height(id);

    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..900 {
        let kind = if rng.gen_bool(0.5) { HitKind::Extend } else { HitKind::Retract };
        arena.queue_hit(HitEvent { tile: id, kind });
        let out = arena.tick(DT, &NoBodies);
        assert!(out.moved.iter().all(|(t, _)| *t != id));
    }
    assert_eq!(arena.height(id), locked_at);
    assert_eq!(arena.state(id), Some(TileState::Locked));
}

#[test]
fn retracting_past_the_floor_destroys_once() {
    let mut arena = arena(40.0, 2);
    let id = TileId(12);
    // Initial height is one step above the floor: retract, settle, retract again.
    arena.queue_hit(HitEvent::retract(id));
    let mut destroyed = 0;
    for _ in 0..60 {
        destroyed += arena.tick(DT, &NoBodies).destroyed().count();
    }
    assert_eq!(arena.state(id), Some(TileState::Resting));
    assert_eq!(arena.height(id), Some(arena.limits().min_height));

    arena.queue_hit(HitEvent::retract(id));
    arena.queue_hit(HitEvent::retract(id));
    destroyed += arena.tick(DT, &NoBodies).destroyed().count();
    assert_eq!(destroyed, 1);
    assert!(!arena.is_live(id));
    assert_eq!(arena.state(id), Some(TileState::Destroyed));
}

#[test]
fn launch_skips_bodies_on_other_tiles() {
    let mut arena = arena(40.0, 2);
    let probe = StandingOn {
        bodies: vec![(BodyId(4), Vec3::new(0.0, -30.0, 0.0), Some(TileId(61)))],
    };
    arena.queue_hit(HitEvent::extend(TileId(60)));
    for _ in 0..30 {
        assert!(arena.tick(DT, &probe).impulses.is_empty());
    }
}

#[test]
fn launch_points_along_the_surface_up() {
    for surface in [Surface::Interior, Surface::Exterior] {
        let mut config = ArenaConfig::default();
        config.topology = TopologyParams::new(40.0, 2);
        config.topology.surface = surface;
        let mut arena = Arena::new(&config).unwrap();

        let id = TileId(30);
        let position = arena.tile(id).unwrap().position;
        let probe = StandingOn {
            bodies: vec![(BodyId(1), position, Some(id))],
        };
        arena.on_tile_hit(HitEvent::extend(id));
        let out = arena.tick(DT, &probe);
        assert_eq!(out.impulses.len(), 1);
        let outward = out.impulses[0].1.normalize().dot(position.normalize());
        match surface {
            Surface::Interior => assert!(outward < -0.999, "{surface:?}: {outward}"),
            Surface::Exterior => assert!(outward > 0.999, "{surface:?}: {outward}"),
        }
    }
}
