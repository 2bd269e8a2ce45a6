//! Seeded bot gunfire: each bot occasionally fires a ray and the first tile it
//! hits becomes a [`HitEvent`].

use arena::{HitEvent, HitKind};
use engine_core::{Occupant, Transform};
use glam::Vec3;
use hecs::World;
use physics::TileWorld;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Weapon range in multiples of the sphere radius.
const RANGE_RADII: f32 = 2.5;
/// Eye height above the body origin.
const EYE_HEIGHT: f32 = 0.7;

pub struct Shooter {
    rng: StdRng,
    fire_rate: f32,
    retract_chance: f64,
    pub shots: u64,
    pub misses: u64,
}

impl Shooter {
    pub fn new(seed: u64, fire_rate: f32, retract_chance: f64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            fire_rate,
            retract_chance: retract_chance.clamp(0.0, 1.0),
            shots: 0,
            misses: 0,
        }
    }

    fn random_direction(&mut self) -> Vec3 {
        loop {
            let v = Vec3::new(
                self.rng.gen_range(-1.0..1.0),
                self.rng.gen_range(-1.0..1.0),
                self.rng.gen_range(-1.0..1.0),
            );
            let len2 = v.length_squared();
            if len2 > 1e-4 && len2 <= 1.0 {
                return v / len2.sqrt();
            }
        }
    }

    /// Roll for every bot and return the hits that landed on a tile this tick.
    pub fn fire(&mut self, world: &World, tiles: &TileWorld, sphere_radius: f32, dt: f32) -> Vec<HitEvent> {
        let chance = f64::from((self.fire_rate * dt).clamp(0.0, 1.0));
        let mut eyes: Vec<(u32, Vec3)> = world
            .query::<(&Occupant, &Transform)>()
            .iter()
            .map(|(_, (o, t))| (o.body.0, t.position + t.up() * EYE_HEIGHT))
            .collect();
        // Query order is not guaranteed stable; sort so the rng stream is.
        eyes.sort_by_key(|(id, _)| *id);

        let mut hits = Vec::new();
        for (_, eye) in eyes {
            if !self.rng.gen_bool(chance) {
                continue;
            }
            self.shots += 1;
            let direction = self.random_direction();
            let kind = if self.rng.gen_bool(self.retract_chance) {
                HitKind::Retract
            } else {
                HitKind::Extend
            };
            match tiles.raycast_tile(eye, direction, sphere_radius * RANGE_RADII) {
                Some(hit) => hits.push(HitEvent { tile: hit.tile, kind }),
                None => self.misses += 1,
            }
        }
        hits
    }
}
