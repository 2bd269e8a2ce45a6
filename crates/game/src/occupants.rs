//! Bots standing on the arena surface: spawning, gravity toward the tiles,
//! landing on pillar tops and taking launch impulses.

use arena::{Arena, BodyProbe};
use engine_core::{BodyId, Mass, Occupant, Transform, Velocity};
use geosphere::{Surface, TileId};
use glam::Vec3;
use hecs::World;
use physics::TileWorld;
use rand::Rng;

/// Pull toward the surface, in units per second squared.
pub const GRAVITY: f32 = 20.0;
/// Air allowed between feet and a pillar top while still counting as grounded.
pub const GROUND_TOLERANCE: f32 = 0.1;

/// Place a body on `tile`, feet on its current top face.
pub fn spawn_on_tile(world: &mut World, arena: &Arena, tile: TileId, body: BodyId, foot_offset: f32) {
    let Some(t) = arena.tile(tile) else {
        return;
    };
    let height = arena.height(tile).unwrap_or(0.0);
    let up = t.up();
    let position = t.position + up * (height + foot_offset);
    world.spawn((
        Transform::on_surface(position, up),
        Velocity::default(),
        Mass::default(),
        Occupant { body, foot_offset },
    ));
}

/// Drop `count` bots on random live tiles.
pub fn spawn_bots(world: &mut World, arena: &Arena, count: u32, foot_offset: f32, rng: &mut impl Rng) {
    let tiles = arena.topology().len() as u32;
    for i in 0..count {
        let tile = TileId(rng.gen_range(0..tiles));
        spawn_on_tile(world, arena, tile, BodyId(i), foot_offset);
    }
    log::info!("Spawned {} bots", count);
}

/// Add each impulse to its body's velocity. Unknown bodies are skipped.
pub fn apply_impulses(world: &mut World, impulses: &[(BodyId, Vec3)]) {
    if impulses.is_empty() {
        return;
    }
    for (_, (occupant, velocity, mass)) in world.query_mut::<(&Occupant, &mut Velocity, &Mass)>() {
        for (_, impulse) in impulses.iter().filter(|(b, _)| *b == occupant.body) {
            velocity.apply_impulse(*impulse, mass);
        }
    }
}

/// Integrate gravity and motion, then land bodies on whatever pillar is under them.
/// Returns the bodies that fell out of the arena.
pub fn integrate(world: &mut World, tiles: &TileWorld, surface: Surface, sphere_radius: f32, dt: f32) -> Vec<BodyId> {
    let mut lost = Vec::new();
    for (_, (transform, velocity, occupant)) in
        world.query_mut::<(&mut Transform, &mut Velocity, &Occupant)>()
    {
        let up = surface.up_at(transform.position);
        velocity.linear -= up * GRAVITY * dt;
        transform.position += velocity.linear * dt;

        let up = surface.up_at(transform.position);
        let falling = velocity.linear.dot(up) <= 0.0;
        if falling {
            if let Some(hit) = tiles.ground_probe(transform.position, -up, occupant.foot_offset) {
                transform.position = hit.point + up * occupant.foot_offset;
                velocity.linear -= up * velocity.linear.dot(up);
                velocity.linear *= 0.9; // friction
            }
        }
        *transform = Transform::on_surface(transform.position, up);

        let r = transform.position.length();
        let outside = match surface {
            Surface::Interior => r > sphere_radius * 1.5,
            Surface::Exterior => r < sphere_radius * 0.5 || r > sphere_radius * 3.0,
        };
        if outside {
            lost.push(occupant.body);
        }
    }
    lost
}

/// Put a lost body back on a random live tile with no velocity.
pub fn respawn(world: &mut World, arena: &Arena, body: BodyId, rng: &mut impl Rng) {
    let tiles = arena.topology().len() as u32;
    let tile = (0..16)
        .map(|_| TileId(rng.gen_range(0..tiles)))
        .find(|t| arena.is_live(*t));
    let Some(tile) = tile else {
        log::warn!("No live tile to respawn body {:?} on", body);
        return;
    };
    let Some(t) = arena.tile(tile) else {
        return;
    };
    let up = t.up();
    let height = arena.height(tile).unwrap_or(0.0);
    for (_, (transform, velocity, occupant)) in
        world.query_mut::<(&mut Transform, &mut Velocity, &Occupant)>()
    {
        if occupant.body == body {
            *transform = Transform::on_surface(t.position + up * (height + occupant.foot_offset), up);
            *velocity = Velocity::default();
        }
    }
    log::debug!("Respawned body {:?} on tile {}", body, tile);
}

/// [`BodyProbe`] over a snapshot of the ECS bodies and the tile colliders.
pub struct WorldProbe<'a> {
    bodies: Vec<(BodyId, Vec3, f32)>,
    tiles: &'a TileWorld,
    surface: Surface,
}

impl<'a> WorldProbe<'a> {
    pub fn new(world: &World, tiles: &'a TileWorld, surface: Surface) -> Self {
        let bodies = world
            .query::<(&Occupant, &Transform)>()
            .iter()
            .map(|(_, (o, t))| (o.body, t.position, o.foot_offset))
            .collect();
        Self { bodies, tiles, surface }
    }
}

impl BodyProbe for WorldProbe<'_> {
    fn bodies(&self) -> Vec<(BodyId, Vec3)> {
        self.bodies.iter().map(|(b, p, _)| (*b, *p)).collect()
    }

    fn grounded_tile(&self, body: BodyId) -> Option<TileId> {
        let (_, position, foot) = self.bodies.iter().find(|(b, _, _)| *b == body)?;
        let down = -self.surface.up_at(*position);
        self.tiles
            .ground_probe(*position, down, foot + GROUND_TOLERANCE)
            .map(|hit| hit.tile)
    }
}
