//! One headless match: arena, tile colliders, bots and the fixed-step clock.

use anyhow::{Context, Result};
use arena::{Arena, ArenaConfig, TileEvent};
use engine_core::FixedStep;
use hecs::World;
use physics::TileWorld;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

use crate::config::MatchConfig;
use crate::occupants::{self, WorldProbe};
use crate::shooter::Shooter;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionStats {
    pub ticks: u64,
    pub shots: u64,
    pub misses: u64,
    pub hits: u64,
    pub discarded: u64,
    pub launches: u64,
    pub locked: u64,
    pub destroyed: u64,
    pub respawns: u64,
    pub rounds: u64,
}

pub struct Session {
    pub arena: Arena,
    pub tiles: TileWorld,
    pub world: World,
    clock: FixedStep,
    shooter: Shooter,
    rng: StdRng,
    round_length: f32,
    round_elapsed: f32,
    stats: SessionStats,
}

impl Session {
    pub fn new(arena_config: &ArenaConfig, match_config: &MatchConfig) -> Result<Self> {
        let arena = Arena::new(arena_config).context("building arena")?;
        let tiles = TileWorld::new(arena.topology(), arena_config.column_depth(), |id| {
            arena.height(id).unwrap_or(0.0)
        })
        .context("building tile colliders")?;

        let mut rng = StdRng::seed_from_u64(match_config.seed);
        let mut world = World::new();
        occupants::spawn_bots(
            &mut world,
            &arena,
            match_config.bot_count,
            match_config.foot_offset,
            &mut rng,
        );

        Ok(Self {
            arena,
            tiles,
            world,
            clock: FixedStep::from_rate(arena_config.tick_rate),
            shooter: Shooter::new(
                match_config.seed.wrapping_add(1),
                match_config.fire_rate,
                match_config.retract_chance,
            ),
            rng,
            round_length: match_config.round_length,
            round_elapsed: 0.0,
            stats: SessionStats::default(),
        })
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn simulated_seconds(&self) -> f32 {
        self.clock.simulated_seconds()
    }

    /// Feed a frame of wall time; runs every tick that became due.
    pub fn advance(&mut self, frame: Duration) -> u32 {
        let due = self.clock.advance(frame);
        let dt = self.clock.step_seconds();
        for _ in 0..due {
            self.tick(dt);
        }
        due
    }

    fn tick(&mut self, dt: f32) {
        let radius = self.arena.topology().sphere_radius();
        let surface = self.arena.surface();

        for hit in self.shooter.fire(&self.world, &self.tiles, radius, dt) {
            self.arena.on_tile_hit(hit);
        }

        let logged = self.arena.hit_log().len();
        let out = {
            let probe = WorldProbe::new(&self.world, &self.tiles, surface);
            self.arena.tick(dt, &probe)
        };

        self.tiles.sync_heights(&out.moved);
        for id in out.destroyed() {
            self.tiles.remove_tile(id);
        }
        occupants::apply_impulses(&mut self.world, &out.impulses);

        let lost = occupants::integrate(&mut self.world, &self.tiles, surface, radius, dt);
        for body in lost {
            occupants::respawn(&mut self.world, &self.arena, body, &mut self.rng);
            self.stats.respawns += 1;
        }

        self.stats.ticks += 1;
        self.stats.shots = self.shooter.shots;
        self.stats.misses = self.shooter.misses;
        self.stats.hits += (self.arena.hit_log().len() - logged) as u64;
        self.stats.discarded += out.discarded as u64;
        for event in &out.events {
            match event {
                TileEvent::Locked(_) => self.stats.locked += 1,
                TileEvent::Destroyed(_) => self.stats.destroyed += 1,
                TileEvent::Launched { .. } => self.stats.launches += 1,
            }
        }

        if self.round_length > 0.0 {
            self.round_elapsed += dt;
            if self.round_elapsed >= self.round_length {
                self.reset_round();
            }
        }
    }

    /// Every tile back to its starting state; colliders rebuilt to match.
    fn reset_round(&mut self) {
        self.round_elapsed = 0.0;
        self.arena.reset_all();
        let depth = self.tiles.column_depth();
        match TileWorld::new(self.arena.topology(), depth, |id| {
            self.arena.height(id).unwrap_or(0.0)
        }) {
            Ok(tiles) => self.tiles = tiles,
            Err(e) => log::error!("Could not rebuild tile colliders after reset: {}", e),
        }
        self.stats.rounds += 1;
        log::info!("Round {} over, arena reset", self.stats.rounds);
    }
}
