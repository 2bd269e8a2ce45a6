//! The arena root: owns the lattice and every tile's runtime state, and turns
//! hits plus elapsed time into height changes, events and launch impulses.

use std::collections::VecDeque;

use geosphere::{Surface, Tile, TileId, Topology, TopologyBuilder, TopologyParams};
use glam::Vec3;

use crate::config::{ArenaConfig, LiveSettings, PillarLimits, PillarTuning};
use crate::error::ArenaError;
use crate::events::{HitEvent, HitLog, TickOutput, TileEvent};
use crate::probe::BodyProbe;
use crate::render::TileRenderData;
use crate::state::{HitOutcome, TileRuntime, TileState};

pub struct Arena {
    topology: Topology,
    tuning: PillarTuning,
    limits: PillarLimits,
    runtime: Vec<TileRuntime>,
    pending: VecDeque<HitEvent>,
    staged: Option<LiveSettings>,
    log: HitLog,
    tick: u64,
}

impl Arena {
    /// Validate `config` and build a fresh arena from it.
    pub fn new(config: &ArenaConfig) -> Result<Self, ArenaError> {
        config.validate()?;
        let topology = TopologyBuilder::new(config.topology).build()?;
        Self::from_topology(topology, config.pillars)
    }

    pub fn from_topology(topology: Topology, tuning: PillarTuning) -> Result<Self, ArenaError> {
        tuning.validate()?;
        let limits = tuning.limits(topology.sphere_radius());
        let runtime = vec![TileRuntime::new(limits.initial_height); topology.len()];
        log::info!(
            "Arena ready: {} tiles, heights {:.2}..{:.2} (start {:.2}), step {:.2}",
            topology.len(),
            limits.min_height,
            limits.max_height,
            limits.initial_height,
            limits.delta
        );
        Ok(Self {
            topology,
            tuning,
            limits,
            runtime,
            pending: VecDeque::new(),
            staged: None,
            log: HitLog::default(),
            tick: 0,
        })
    }

    /// Regenerate the lattice. All runtime state, queued hits and the hit log are discarded.
    pub fn rebuild(&mut self, params: TopologyParams) -> Result<(), ArenaError> {
        let topology = TopologyBuilder::new(params).build()?;
        *self = Self::from_topology(topology, self.tuning)?;
        Ok(())
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.topology.tile(id)
    }

    pub fn runtime(&self, id: TileId) -> Option<&TileRuntime> {
        self.runtime.get(id.index())
    }

    pub fn state(&self, id: TileId) -> Option<TileState> {
        self.runtime(id).map(TileRuntime::state)
    }

    pub fn height(&self, id: TileId) -> Option<f32> {
        self.runtime(id).map(|r| r.current_height)
    }

    pub fn heights(&self) -> impl Iterator<Item = (TileId, f32)> + '_ {
        self.runtime
            .iter()
            .enumerate()
            .map(|(i, r)| (TileId::from(i), r.current_height))
    }

    pub fn limits(&self) -> &PillarLimits {
        &self.limits
    }

    pub fn surface(&self) -> Surface {
        self.topology.params().surface
    }

    pub fn hit_log(&self) -> &HitLog {
        &self.log
    }

    /// Ticks simulated since construction or the last round reset; also the
    /// tick the next queued hit lands on.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Whether `id` exists and is still standing (destroyed tiles are out of play).
    pub fn is_live(&self, id: TileId) -> bool {
        self.runtime(id).is_some_and(|r| !r.destroyed)
    }

    /// Accept a hit from a weapon or the network. It is applied, in arrival
    /// order, at the start of the next tick.
    pub fn on_tile_hit(&mut self, hit: HitEvent) {
        self.queue_hit(hit);
    }

    pub fn queue_hit(&mut self, hit: HitEvent) {
        self.pending.push_back(hit);
    }

    pub fn pending_hits(&self) -> usize {
        self.pending.len()
    }

    /// Swap tuning at the start of the next tick.
    pub fn stage_live_settings(&mut self, settings: LiveSettings) {
        self.staged = Some(settings);
    }

    /// Overwrite a tile's height, cancelling its ease and lock.
    pub fn set_height(&mut self, id: TileId, height: f32) -> Result<(), ArenaError> {
        let tiles = self.runtime.len();
        let limits = self.limits;
        let runtime = self
            .runtime
            .get_mut(id.index())
            .ok_or(ArenaError::UnknownTile { id, tiles })?;
        if runtime.set_height(height, &limits) {
            log::warn!(
                "Height {:.3} for tile {} clamped to {:.3}",
                height,
                id,
                runtime.current_height
            );
        }
        Ok(())
    }

    /// Round reset: every tile back to its initial height, unlocked and alive.
    /// Queued hits are dropped, and the hit log and tick counter start over so
    /// the log always describes the current round from a fresh arena.
    pub fn reset_all(&mut self) {
        for runtime in &mut self.runtime {
            runtime.reset(&self.limits);
        }
        let dropped = self.pending.len();
        self.pending.clear();
        self.log.clear();
        self.tick = 0;
        log::info!("Arena reset ({} queued hits dropped)", dropped);
    }

    /// Advance the simulation by `dt` seconds.
    pub fn tick(&mut self, dt: f32, probe: &impl BodyProbe) -> TickOutput {
        let mut out = TickOutput {
            tick: self.tick,
            ..TickOutput::default()
        };

        if let Some(settings) = self.staged.take() {
            self.apply_live_settings(settings);
        }

        while let Some(hit) = self.pending.pop_front() {
            self.apply_hit(hit, &mut out);
        }

        let mut launches: Vec<(TileId, f32)> = Vec::new();
        for (i, runtime) in self.runtime.iter_mut().enumerate() {
            let id = TileId::from(i);
            let step = runtime.step(dt, &self.limits);
            if step.moved {
                out.moved.push((id, runtime.current_height));
            }
            if let Some(rise) = step.launch {
                launches.push((id, rise));
            }
            if step.locked {
                log::debug!("Tile {} locked at full extension", id);
                out.events.push(TileEvent::Locked(id));
            }
        }

        if !launches.is_empty() {
            self.launch_occupants(&launches, probe, &mut out);
        }

        self.tick += 1;
        out
    }

    fn apply_hit(&mut self, hit: HitEvent, out: &mut TickOutput) {
        let Some(runtime) = self.runtime.get_mut(hit.tile.index()) else {
            log::warn!(
                "Discarding hit on unknown tile {} (arena has {} tiles)",
                hit.tile,
                self.runtime.len()
            );
            out.discarded += 1;
            return;
        };
        self.log.record(self.tick, hit);
        match runtime.hit(hit.kind, &self.limits) {
            HitOutcome::Ignored => {
                log::debug!("Hit {:?} on tile {} ignored ({:?})", hit.kind, hit.tile, runtime.state());
            }
            HitOutcome::Eased { target, duration } => {
                log::trace!("Tile {} easing to {:.3} over {:.3}s", hit.tile, target, duration);
            }
            HitOutcome::Locked => {
                log::debug!("Tile {} locked by hit at max height", hit.tile);
                out.events.push(TileEvent::Locked(hit.tile));
            }
            HitOutcome::Destroyed => {
                log::debug!("Tile {} destroyed", hit.tile);
                out.events.push(TileEvent::Destroyed(hit.tile));
            }
        }
    }

    fn launch_occupants(&self, launches: &[(TileId, f32)], probe: &impl BodyProbe, out: &mut TickOutput) {
        let surface = self.surface();
        for (body, position) in probe.bodies() {
            let Some(tile) = probe.grounded_tile(body) else {
                continue;
            };
            let Some(&(_, rise)) = launches.iter().find(|(id, _)| *id == tile) else {
                continue;
            };
            if !self.is_live(tile) {
                continue;
            }
            let impulse = surface.up_at(position) * self.limits.launch_multiplier * rise;
            if impulse == Vec3::ZERO {
                continue;
            }
            log::debug!("Launching body {:?} off tile {} with {:?}", body, tile, impulse);
            out.impulses.push((body, impulse));
            out.events.push(TileEvent::Launched { tile, body, impulse });
        }
    }

    fn apply_live_settings(&mut self, settings: LiveSettings) {
        if settings.edges != self.topology.params().edges {
            self.topology.rescale_edges(settings.edges);
            for runtime in &mut self.runtime {
                runtime.needs_geometry_refresh = true;
            }
        }
        if settings.pillars != self.tuning {
            if let Err(e) = settings.pillars.validate() {
                log::warn!("Ignoring live pillar tuning: {}", e);
                return;
            }
            self.tuning = settings.pillars;
            self.limits = self.tuning.limits(self.topology.sphere_radius());
            for runtime in &mut self.runtime {
                let clamped = self.limits.clamp(runtime.current_height);
                if clamped != runtime.current_height {
                    runtime.set_height(clamped, &self.limits);
                }
            }
        }
        log::info!("Applied live settings at tick {}", self.tick);
    }

    /// Render data for every tile whose geometry changed since the last drain.
    pub fn drain_dirty(&mut self) -> Vec<TileRenderData> {
        let mut out = Vec::new();
        for (tile, runtime) in self.topology.tiles().iter().zip(self.runtime.iter_mut()) {
            if runtime.needs_geometry_refresh {
                runtime.needs_geometry_refresh = false;
                out.push(TileRenderData::new(tile, runtime));
            }
        }
        out
    }
}
