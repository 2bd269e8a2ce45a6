//! Hit input, per-tick output and the replication log.

use engine_core::BodyId;
use geosphere::TileId;
use glam::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HitKind {
    #[default]
    Extend,
    Retract,
}

/// The only thing that crosses the wire when a pillar is shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitEvent {
    pub tile: TileId,
    #[serde(default)]
    pub kind: HitKind,
}

impl HitEvent {
    pub fn extend(tile: TileId) -> Self {
        Self {
            tile,
            kind: HitKind::Extend,
        }
    }

    pub fn retract(tile: TileId) -> Self {
        Self {
            tile,
            kind: HitKind::Retract,
        }
    }
}

/// Notable transitions produced during a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TileEvent {
    Locked(TileId),
    Destroyed(TileId),
    Launched {
        tile: TileId,
        body: BodyId,
        impulse: Vec3,
    },
}

/// Everything a tick hands back to the caller. Impulses are never applied by the arena.
#[derive(Debug, Clone, Default)]
pub struct TickOutput {
    /// Index of the tick that produced this output.
    pub tick: u64,
    pub impulses: Vec<(BodyId, Vec3)>,
    pub events: Vec<TileEvent>,
    /// Tiles whose height changed this tick, with the new height.
    pub moved: Vec<(TileId, f32)>,
    /// Hits dropped because their tile id was stale.
    pub discarded: usize,
}

impl TickOutput {
    pub fn destroyed(&self) -> impl Iterator<Item = TileId> + '_ {
        self.events.iter().filter_map(|e| match e {
            TileEvent::Destroyed(id) => Some(*id),
            _ => None,
        })
    }
}

/// Applied hits in application order, tagged with the tick they landed on.
/// Feeding the same log into a fresh arena reproduces the same heights.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HitLog {
    entries: Vec<(u64, HitEvent)>,
}

impl HitLog {
    pub fn record(&mut self, tick: u64, hit: HitEvent) {
        self.entries.push((tick, hit));
    }

    pub fn entries(&self) -> &[(u64, HitEvent)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn hits_at(&self, tick: u64) -> impl Iterator<Item = HitEvent> + '_ {
        self.entries.iter().filter(move |(t, _)| *t == tick).map(|(_, hit)| *hit)
    }

    /// Tick of the last recorded hit.
    pub fn last_tick(&self) -> Option<u64> {
        self.entries.last().map(|(t, _)| *t)
    }
}
