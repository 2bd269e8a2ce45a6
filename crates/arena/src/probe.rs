use engine_core::BodyId;
use geosphere::TileId;
use glam::Vec3;

/// Read-only view of the bodies that can stand on tiles. Implemented by
/// whoever owns physics; the arena only asks, it never moves bodies itself.
pub trait BodyProbe {
    /// Every body that may be launched, with its current position.
    fn bodies(&self) -> Vec<(BodyId, Vec3)>;

    /// Tile directly beneath `body`, if it is standing on one.
    fn grounded_tile(&self, body: BodyId) -> Option<TileId>;
}

/// Probe for ticks with nobody in the arena.
pub struct NoBodies;

impl BodyProbe for NoBodies {
    fn bodies(&self) -> Vec<(BodyId, Vec3)> {
        Vec::new()
    }

    fn grounded_tile(&self, _body: BodyId) -> Option<TileId> {
        None
    }
}
