//! Common ECS components used across the engine.

use glam::Vec3;

/// Stable identifier of a simulated body (player, bot, loose prop).
///
/// This is what the tile state machine hands back alongside a launch impulse,
/// so it must survive across ticks and be identical on every participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct BodyId(pub u32);

/// Velocity component for moving entities.
#[derive(Debug, Clone, Copy, Default)]
pub struct Velocity {
    pub linear: Vec3,
    pub angular: Vec3,
}

impl Velocity {
    pub fn new(linear: Vec3) -> Self {
        Self {
            linear,
            angular: Vec3::ZERO,
        }
    }

    /// Add an impulse on top of the current motion. Existing tangential
    /// velocity is kept; only the component along `impulse` changes.
    pub fn apply_impulse(&mut self, impulse: Vec3, mass: &Mass) {
        self.linear += impulse * mass.inverse();
    }
}

/// Mass component. Zero or negative mass is treated as immovable.
#[derive(Debug, Clone, Copy)]
pub struct Mass(pub f32);

impl Mass {
    pub fn inverse(&self) -> f32 {
        if self.0 > 0.0 {
            1.0 / self.0
        } else {
            0.0
        }
    }
}

impl Default for Mass {
    fn default() -> Self {
        Self(80.0)
    }
}

/// Tag component linking an ECS entity to the body id the arena knows about.
#[derive(Debug, Clone, Copy)]
pub struct Occupant {
    pub body: BodyId,
    /// Distance from the body origin down to its feet.
    pub foot_offset: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impulse_is_additive() {
        let mut v = Velocity::new(Vec3::new(3.0, 0.0, 0.0));
        v.apply_impulse(Vec3::new(0.0, 10.0, 0.0), &Mass(2.0));
        assert_eq!(v.linear, Vec3::new(3.0, 5.0, 0.0));
    }

    #[test]
    fn immovable_mass_ignores_impulse() {
        let mut v = Velocity::default();
        v.apply_impulse(Vec3::ONE * 100.0, &Mass(0.0));
        assert_eq!(v.linear, Vec3::ZERO);
    }
}
