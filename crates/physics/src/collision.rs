//! Collision groups and filtering.

use rapier3d::prelude::*;

/// Collision groups for different entity types.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroup {
    /// Pillar columns
    Tile = 1 << 0,
    /// Players and bots standing in the arena
    Occupant = 1 << 1,
    /// Weapon rays
    Projectile = 1 << 2,
}

impl CollisionGroup {
    fn bits(self) -> Group {
        Group::from_bits_retain(self as u32)
    }

    /// Tiles are hit by everything.
    pub fn tile() -> InteractionGroups {
        InteractionGroups::new(Self::Tile.bits(), Group::ALL)
    }

    /// Ground probes only care about tiles.
    pub fn occupant() -> InteractionGroups {
        InteractionGroups::new(Self::Occupant.bits(), Self::Tile.bits())
    }

    /// Weapon rays stop on tiles and occupants.
    pub fn projectile() -> InteractionGroups {
        InteractionGroups::new(
            Self::Projectile.bits(),
            Group::from_bits_retain(Self::Tile as u32 | Self::Occupant as u32),
        )
    }
}
