//! Per-tile instance data handed to whatever draws the pillars.

use bytemuck::{Pod, Zeroable};
use engine_core::{Transform, TransformRaw};
use geosphere::Tile;

use crate::state::TileRuntime;

pub const FLAG_LOCKED: u32 = 1;
pub const FLAG_DESTROYED: u32 = 1 << 1;
pub const FLAG_EASING: u32 = 1 << 2;

/// One pillar instance. Layout is GPU-friendly: 96 bytes, no implicit padding.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TileRenderData {
    /// Top-face transform: tile frame raised by the current height.
    pub model: [[f32; 4]; 4],
    pub tile_id: u32,
    /// 5 or 6.
    pub corners: u32,
    pub height: f32,
    pub edge_length: f32,
    pub flags: u32,
    pub _pad: [u32; 3],
}

impl TileRenderData {
    pub fn new(tile: &Tile, runtime: &TileRuntime) -> Self {
        let height = runtime.current_height;
        let top = Transform::from_position_rotation(tile.position + tile.up() * height, tile.orientation);
        let mut flags = 0;
        if runtime.locked {
            flags |= FLAG_LOCKED;
        }
        if runtime.destroyed {
            flags |= FLAG_DESTROYED;
        }
        if runtime.is_easing() {
            flags |= FLAG_EASING;
        }
        Self {
            model: TransformRaw::from(top).model,
            tile_id: tile.id.0,
            corners: tile.shape().corners() as u32,
            height,
            edge_length: tile.edge_length,
            flags,
            _pad: [0; 3],
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.flags & FLAG_DESTROYED != 0
    }
}
