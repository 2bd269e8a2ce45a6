//! Lattice construction parameters.

use engine_core::ICOSAHEDRON_EDGE_ANGLE;
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::TopologyError;

/// Deepest subdivision the builder accepts (40 962 tiles).
pub const MAX_SUBDIVISIONS: u32 = 6;

/// Which side of the sphere the arena is played on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Surface {
    /// Players walk on the inside; pillars grow toward the origin.
    #[default]
    Interior,
    /// Players walk on the outside; pillars grow away from the origin.
    Exterior,
}

impl Surface {
    /// Unit "up" direction for something standing at `p`.
    pub fn up_at(self, p: Vec3) -> Vec3 {
        match self {
            Surface::Interior => -p.normalize_or_zero(),
            Surface::Exterior => p.normalize_or_zero(),
        }
    }
}

/// Edge-length shaping. Changing these only re-runs the edge-length pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeParams {
    /// Multiplier applied to pentagon edges (degree 0).
    pub pentagon_multiplier: f32,
    /// `k` in `(1 + k)^(2d)` for hexagons of degree `d`.
    pub degree_scale: f32,
}

impl Default for EdgeParams {
    fn default() -> Self {
        Self {
            pentagon_multiplier: 1.3,
            degree_scale: -0.01,
        }
    }
}

impl EdgeParams {
    pub fn degree_multiplier(&self, degree: u32) -> f32 {
        if degree == 0 {
            self.pentagon_multiplier
        } else {
            (1.0 + self.degree_scale).powi(2 * degree as i32)
        }
    }
}

/// Everything needed to build a lattice. Missing fields deserialize to [`TopologyParams::default`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopologyParams {
    pub sphere_radius: f32,
    /// Exponential hex number `N`: each icosahedron face is split 1→4 this many times.
    pub subdivisions: u32,
    /// Overrides the derived base edge length when set.
    pub base_edge_length: Option<f32>,
    pub relax_passes: u32,
    pub surface: Surface,
    pub edges: EdgeParams,
}

const DEFAULT_RELAX_PASSES: u32 = 10;

impl Default for TopologyParams {
    fn default() -> Self {
        Self::new(70.0, 3)
    }
}

impl TopologyParams {
    pub fn new(sphere_radius: f32, subdivisions: u32) -> Self {
        Self {
            sphere_radius,
            subdivisions,
            base_edge_length: None,
            relax_passes: DEFAULT_RELAX_PASSES,
            surface: Surface::default(),
            edges: EdgeParams::default(),
        }
    }

    /// Base edge length: configured value, or the mean arc spacing between
    /// lattice points divided by √3 (the edge of a regular hexagon whose
    /// neighbours sit at that spacing).
    pub fn base_edge_length(&self) -> f32 {
        self.base_edge_length.unwrap_or_else(|| {
            let spacing = self.sphere_radius * ICOSAHEDRON_EDGE_ANGLE
                / (1u32 << self.subdivisions.min(MAX_SUBDIVISIONS)) as f32;
            spacing / 3.0_f32.sqrt()
        })
    }

    /// Additive tolerance used for dedup, pentagon matching and in-plane tests.
    pub fn epsilon(&self) -> f32 {
        self.base_edge_length() / 100.0
    }

    /// Radius inside which neighbour candidates are searched.
    pub fn neighbor_search_radius(&self) -> f32 {
        3.0 * self.base_edge_length()
    }

    pub fn validate(&self) -> Result<(), TopologyError> {
        if !(self.sphere_radius.is_finite() && self.sphere_radius > 0.0) {
            return Err(TopologyError::InvalidParams(format!(
                "sphere_radius must be positive, got {}",
                self.sphere_radius
            )));
        }
        if self.subdivisions == 0 || self.subdivisions > MAX_SUBDIVISIONS {
            return Err(TopologyError::InvalidParams(format!(
                "subdivisions must be in 1..={MAX_SUBDIVISIONS}, got {}",
                self.subdivisions
            )));
        }
        if let Some(edge) = self.base_edge_length {
            if !(edge.is_finite() && edge > 0.0) {
                return Err(TopologyError::InvalidParams(format!(
                    "base_edge_length must be positive, got {edge}"
                )));
            }
        }
        if self.edges.degree_scale <= -1.0 {
            return Err(TopologyError::InvalidParams(format!(
                "degree_scale must be greater than -1, got {}",
                self.edges.degree_scale
            )));
        }
        Ok(())
    }
}
