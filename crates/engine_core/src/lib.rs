//! Core engine types and utilities for the geosphere arena.
//!
//! This crate provides the foundational types used across all engine systems:
//! - Transform and spatial components
//! - Fixed-step time management
//! - Sphere geometry helpers (planes through the origin, signed angles, spatial hashing)

pub mod components;
pub mod geometry;
pub mod spatial;
pub mod time;
pub mod transform;

pub use components::*;
pub use geometry::*;
pub use spatial::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
