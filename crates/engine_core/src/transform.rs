//! Transform component and utilities for spatial positioning.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

/// A 3D transform representing position, rotation, and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform with position and rotation.
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Transform standing on a curved surface: local +Y is mapped onto `up`.
    ///
    /// The azimuth around `up` is whatever the shortest arc from +Y gives;
    /// callers that care about it rotate afterwards with [`Transform::rotate_about_up`].
    pub fn on_surface(position: Vec3, up: Vec3) -> Self {
        Self::from_position_rotation(position, Quat::from_rotation_arc(Vec3::Y, up.normalize()))
    }

    /// Create the model matrix for this transform.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Get the forward direction (negative Z in right-handed coordinates).
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    /// Get the right direction (positive X).
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Get the up direction (positive Y).
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Spin around the transform's own up axis (counter-clockwise seen from above).
    pub fn rotate_about_up(&mut self, angle: f32) {
        self.rotation = (Quat::from_axis_angle(self.up(), angle) * self.rotation).normalize();
    }
}

/// Raw transform data for GPU upload (instance data).
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct TransformRaw {
    pub model: [[f32; 4]; 4],
}

impl From<&Transform> for TransformRaw {
    fn from(transform: &Transform) -> Self {
        Self {
            model: transform.to_matrix().to_cols_array_2d(),
        }
    }
}

impl From<Transform> for TransformRaw {
    fn from(transform: Transform) -> Self {
        Self::from(&transform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn on_surface_maps_local_up() {
        let up = Vec3::new(1.0, -2.0, 0.5).normalize();
        let t = Transform::on_surface(Vec3::ZERO, up);
        assert!(t.up().dot(up) > 0.9999);
        assert!(t.right().dot(up).abs() < 1e-5);
    }

    #[test]
    fn on_surface_handles_straight_down() {
        let t = Transform::on_surface(Vec3::ZERO, -Vec3::Y);
        assert!(t.up().dot(-Vec3::Y) > 0.9999);
    }

    #[test]
    fn rotate_about_up_keeps_up() {
        let up = Vec3::new(0.3, 0.2, -0.9).normalize();
        let mut t = Transform::on_surface(Vec3::ZERO, up);
        let right_before = t.right();
        t.rotate_about_up(std::f32::consts::FRAC_PI_2);
        assert!(t.up().dot(up) > 0.9999);
        // Quarter turn counter-clockwise: old right becomes new -forward
        assert!(t.right().dot(right_before).abs() < 1e-4);
        assert!(t.forward().dot(-right_before) > 0.999);
    }
}
