use crate::math::{Vector3, Quaternion};

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Rigid placement of a body: position plus orientation.
///
/// Sandbox meshes are never scaled by the physics core, so unlike a general
/// scene transform this carries no scale.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Transform {
    /// Position in world space
    pub position: Vector3,

    /// Orientation as a quaternion
    pub rotation: Quaternion,
}

impl Transform {
    /// Creates a new transform with the given position and rotation
    #[inline]
    pub fn new(position: Vector3, rotation: Quaternion) -> Self {
        Self { position, rotation }
    }

    /// Creates a new transform from just a position
    #[inline]
    pub fn from_position(position: Vector3) -> Self {
        Self {
            position,
            rotation: Quaternion::identity(),
        }
    }

    /// Transforms a point from local to world space
    #[inline]
    pub fn transform_point(&self, point: Vector3) -> Vector3 {
        self.rotation.rotate_vector(point) + self.position
    }

    /// Transforms a point from world to local space
    #[inline]
    pub fn inverse_transform_point(&self, point: Vector3) -> Vector3 {
        self.rotation.conjugate().rotate_vector(point - self.position)
    }

    /// Rotates a direction from local to world space
    #[inline]
    pub fn transform_direction(&self, direction: Vector3) -> Vector3 {
        self.rotation.rotate_vector(direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn inverse_undoes_forward() {
        let t = Transform::new(Vector3::new(3.0, 1.0, -2.0), Quaternion::from_yaw(0.7));
        let p = Vector3::new(0.5, 2.0, 4.0);
        let back = t.inverse_transform_point(t.transform_point(p));
        assert_relative_eq!(back.x, p.x, epsilon = 1.0e-5);
        assert_relative_eq!(back.y, p.y, epsilon = 1.0e-5);
        assert_relative_eq!(back.z, p.z, epsilon = 1.0e-5);
    }

    #[test]
    fn quarter_yaw_maps_z_to_x() {
        let t = Transform::new(Vector3::ZERO, Quaternion::from_yaw(FRAC_PI_2));
        let d = t.transform_direction(Vector3::unit_z());
        assert_relative_eq!(d.x, 1.0, epsilon = 1.0e-5);
        assert_relative_eq!(d.z, 0.0, epsilon = 1.0e-5);
    }
}
