use crate::math::{Vector3, Quaternion};

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Fieldless tag for a body's shape, used to key collision dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum ShapeKind {
    /// Free-rolling ball
    Sphere,

    /// The player vehicle
    Car,

    /// Static box scenery
    House,

    /// Static inclined box
    Ramp,
}

/// Collision geometry of a body.
///
/// Round shapes carry a radius and box-like shapes carry half extents, so every
/// contact test reads the representation it needs without guessing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// A sphere of the given radius
    Sphere {
        /// Radius of the sphere
        radius: f32,
    },

    /// The car body, an axis-aligned box for ground and house contact
    Car {
        /// Half extents (half-width, half-height, half-length)
        half_extents: Vector3,
    },

    /// An axis-aligned house block
    House {
        /// Half extents of the block
        half_extents: Vector3,
    },

    /// A wedge rising along its local +Z axis
    Ramp {
        /// Half extents of the ramp's bounding box in local space
        half_extents: Vector3,

        /// Upward unit normal of the incline in world space
        slope: Vector3,
    },
}

impl Shape {
    /// Creates a ramp shape, deriving the incline normal from its extents and yaw
    pub fn ramp(half_extents: Vector3, rotation: Quaternion) -> Self {
        // Surface runs from y = -h at z = -l up to y = +h at z = +l.
        let local_normal = Vector3::new(0.0, half_extents.z, -half_extents.y).normalize_or(Vector3::UP);
        Self::Ramp {
            half_extents,
            slope: rotation.rotate_vector(local_normal).normalize_or(Vector3::UP),
        }
    }

    /// Returns the tag for this shape
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Sphere { .. } => ShapeKind::Sphere,
            Shape::Car { .. } => ShapeKind::Car,
            Shape::House { .. } => ShapeKind::House,
            Shape::Ramp { .. } => ShapeKind::Ramp,
        }
    }

    /// Height of the body's center above its lowest point when resting on flat ground
    pub fn collision_height(&self) -> f32 {
        match *self {
            Shape::Sphere { radius } => radius,
            Shape::Car { half_extents }
            | Shape::House { half_extents }
            | Shape::Ramp { half_extents, .. } => half_extents.y,
        }
    }

    /// Half extents of box-like shapes, `None` for spheres
    pub fn half_extents(&self) -> Option<Vector3> {
        match *self {
            Shape::Sphere { .. } => None,
            Shape::Car { half_extents }
            | Shape::House { half_extents }
            | Shape::Ramp { half_extents, .. } => Some(half_extents),
        }
    }

    /// Radius of a sphere, `None` for box-like shapes
    pub fn radius(&self) -> Option<f32> {
        match *self {
            Shape::Sphere { radius } => Some(radius),
            _ => None,
        }
    }

    /// Whether every dimension is finite and strictly positive
    pub fn is_valid(&self) -> bool {
        match *self {
            Shape::Sphere { radius } => radius.is_finite() && radius > 0.0,
            Shape::Car { half_extents }
            | Shape::House { half_extents }
            | Shape::Ramp { half_extents, .. } => {
                half_extents.is_finite()
                    && half_extents.x > 0.0
                    && half_extents.y > 0.0
                    && half_extents.z > 0.0
            }
        }
    }
}
