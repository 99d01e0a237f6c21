use crate::math::{Vector3, Transform};

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Axis-Aligned Bounding Box used by the box-like contact tests
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Minimum corner of the AABB
    pub min: Vector3,

    /// Maximum corner of the AABB
    pub max: Vector3,
}

impl Aabb {
    /// Creates a new AABB from minimum and maximum points
    #[inline]
    pub fn new(min: Vector3, max: Vector3) -> Self {
        Self { min, max }
    }

    /// Creates an AABB centered at a position with the given half extents
    #[inline]
    pub fn from_center_half_extents(center: Vector3, half_extents: Vector3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Creates an AABB from a set of points
    pub fn from_points(points: &[Vector3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;

        let mut min = *first;
        let mut max = *first;

        for point in rest {
            min.x = min.x.min(point.x);
            min.y = min.y.min(point.y);
            min.z = min.z.min(point.z);

            max.x = max.x.max(point.x);
            max.y = max.y.max(point.y);
            max.z = max.z.max(point.z);
        }

        Some(Self { min, max })
    }

    /// World-space bounds of a box with `half_extents` placed by `transform`
    pub fn from_oriented_box(transform: &Transform, half_extents: Vector3) -> Self {
        let h = half_extents;
        let corners = [
            Vector3::new(-h.x, -h.y, -h.z),
            Vector3::new(h.x, -h.y, -h.z),
            Vector3::new(-h.x, h.y, -h.z),
            Vector3::new(h.x, h.y, -h.z),
            Vector3::new(-h.x, -h.y, h.z),
            Vector3::new(h.x, -h.y, h.z),
            Vector3::new(-h.x, h.y, h.z),
            Vector3::new(h.x, h.y, h.z),
        ]
        .map(|corner| transform.transform_point(corner));

        // Eight corners are never empty.
        Self::from_points(&corners).unwrap_or_else(|| Self::from_center_half_extents(transform.position, h))
    }

    /// Checks if this AABB contains a point
    #[inline]
    pub fn contains_point(&self, point: Vector3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }

    /// Checks if this AABB intersects with another AABB
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x &&
        self.min.y <= other.max.y && self.max.y >= other.min.y &&
        self.min.z <= other.max.z && self.max.z >= other.min.z
    }

    /// Grows the AABB by `margin` on every side
    #[inline]
    pub fn expand(&self, margin: f32) -> Self {
        let m = Vector3::new(margin, margin, margin);
        Self {
            min: self.min - m,
            max: self.max + m,
        }
    }

    /// Closest point inside the AABB to `point`
    #[inline]
    pub fn closest_point(&self, point: Vector3) -> Vector3 {
        Vector3::new(
            point.x.clamp(self.min.x, self.max.x),
            point.y.clamp(self.min.y, self.max.y),
            point.z.clamp(self.min.z, self.max.z),
        )
    }
}
