//! Registration helper for sandbox content.
//!
//! The builder only creates bodies; meshes, materials and lights belong to
//! the renderer.

use std::f32::consts::{FRAC_PI_2, TAU};

use crate::bodies::Body;
use crate::core::{BodyHandle, SimulationConfig, World};
use crate::math::Vector3;
use crate::Result;

/// Half extents of the stock car (and of its fallback when the mesh fails to load)
pub const CAR_HALF_EXTENTS: Vector3 = Vector3::new(1.0, 0.5, 2.0);

/// Mass of the stock car
pub const CAR_MASS: f32 = 1000.0;

/// Sphere density used by the stock scene, mass per cubic unit of radius
const SPHERE_DENSITY: f32 = 4.0;

/// Collects bodies and registers them into a world in one go
#[derive(Debug, Clone, Default)]
pub struct SceneBuilder {
    bodies: Vec<Body>,
}

impl SceneBuilder {
    /// Creates an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock sandbox: the car at the origin, a ring of houses, two ramps and a few spheres
    pub fn sandbox() -> Self {
        let mut builder = Self::new().with_car(Vector3::new(0.0, CAR_HALF_EXTENTS.y, 0.0), 0.0);

        for i in 0..8 {
            let angle = i as f32 * TAU / 8.0;
            let half = Vector3::new(3.0 + (i % 3) as f32, 2.5 + (i % 2) as f32 * 1.5, 3.0);
            let position = Vector3::new(angle.cos() * 40.0, half.y, angle.sin() * 40.0);
            builder = builder.with_house(half, position);
        }

        builder
            .with_ramp(Vector3::new(3.0, 1.0, 6.0), Vector3::new(0.0, 1.0, 20.0), 0.0)
            .with_ramp(Vector3::new(4.0, 1.5, 8.0), Vector3::new(-22.0, 1.5, -10.0), FRAC_PI_2)
            .with_sphere(1.0, Vector3::new(6.0, 5.0, 6.0))
            .with_sphere(0.5, Vector3::new(-5.0, 3.0, 8.0))
            .with_sphere(1.5, Vector3::new(10.0, 8.0, -6.0))
            .with_sphere(0.75, Vector3::new(-8.0, 1.0, -8.0))
            .with_sphere(1.2, Vector3::new(0.0, 12.0, 10.0))
            .with_sphere(0.6, Vector3::new(15.0, 2.0, 15.0))
    }

    /// Adds the car, facing `yaw` radians from +Z
    pub fn with_car(mut self, position: Vector3, yaw: f32) -> Self {
        self.bodies.push(Body::car(CAR_HALF_EXTENTS, CAR_MASS, position, yaw));
        self
    }

    /// Adds a static house block
    pub fn with_house(mut self, half_extents: Vector3, position: Vector3) -> Self {
        self.bodies.push(Body::house(half_extents, position));
        self
    }

    /// Adds a static ramp rising along its local +Z
    pub fn with_ramp(mut self, half_extents: Vector3, position: Vector3, yaw: f32) -> Self {
        self.bodies.push(Body::ramp(half_extents, position, yaw));
        self
    }

    /// Adds a dynamic sphere whose mass grows with its volume
    pub fn with_sphere(mut self, radius: f32, position: Vector3) -> Self {
        let mass = SPHERE_DENSITY * radius * radius * radius;
        self.bodies.push(Body::sphere(radius, mass, position));
        self
    }

    /// Adds any prepared body
    pub fn with_body(mut self, body: Body) -> Self {
        self.bodies.push(body);
        self
    }

    /// Number of bodies collected so far
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether no body has been collected
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Registers every collected body into `world`, in insertion order
    pub fn register(self, world: &mut World) -> Result<Vec<BodyHandle>> {
        self.bodies.into_iter().map(|body| world.add_body(body)).collect()
    }

    /// Builds a fresh world holding the collected bodies
    pub fn build(self, config: SimulationConfig) -> Result<World> {
        let mut world = World::with_config(config)?;
        self.register(&mut world)?;
        Ok(world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::ShapeKind;
    use crate::error::PhysicsError;

    #[test]
    fn sandbox_has_one_car() {
        let world = SceneBuilder::sandbox().build(SimulationConfig::default()).unwrap();

        let cars = world.bodies().filter(|(_, body)| body.is_car()).count();
        assert_eq!(cars, 1);
        assert!(world.car_handle().is_some());

        let ramps = world.bodies().filter(|(_, body)| body.kind() == ShapeKind::Ramp).count();
        assert_eq!(ramps, 2);
    }

    #[test]
    fn second_car_is_rejected() {
        let mut world = World::new();
        let result = SceneBuilder::new()
            .with_car(Vector3::new(0.0, 0.5, 0.0), 0.0)
            .with_car(Vector3::new(5.0, 0.5, 0.0), 0.0)
            .register(&mut world);

        assert!(matches!(result, Err(PhysicsError::DuplicateCar)));
    }
}
