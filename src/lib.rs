//! Per-frame physics core for a small 3D driving sandbox.
//!
//! One [`World`] owns every body (the car, spheres, houses and ramps). Each
//! rendered frame the caller hands it the frame time and a snapshot of the
//! held controls; [`World::step`] drives the car, integrates every dynamic
//! body against the ground plane, then tests and resolves every body pair.

pub mod math;
pub mod core;
pub mod bodies;
pub mod collision;
pub mod integration;
pub mod vehicle;
pub mod scene;

/// Re-export common types for easier usage
pub use crate::core::{World, SimulationConfig, BodyHandle, CarView};
pub use crate::bodies::{Body, RigidBodyType, Shape, ShapeKind};
pub use crate::vehicle::{ControlInput, Controls};
pub use crate::math::Vector3;

/// Error types for the sandbox physics core
pub mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum PhysicsError {
        #[error("Invalid parameter: {0}")]
        InvalidParameter(String),

        #[error("Resource not found: {0}")]
        ResourceNotFound(String),

        #[error("A car body is already registered")]
        DuplicateCar,

        #[error("Configuration could not be parsed: {0}")]
        ConfigParse(String),
    }
}

/// Result type for physics core operations
pub type Result<T> = std::result::Result<T, error::PhysicsError>;

/// Crate version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
