pub mod world;
pub mod config;
pub mod storage;
pub mod events;

pub use self::world::{World, CarView};
pub use self::config::{SimulationConfig, CarConfig, IntegrationConfig, ContactConfig};
pub use self::storage::BodyStorage;
pub use self::events::{EventQueue, CollisionEvent, BodyEvent, BodyEventType};

/// A unique identifier for a body in the world.
///
/// Bodies are never removed, so a handle is simply the registration index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub(crate) u32);

impl BodyHandle {
    /// Registration index of the body
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}
