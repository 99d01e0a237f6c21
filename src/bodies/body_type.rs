/// Type of body, determining how it behaves in the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RigidBodyType {
    /// Dynamic bodies are integrated and pushed around by contacts
    Dynamic,

    /// Static bodies never move, carry zero mass and never change velocity
    Static,
}
