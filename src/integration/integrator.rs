use crate::bodies::Body;

/// Ground-contact transitions reported by an integration step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntegrationOutcome {
    /// The body became grounded during this step
    pub landed: bool,

    /// Forced rest fired for the first time in the current ground contact
    pub settled: bool,
}

/// Trait for per-body time integration
pub trait Integrator: Send + Sync {
    /// Advances one non-static body by `dt`
    fn integrate(&mut self, body: &mut Body, dt: f32) -> IntegrationOutcome;

    /// Returns the name of the integrator
    fn name(&self) -> &str;
}
