mod integrator;
mod settling;

pub use self::integrator::{Integrator, IntegrationOutcome};
pub use self::settling::SettlingIntegrator;
