use crate::bodies::Body;
use crate::core::{CarConfig, IntegrationConfig};
use crate::integration::{Integrator, IntegrationOutcome};
use crate::math::Vector3;

use tracing::trace;

/// Explicit Euler integrator against a flat ground plane at `y = 0`.
///
/// A single restitution rule leaves bodies jittering on the ground, so rest is
/// reached through four layers, each aimed at a different failure:
///
/// 1. the ground clamp absorbs large bounces,
/// 2. the settlement counter forces rest after prolonged micro-bouncing,
/// 3. the secondary rest check stops slow lateral creep,
/// 4. the epsilon snap removes floating-point dust.
#[derive(Debug, Clone)]
pub struct SettlingIntegrator {
    config: IntegrationConfig,
    car: CarConfig,
    gravity: Vector3,
}

impl SettlingIntegrator {
    /// Creates a new settling integrator
    pub fn new(config: IntegrationConfig, car: CarConfig, gravity: Vector3) -> Self {
        Self { config, car, gravity }
    }

    /// Drag and downforce, before gravity
    fn apply_forcing(&self, body: &mut Body, dt: f32) {
        let on_ground = body.is_on_ground();
        let speed = body.get_speed();

        if body.is_car() {
            body.velocity_mut().y -= self.car.downforce * speed.abs() * dt;
        } else {
            let velocity = body.velocity_mut();
            *velocity *= self.config.air_resistance;
            if !on_ground && velocity.y < 0.0 {
                velocity.y *= self.config.fall_damping;
            }
        }
    }

    /// Height a grounded body is nudged to; scales with the body
    fn rest_height(&self, height: f32) -> f32 {
        height + height * self.config.ground_nudge
    }

    /// Ground plane test and bounce; returns true when forced rest fired
    fn resolve_ground(&self, body: &mut Body) -> bool {
        let is_car = body.is_car();
        let height = body.collision_height();

        // The contact band sits above the nudged height, or tall bodies
        // would be lifted out of contact by their own nudge.
        if body.get_position().y >= self.rest_height(height) + self.config.ground_contact_tolerance {
            body.set_on_ground(false);
            body.reset_settlement();
            return false;
        }

        let position = body.position_mut();
        if position.y < height {
            position.y = height;
        }

        if body.get_velocity().y >= 0.0 {
            return false;
        }

        let velocity = body.velocity_mut();
        if is_car {
            velocity.y = -velocity.y * self.car.ground_bounce;
            if velocity.y.abs() < self.car.bounce_cutoff {
                velocity.y = 0.0;
            }
            velocity.scale_horizontal(self.car.ground_drag);
        } else {
            velocity.y = -velocity.y * self.config.ground_restitution;
            velocity.scale_horizontal(self.config.ground_drag);
        }

        if velocity.y.abs() < self.config.on_ground_threshold {
            body.set_on_ground(true);
        }
        body.position_mut().y = self.rest_height(height);

        let frames = body.increment_settlement();
        if frames <= self.config.settlement_delay {
            return false;
        }

        let velocity = body.velocity_mut();
        if is_car {
            velocity.y = 0.0;
        } else {
            *velocity = Vector3::ZERO;
        }
        frames == self.config.settlement_delay + 1
    }

    /// Stops slow grounded bodies outright
    fn apply_rest_check(&self, body: &mut Body) {
        if !body.is_on_ground() {
            return;
        }

        let is_car = body.is_car();
        let velocity = body.velocity_mut();
        if velocity.horizontal_length_squared() < self.config.rest_horizontal_threshold
            && velocity.y.abs() < self.config.rest_vertical_threshold
        {
            if is_car {
                velocity.y = 0.0;
            } else {
                *velocity = Vector3::ZERO;
            }
        }
    }
}

impl Integrator for SettlingIntegrator {
    fn integrate(&mut self, body: &mut Body, dt: f32) -> IntegrationOutcome {
        if body.is_static() {
            return IntegrationOutcome::default();
        }

        let was_on_ground = body.is_on_ground();

        let velocity = body.get_velocity();
        *body.position_mut() += velocity * dt;

        self.apply_forcing(body, dt);
        *body.velocity_mut() += self.gravity * dt;

        let settled = self.resolve_ground(body);
        self.apply_rest_check(body);
        body.velocity_mut().snap_small(self.config.velocity_epsilon);

        let landed = !was_on_ground && body.is_on_ground();
        if landed {
            trace!(y = body.get_position().y, "body landed");
        }

        IntegrationOutcome { landed, settled }
    }

    fn name(&self) -> &str {
        "SettlingEuler"
    }
}
