use crate::bodies::Body;
use crate::core::CarConfig;
use crate::math::{Vector3, Quaternion};
use crate::vehicle::{ControlInput, Controls};

use tracing::trace;

/// Result of one controller update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CarUpdate {
    /// A jump was triggered this frame
    pub jumped: bool,
}

/// Turns held controls into the car's speed, heading and velocity
#[derive(Debug, Clone, Default)]
pub struct CarController {
    config: CarConfig,
}

impl CarController {
    /// Creates a controller with the given tuning
    pub fn new(config: CarConfig) -> Self {
        Self { config }
    }

    /// Returns the controller's tuning
    pub fn get_config(&self) -> &CarConfig {
        &self.config
    }

    /// Advances the car's motion model by `dt`.
    ///
    /// Friction is applied before new input, so a held throttle and friction
    /// both act within the same frame. Horizontal velocity is rebuilt from
    /// `direction * speed`; the vertical component carries over and picks up
    /// gravity here, ahead of the integrator's own gravity step.
    pub fn update(&self, car: &mut Body, input: &ControlInput, gravity: Vector3, dt: f32) -> CarUpdate {
        let config = &self.config;
        let on_ground = car.is_on_ground();

        let mut speed = car.get_speed() * config.friction;
        speed += input.held.throttle() * config.acceleration * dt;
        speed = speed.clamp(-config.reverse_max_speed, config.max_speed);

        if on_ground && input.held.contains(Controls::HANDBRAKE) {
            speed *= config.handbrake;
        }

        let steer = input.held.steer();
        if steer != 0.0 {
            let factor = if on_ground { 1.0 } else { config.air_turn_factor };
            let turn = Quaternion::from_yaw(config.turn_rate * steer * factor * dt);

            let direction = car.get_direction();
            car.set_direction(turn.rotate_vector(direction).normalize_or(direction));
            car.set_rotation((turn * car.get_rotation()).normalize());
        }

        car.set_speed(speed);

        let direction = car.get_direction();
        let mut velocity = direction * speed;
        velocity.y = car.get_velocity().y + gravity.y * dt;

        let mut update = CarUpdate::default();
        if input.jump_pressed && on_ground {
            velocity.y = config.jump_impulse;
            car.set_on_ground(false);
            car.reset_settlement();
            update.jumped = true;
            trace!(impulse = config.jump_impulse, "car jumped");
        }

        car.set_velocity(velocity);
        update
    }
}
