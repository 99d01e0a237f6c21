use crate::bodies::Body;
use crate::collision::PairKind;
use crate::core::{BodyHandle, CarConfig};
use crate::math::Vector3;

use tracing::trace;

/// Immediate car reaction computed during detection.
///
/// These act on the car alone and are applied by the world before the
/// generic impulse, so the resolver itself stays shape-agnostic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactResponse {
    /// Reflect the car off a house wall and bleed speed.
    ///
    /// Speed becomes the reflected velocity projected onto the heading, times
    /// the bounce scale, rather than the old speed times the scale. A head-on
    /// hit therefore reverses the car instead of letting it creep into the wall.
    CarBounce {
        /// Wall normal pointing away from the house
        normal: Vector3,
    },

    /// Lift, and past the launch point throw, a car driving up a ramp
    RampBoost {
        /// Normalized position along the ramp length, in `[0, 1]`
        along: f32,
    },
}

impl ContactResponse {
    /// Applies the response to the car; returns true when the car was launched
    pub fn apply(&self, car: &mut Body, config: &CarConfig) -> bool {
        match *self {
            ContactResponse::CarBounce { normal } => {
                let velocity = car.get_velocity();
                if velocity.dot(&normal) < 0.0 {
                    let reflected = velocity.reflect(&normal);
                    car.set_velocity(reflected);
                    car.set_speed(reflected.dot(&car.get_direction()) * config.house_bounce_speed_scale);
                }
                false
            }
            ContactResponse::RampBoost { along } => {
                let speed = car.get_speed();
                if speed <= config.ramp_boost_min_speed {
                    return false;
                }

                car.velocity_mut().y += along * speed * config.ramp_lift;
                if along <= config.ramp_launch_point {
                    return false;
                }

                car.velocity_mut().y += config.ramp_launch_boost;
                car.set_on_ground(false);
                car.reset_settlement();
                trace!(along, speed, "car launched off ramp");
                true
            }
        }
    }
}

/// A detected overlap between two bodies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// First body, in call order
    pub body_a: BodyHandle,

    /// Second body, in call order
    pub body_b: BodyHandle,

    /// Shape pairing that produced the contact
    pub pair: PairKind,

    /// Unit normal pointing from `body_a` toward `body_b`
    pub normal: Vector3,

    /// Penetration depth along `normal`
    pub depth: f32,

    /// Car reaction to apply before resolution, if any
    pub response: Option<ContactResponse>,
}
