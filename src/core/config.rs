use crate::error::PhysicsError;
use crate::math::Vector3;
use crate::Result;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Tuning for the car's planar motion model and its special contacts
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(default))]
pub struct CarConfig {
    /// Speed gained per second while accelerating
    pub acceleration: f32,

    /// Forward speed cap
    pub max_speed: f32,

    /// Reverse speed cap (positive magnitude)
    pub reverse_max_speed: f32,

    /// Heading change per second while turning on the ground (radians)
    pub turn_rate: f32,

    /// Fraction of `turn_rate` available while airborne
    pub air_turn_factor: f32,

    /// Per-frame speed multiplier applied before new input
    pub friction: f32,

    /// Extra per-frame speed multiplier while the handbrake is held on the ground
    pub handbrake: f32,

    /// Vertical velocity set by a jump
    pub jump_impulse: f32,

    /// Downward acceleration per unit of |speed|
    pub downforce: f32,

    /// Fraction of vertical speed returned when the car hits the ground
    pub ground_bounce: f32,

    /// Ground bounces slower than this are snapped to zero
    pub bounce_cutoff: f32,

    /// Horizontal velocity multiplier on ground impact
    pub ground_drag: f32,

    /// Speed multiplier applied when the car bounces off a house
    pub house_bounce_speed_scale: f32,

    /// Minimum forward speed for a ramp to add lift
    pub ramp_boost_min_speed: f32,

    /// Upward velocity per unit of (ramp progress * speed)
    pub ramp_lift: f32,

    /// Extra upward velocity once past `ramp_launch_point`
    pub ramp_launch_boost: f32,

    /// Normalized ramp progress after which the car is launched airborne
    pub ramp_launch_point: f32,
}

impl Default for CarConfig {
    fn default() -> Self {
        Self {
            acceleration: 20.0,
            max_speed: 30.0,
            reverse_max_speed: 10.0,
            turn_rate: 2.5,
            air_turn_factor: 0.3,
            friction: 0.98,
            handbrake: 0.9,
            jump_impulse: 8.0,
            downforce: 0.1,
            ground_bounce: 0.05,
            bounce_cutoff: 0.1,
            ground_drag: 0.98,
            house_bounce_speed_scale: 0.8,
            ramp_boost_min_speed: 5.0,
            ramp_lift: 0.15,
            ramp_launch_boost: 4.0,
            ramp_launch_point: 0.8,
        }
    }
}

/// Tuning for drag, ground contact and the rest heuristics
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(default))]
pub struct IntegrationConfig {
    /// Per-frame velocity multiplier for non-car bodies
    pub air_resistance: f32,

    /// Extra vertical multiplier for airborne, descending non-car bodies
    pub fall_damping: f32,

    /// Fraction of vertical speed returned by a ground bounce (non-car bodies)
    pub ground_restitution: f32,

    /// Horizontal velocity multiplier on ground impact (non-car bodies)
    pub ground_drag: f32,

    /// A bounce slower than this marks the body as grounded
    pub on_ground_threshold: f32,

    /// Bodies this close above their nudged rest height still touch the ground
    pub ground_contact_tolerance: f32,

    /// Fraction of collision height a grounded body is lifted by
    pub ground_nudge: f32,

    /// Consecutive ground frames before velocity is forced to rest
    pub settlement_delay: u32,

    /// Squared horizontal speed under which a grounded body is stopped
    pub rest_horizontal_threshold: f32,

    /// Vertical speed under which a grounded body is stopped
    pub rest_vertical_threshold: f32,

    /// Velocity components smaller than this are zeroed
    pub velocity_epsilon: f32,
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            air_resistance: 0.995,
            fall_damping: 0.99,
            ground_restitution: 0.3,
            ground_drag: 0.95,
            on_ground_threshold: 0.1,
            ground_contact_tolerance: 0.01,
            ground_nudge: 0.001,
            settlement_delay: 10,
            rest_horizontal_threshold: 0.01,
            rest_vertical_threshold: 0.1,
            velocity_epsilon: 0.001,
        }
    }
}

/// Tuning for contact detection and impulse resolution
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(default))]
pub struct ContactConfig {
    /// Restitution for any pair involving a house
    pub house_restitution: f32,

    /// Restitution for car/sphere pairs
    pub object_restitution: f32,

    /// Multiplier on `object_restitution` for sphere-sphere pairs
    pub sphere_sphere_factor: f32,

    /// Restitution for any pair involving a ramp
    pub ramp_restitution: f32,

    /// Closing speed above which restitution is reduced further
    pub high_speed_threshold: f32,

    /// Restitution multiplier for hard impacts
    pub high_speed_factor: f32,

    /// Vertical velocity multiplier for a car falling onto a ramp
    pub ramp_fall_damping: f32,

    /// Velocity multiplier applied after every impulse
    pub post_impulse_damping: f32,

    /// Fraction of depth corrected for generic contacts
    pub correction: f32,

    /// Fraction of depth corrected for car-house contacts
    pub car_house_correction: f32,

    /// Fraction of depth corrected for ramp contacts
    pub ramp_correction: f32,

    /// Margin added to car-house overlap tests
    pub house_buffer: f32,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            house_restitution: 0.3,
            object_restitution: 0.6,
            sphere_sphere_factor: 0.7,
            ramp_restitution: 0.1,
            high_speed_threshold: 10.0,
            high_speed_factor: 0.7,
            ramp_fall_damping: 0.2,
            post_impulse_damping: 0.95,
            correction: 0.2,
            car_house_correction: 0.3,
            ramp_correction: 0.05,
            house_buffer: 0.1,
        }
    }
}

/// Configuration parameters for the sandbox simulation
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(default))]
pub struct SimulationConfig {
    /// Constant gravity acceleration
    pub gravity: Vector3,

    /// Upper bound on a single step's `dt`
    pub max_time_step: f32,

    /// Car controller tuning
    pub car: CarConfig,

    /// Integrator tuning
    pub integration: IntegrationConfig,

    /// Contact tuning
    pub contact: ContactConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity: Vector3::new(0.0, -9.8, 0.0),
            max_time_step: 0.1,
            car: CarConfig::default(),
            integration: IntegrationConfig::default(),
            contact: ContactConfig::default(),
        }
    }
}

fn check_finite(name: &str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PhysicsError::InvalidParameter(format!("{name} must be finite, got {value}")))
    }
}

fn check_positive(name: &str, value: f32) -> Result<()> {
    check_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(PhysicsError::InvalidParameter(format!("{name} must be positive, got {value}")))
    }
}

fn check_non_negative(name: &str, value: f32) -> Result<()> {
    check_finite(name, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(PhysicsError::InvalidParameter(format!("{name} must not be negative, got {value}")))
    }
}

fn check_unit(name: &str, value: f32) -> Result<()> {
    check_finite(name, value)?;
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(PhysicsError::InvalidParameter(format!("{name} must lie in [0, 1], got {value}")))
    }
}

impl SimulationConfig {
    /// Checks every tunable for finiteness and range
    pub fn validate(&self) -> Result<()> {
        if !self.gravity.is_finite() {
            return Err(PhysicsError::InvalidParameter(format!(
                "gravity must be finite, got {}",
                self.gravity
            )));
        }
        check_positive("max_time_step", self.max_time_step)?;

        let car = &self.car;
        check_non_negative("car.acceleration", car.acceleration)?;
        check_positive("car.max_speed", car.max_speed)?;
        check_non_negative("car.reverse_max_speed", car.reverse_max_speed)?;
        check_non_negative("car.turn_rate", car.turn_rate)?;
        check_unit("car.air_turn_factor", car.air_turn_factor)?;
        check_unit("car.friction", car.friction)?;
        check_unit("car.handbrake", car.handbrake)?;
        check_non_negative("car.jump_impulse", car.jump_impulse)?;
        check_non_negative("car.downforce", car.downforce)?;
        check_unit("car.ground_bounce", car.ground_bounce)?;
        check_non_negative("car.bounce_cutoff", car.bounce_cutoff)?;
        check_unit("car.ground_drag", car.ground_drag)?;
        check_unit("car.house_bounce_speed_scale", car.house_bounce_speed_scale)?;
        check_non_negative("car.ramp_boost_min_speed", car.ramp_boost_min_speed)?;
        check_non_negative("car.ramp_lift", car.ramp_lift)?;
        check_non_negative("car.ramp_launch_boost", car.ramp_launch_boost)?;
        check_unit("car.ramp_launch_point", car.ramp_launch_point)?;

        let integration = &self.integration;
        check_unit("integration.air_resistance", integration.air_resistance)?;
        check_unit("integration.fall_damping", integration.fall_damping)?;
        check_unit("integration.ground_restitution", integration.ground_restitution)?;
        check_unit("integration.ground_drag", integration.ground_drag)?;
        check_non_negative("integration.on_ground_threshold", integration.on_ground_threshold)?;
        check_non_negative("integration.ground_contact_tolerance", integration.ground_contact_tolerance)?;
        check_unit("integration.ground_nudge", integration.ground_nudge)?;
        check_non_negative("integration.rest_horizontal_threshold", integration.rest_horizontal_threshold)?;
        check_non_negative("integration.rest_vertical_threshold", integration.rest_vertical_threshold)?;
        check_non_negative("integration.velocity_epsilon", integration.velocity_epsilon)?;

        let contact = &self.contact;
        check_unit("contact.house_restitution", contact.house_restitution)?;
        check_unit("contact.object_restitution", contact.object_restitution)?;
        check_unit("contact.sphere_sphere_factor", contact.sphere_sphere_factor)?;
        check_unit("contact.ramp_restitution", contact.ramp_restitution)?;
        check_non_negative("contact.high_speed_threshold", contact.high_speed_threshold)?;
        check_unit("contact.high_speed_factor", contact.high_speed_factor)?;
        check_unit("contact.ramp_fall_damping", contact.ramp_fall_damping)?;
        check_unit("contact.post_impulse_damping", contact.post_impulse_damping)?;
        check_unit("contact.correction", contact.correction)?;
        check_unit("contact.car_house_correction", contact.car_house_correction)?;
        check_unit("contact.ramp_correction", contact.ramp_correction)?;
        check_non_negative("contact.house_buffer", contact.house_buffer)?;

        Ok(())
    }

    /// Parses a configuration from JSON; missing fields take their defaults
    #[cfg(feature = "serialize")]
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| PhysicsError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration to pretty-printed JSON
    #[cfg(feature = "serialize")]
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| PhysicsError::ConfigParse(e.to_string()))
    }
}
