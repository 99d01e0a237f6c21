use crate::bodies::Body;
use crate::collision::{Contact, ContactResponse, PairKind};
use crate::core::ContactConfig;

use tracing::trace;

/// Outcome of resolving one contact
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Resolution {
    /// Normal impulse applied, zero when nothing was done
    pub impulse: f32,
}

/// Single-pass impulse solver with partial positional correction.
///
/// Each contact is resolved once, in detection order. There is no iteration
/// and no angular term; bodies carry linear velocity only.
#[derive(Debug, Clone, Default)]
pub struct ImpulseResolver {
    config: ContactConfig,
}

impl ImpulseResolver {
    /// Creates a new resolver with the given tuning
    pub fn new(config: ContactConfig) -> Self {
        Self { config }
    }

    /// Returns the resolver's tuning
    pub fn get_config(&self) -> &ContactConfig {
        &self.config
    }

    /// Restitution for a pair closing at `closing_speed`
    pub fn restitution(&self, pair: PairKind, closing_speed: f32) -> f32 {
        let config = &self.config;
        let base = if pair.involves_ramp() {
            config.ramp_restitution
        } else if pair.involves_house() {
            config.house_restitution
        } else if pair == PairKind::SphereSphere {
            config.object_restitution * config.sphere_sphere_factor
        } else {
            config.object_restitution
        };

        if closing_speed.abs() > config.high_speed_threshold {
            base * config.high_speed_factor
        } else {
            base
        }
    }

    /// Fraction of the penetration depth removed in one step
    pub fn correction_factor(&self, pair: PairKind) -> f32 {
        match pair {
            PairKind::CarRamp | PairKind::SphereRamp => self.config.ramp_correction,
            PairKind::CarHouse => self.config.car_house_correction,
            _ => self.config.correction,
        }
    }

    /// Resolves a contact between `a` and `b`, given in the contact's body order.
    ///
    /// Separating pairs are left untouched, including their positions. A
    /// car-house contact has already had its velocity reflected by the bounce
    /// response, so it skips the impulse and only receives the correction.
    pub fn resolve(&self, contact: &Contact, a: &mut Body, b: &mut Body) -> Resolution {
        if a.is_static() && b.is_static() {
            return Resolution::default();
        }

        let impulse = if matches!(contact.response, Some(ContactResponse::CarBounce { .. })) {
            0.0
        } else {
            match self.apply_impulse(contact, a, b) {
                Some(impulse) => impulse,
                None => return Resolution::default(),
            }
        };

        let correction = contact.depth * self.correction_factor(contact.pair);
        let normal = contact.normal;
        match (a.is_static(), b.is_static()) {
            (false, false) => {
                let (mass_a, mass_b) = (a.get_mass(), b.get_mass());
                let total = mass_a + mass_b;
                *a.position_mut() -= normal * (correction * mass_b / total);
                *b.position_mut() += normal * (correction * mass_a / total);
            }
            (false, true) => *a.position_mut() -= normal * correction,
            (true, false) => *b.position_mut() += normal * correction,
            (true, true) => {}
        }

        trace!(pair = ?contact.pair, impulse, correction, "contact resolved");
        Resolution { impulse }
    }

    /// Velocity phase; `None` when the bodies are already separating
    fn apply_impulse(&self, contact: &Contact, a: &mut Body, b: &mut Body) -> Option<f32> {
        let normal = contact.normal;
        let closing = (b.get_velocity() - a.get_velocity()).dot(&normal);
        if closing >= 0.0 {
            return None;
        }

        let restitution = self.restitution(contact.pair, closing);

        if contact.pair == PairKind::CarRamp {
            for body in [&mut *a, &mut *b] {
                if body.is_car() && body.get_velocity().y < 0.0 {
                    body.velocity_mut().y *= self.config.ramp_fall_damping;
                    body.set_on_ground(true);
                }
            }
        }

        let relative = (b.get_velocity() - a.get_velocity()).dot(&normal);
        let impulse = if relative < 0.0 {
            -(1.0 + restitution) * relative
        } else {
            0.0
        };

        let inv_a = a.get_inverse_mass();
        let inv_b = b.get_inverse_mass();
        match (a.is_static(), b.is_static()) {
            (false, false) => {
                let share = impulse / (inv_a + inv_b);
                *a.velocity_mut() -= normal * (share * inv_a);
                *b.velocity_mut() += normal * (share * inv_b);
            }
            (false, true) => *a.velocity_mut() -= normal * impulse,
            (true, false) => *b.velocity_mut() += normal * impulse,
            (true, true) => {}
        }

        for body in [&mut *a, &mut *b] {
            self.damp(body);
        }

        Some(impulse)
    }

    /// Post-impulse damping, keeping the car's speed model in step
    fn damp(&self, body: &mut Body) {
        if body.is_static() {
            return;
        }

        *body.velocity_mut() *= self.config.post_impulse_damping;
        if body.is_car() {
            let speed = body.get_velocity().dot(&body.get_direction());
            body.set_speed(speed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BodyHandle;
    use crate::math::Vector3;
    use approx::assert_relative_eq;

    fn contact(pair: PairKind, normal: Vector3, depth: f32) -> Contact {
        Contact {
            body_a: BodyHandle(0),
            body_b: BodyHandle(1),
            pair,
            normal,
            depth,
            response: None,
        }
    }

    #[test]
    fn equal_spheres_exchange_momentum() {
        let resolver = ImpulseResolver::default();
        let mut a = Body::sphere(1.0, 2.0, Vector3::new(0.0, 1.0, 0.0));
        let mut b = Body::sphere(1.0, 2.0, Vector3::new(1.9, 1.0, 0.0));
        a.set_velocity(Vector3::new(2.0, 0.0, 0.0));
        b.set_velocity(Vector3::new(-2.0, 0.0, 0.0));

        let normal = Vector3::new(1.0, 0.0, 0.0);
        let resolution = resolver.resolve(&contact(PairKind::SphereSphere, normal, 0.1), &mut a, &mut b);
        assert!(resolution.impulse > 0.0);

        let config = ContactConfig::default();
        let restitution = config.object_restitution * config.sphere_sphere_factor;
        let separating = (b.get_velocity() - a.get_velocity()).dot(&normal);
        assert_relative_eq!(separating, 4.0 * restitution * config.post_impulse_damping, epsilon = 1.0e-4);

        // Equal masses share the correction evenly.
        assert_relative_eq!(a.get_position().x, -0.01, epsilon = 1.0e-5);
        assert_relative_eq!(b.get_position().x, 1.91, epsilon = 1.0e-5);
    }

    #[test]
    fn separating_pair_is_untouched() {
        let resolver = ImpulseResolver::default();
        let mut a = Body::sphere(1.0, 1.0, Vector3::new(0.0, 1.0, 0.0));
        let mut b = Body::sphere(1.0, 1.0, Vector3::new(1.5, 1.0, 0.0));
        a.set_velocity(Vector3::new(-1.0, 0.0, 0.0));
        b.set_velocity(Vector3::new(1.0, 0.0, 0.0));

        let resolution = resolver.resolve(
            &contact(PairKind::SphereSphere, Vector3::new(1.0, 0.0, 0.0), 0.5),
            &mut a,
            &mut b,
        );

        assert_eq!(resolution.impulse, 0.0);
        assert_eq!(a.get_velocity(), Vector3::new(-1.0, 0.0, 0.0));
        assert_eq!(b.get_position(), Vector3::new(1.5, 1.0, 0.0));
    }

    #[test]
    fn static_side_takes_nothing() {
        let resolver = ImpulseResolver::default();
        let mut house = Body::house(Vector3::new(2.0, 2.0, 2.0), Vector3::new(0.0, 2.0, 0.0));
        let mut sphere = Body::sphere(1.0, 1.0, Vector3::new(2.5, 1.0, 0.0));
        sphere.set_velocity(Vector3::new(-3.0, 0.0, 0.0));

        resolver.resolve(
            &contact(PairKind::SphereHouse, Vector3::new(1.0, 0.0, 0.0), 0.5),
            &mut house,
            &mut sphere,
        );

        assert_eq!(house.get_position(), Vector3::new(0.0, 2.0, 0.0));
        assert_eq!(house.get_velocity(), Vector3::ZERO);

        let config = ContactConfig::default();
        let expected = 3.0 * config.house_restitution * config.post_impulse_damping;
        assert_relative_eq!(sphere.get_velocity().x, expected, epsilon = 1.0e-5);
        assert_relative_eq!(sphere.get_position().x, 2.5 + 0.5 * config.correction, epsilon = 1.0e-5);
    }

    #[test]
    fn ramp_restitution_overrides_pair_rules() {
        let resolver = ImpulseResolver::default();
        let config = ContactConfig::default();
        assert_eq!(resolver.restitution(PairKind::SphereRamp, -1.0), config.ramp_restitution);
        assert_eq!(resolver.restitution(PairKind::CarHouse, -1.0), config.house_restitution);
        assert_relative_eq!(
            resolver.restitution(PairKind::CarSphere, -20.0),
            config.object_restitution * config.high_speed_factor,
            epsilon = 1.0e-6
        );
    }

    #[test]
    fn falling_car_lands_on_ramp() {
        let resolver = ImpulseResolver::default();
        let mut car = Body::car(Vector3::new(1.0, 0.5, 2.0), 1000.0, Vector3::new(0.0, 1.5, 0.0), 0.0);
        let mut ramp = Body::ramp(Vector3::new(3.0, 1.0, 4.0), Vector3::new(0.0, 1.0, 0.0), 0.0);
        car.set_velocity(Vector3::new(0.0, -5.0, 0.0));

        let normal = Vector3::new(0.0, -1.0, 0.0);
        resolver.resolve(&contact(PairKind::CarRamp, normal, 0.2), &mut car, &mut ramp);

        assert!(car.is_on_ground());
        assert!(car.get_velocity().y >= 0.0);
        assert_relative_eq!(car.get_position().y, 1.5 + 0.2 * ContactConfig::default().ramp_correction, epsilon = 1.0e-5);
    }

    #[test]
    fn bounced_car_is_only_pushed_out() {
        let resolver = ImpulseResolver::default();
        let mut car = Body::car(Vector3::new(1.0, 0.5, 2.0), 1000.0, Vector3::new(0.0, 0.5, 22.9), 0.0);
        let mut house = Body::house(Vector3::new(5.0, 3.0, 5.0), Vector3::new(0.0, 3.0, 30.0));
        car.set_velocity(Vector3::new(0.0, 0.0, -4.0));

        let mut bounce = contact(PairKind::CarHouse, Vector3::new(0.0, 0.0, 1.0), 0.1);
        bounce.response = Some(ContactResponse::CarBounce { normal: Vector3::new(0.0, 0.0, -1.0) });
        let resolution = resolver.resolve(&bounce, &mut car, &mut house);

        assert_eq!(resolution.impulse, 0.0);
        assert_eq!(car.get_velocity(), Vector3::new(0.0, 0.0, -4.0));
        let config = ContactConfig::default();
        assert_relative_eq!(car.get_position().z, 22.9 - 0.1 * config.car_house_correction, epsilon = 1.0e-5);
    }

    #[test]
    fn car_speed_follows_impulse() {
        let resolver = ImpulseResolver::default();
        let mut car = Body::car(Vector3::new(1.0, 0.5, 2.0), 1000.0, Vector3::new(0.0, 0.5, 0.0), 0.0);
        let mut sphere = Body::sphere(1.0, 10.0, Vector3::new(0.0, 0.5, 2.5));
        car.set_speed(5.0);
        car.set_velocity(Vector3::new(0.0, 0.0, 5.0));

        resolver.resolve(&contact(PairKind::CarSphere, Vector3::new(0.0, 0.0, 1.0), 0.5), &mut car, &mut sphere);

        assert!(car.get_speed() < 5.0);
        assert_relative_eq!(car.get_speed(), car.get_velocity().z, epsilon = 1.0e-5);
        assert!(sphere.get_velocity().z > 0.0);
    }
}
