use crate::bodies::{Body, Shape};
use crate::collision::{Contact, ContactResponse, PairKind};
use crate::core::{BodyHandle, ContactConfig};
use crate::math::{clamp, lerp, Aabb, Vector3};

/// Overlap found by a pair test, expressed in the pair's canonical role order
#[derive(Debug, Clone, Copy)]
struct Hit {
    normal: Vector3,
    depth: f32,
    response: Option<ContactResponse>,
}

impl Hit {
    fn new(normal: Vector3, depth: f32) -> Self {
        Self { normal, depth, response: None }
    }

    fn with_response(mut self, response: ContactResponse) -> Self {
        self.response = Some(response);
        self
    }
}

/// Runs the narrow-phase test for one pair of bodies.
///
/// Returns `None` when both bodies are static, when the pairing has no test,
/// or when the shapes do not overlap. The contact normal always points from
/// `a` toward `b`, whichever order the shapes arrive in.
pub fn detect(
    handle_a: BodyHandle,
    a: &Body,
    handle_b: BodyHandle,
    b: &Body,
    config: &ContactConfig,
) -> Option<Contact> {
    if a.is_static() && b.is_static() {
        return None;
    }

    let (pair, swapped) = PairKind::classify(a.kind(), b.kind());
    let (first, second) = if swapped { (b, a) } else { (a, b) };

    let hit = match pair {
        PairKind::SphereSphere => sphere_sphere(first, second),
        PairKind::CarSphere => car_sphere(first, second),
        PairKind::CarHouse => house_car(first, second, config.house_buffer),
        PairKind::SphereHouse => house_sphere(first, second),
        PairKind::CarRamp => car_ramp(first, second),
        PairKind::SphereRamp => sphere_ramp(first, second),
        PairKind::Unsupported => None,
    }?;

    let normal = if swapped { -hit.normal } else { hit.normal };

    Some(Contact {
        body_a: handle_a,
        body_b: handle_b,
        pair,
        normal,
        depth: hit.depth,
        response: hit.response,
    })
}

/// Overlap of two circles (or spheres) given as center and radius
fn round_overlap(center_a: Vector3, radius_a: f32, center_b: Vector3, radius_b: f32) -> Option<Hit> {
    let delta = center_b - center_a;
    let distance = delta.length();
    let combined = radius_a + radius_b;

    if distance >= combined {
        return None;
    }

    Some(Hit::new(delta.normalize_or(Vector3::UP), combined - distance))
}

fn sphere_sphere(a: &Body, b: &Body) -> Option<Hit> {
    round_overlap(
        a.get_position(),
        a.get_shape().radius()?,
        b.get_position(),
        b.get_shape().radius()?,
    )
}

/// The car counts as the circle circumscribing its horizontal footprint here
fn car_sphere(car: &Body, sphere: &Body) -> Option<Hit> {
    let half = car.get_shape().half_extents()?;
    round_overlap(
        car.get_position(),
        half.x.max(half.z),
        sphere.get_position(),
        sphere.get_shape().radius()?,
    )
}

/// Axis-aligned box test, separating along the axis of least penetration
fn house_car(house: &Body, car: &Body, buffer: f32) -> Option<Hit> {
    let house_half = house.get_shape().half_extents()?;
    let car_half = car.get_shape().half_extents()?;

    let delta = car.get_position() - house.get_position();
    let overlap = house_half + car_half - delta.abs();

    if overlap.x + buffer <= 0.0 || overlap.y + buffer <= 0.0 || overlap.z + buffer <= 0.0 {
        return None;
    }

    let sign = |component: f32| if component < 0.0 { -1.0 } else { 1.0 };
    let (normal, depth) = if overlap.x <= overlap.y && overlap.x <= overlap.z {
        (Vector3::new(sign(delta.x), 0.0, 0.0), overlap.x)
    } else if overlap.y <= overlap.z {
        (Vector3::new(0.0, sign(delta.y), 0.0), overlap.y)
    } else {
        (Vector3::new(0.0, 0.0, sign(delta.z)), overlap.z)
    };

    Some(Hit::new(normal, depth.max(0.0)).with_response(ContactResponse::CarBounce { normal }))
}

fn house_sphere(house: &Body, sphere: &Body) -> Option<Hit> {
    let half = house.get_shape().half_extents()?;
    let radius = sphere.get_shape().radius()?;

    let center = sphere.get_position();
    let closest = Aabb::from_center_half_extents(house.get_position(), half).closest_point(center);
    let delta = center - closest;
    let distance = delta.length();

    if distance >= radius {
        return None;
    }

    Some(Hit::new(delta.normalize_or(Vector3::UP), radius - distance))
}

/// Ramp surface height under `point`, in ramp-local space
fn ramp_surface(ramp: &Body, half: Vector3, point: Vector3) -> (Vector3, f32, f32) {
    let local = ramp.get_transform().inverse_transform_point(point);
    let along = clamp((local.z + half.z) / (2.0 * half.z), 0.0, 1.0);
    (local, along, lerp(-half.y, half.y, along))
}

fn car_ramp(car: &Body, ramp: &Body) -> Option<Hit> {
    let car_half = car.get_shape().half_extents()?;
    let Shape::Ramp { half_extents, slope } = *ramp.get_shape() else {
        return None;
    };

    let car_bounds = Aabb::from_center_half_extents(car.get_position(), car_half);
    let ramp_bounds = Aabb::from_oriented_box(&ramp.get_transform(), half_extents);
    if !car_bounds.intersects(&ramp_bounds) {
        return None;
    }

    let (local, along, surface) = ramp_surface(ramp, half_extents, car.get_position());
    let depth = surface + car_half.y - local.y;
    if depth <= 0.0 {
        return None;
    }

    Some(Hit::new(-slope, depth).with_response(ContactResponse::RampBoost { along }))
}

fn sphere_ramp(sphere: &Body, ramp: &Body) -> Option<Hit> {
    let radius = sphere.get_shape().radius()?;
    let Shape::Ramp { half_extents, slope } = *ramp.get_shape() else {
        return None;
    };

    let center = sphere.get_position();
    let bounds = Aabb::from_oriented_box(&ramp.get_transform(), half_extents).expand(radius);
    if !bounds.contains_point(center) {
        return None;
    }

    let (local, _, surface) = ramp_surface(ramp, half_extents, center);
    let depth = surface + radius - local.y;
    if depth <= 0.0 {
        return None;
    }

    Some(Hit::new(-slope, depth))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const CAR_HALF: Vector3 = Vector3::new(1.0, 0.5, 2.0);

    fn handles() -> (BodyHandle, BodyHandle) {
        (BodyHandle(0), BodyHandle(1))
    }

    fn detect_pair(a: &Body, b: &Body) -> Option<Contact> {
        let (ha, hb) = handles();
        detect(ha, a, hb, b, &ContactConfig::default())
    }

    #[test]
    fn sphere_sphere_overlap() {
        let a = Body::sphere(1.0, 1.0, Vector3::new(0.0, 1.0, 0.0));
        let b = Body::sphere(1.0, 1.0, Vector3::new(1.5, 1.0, 0.0));

        let contact = detect_pair(&a, &b).expect("spheres overlap");
        assert_eq!(contact.pair, PairKind::SphereSphere);
        assert_relative_eq!(contact.normal.x, 1.0, epsilon = 1.0e-6);
        assert_relative_eq!(contact.depth, 0.5, epsilon = 1.0e-6);
    }

    #[test]
    fn separated_spheres_have_no_contact() {
        let a = Body::sphere(1.0, 1.0, Vector3::new(0.0, 1.0, 0.0));
        let b = Body::sphere(1.0, 1.0, Vector3::new(2.5, 1.0, 0.0));
        assert!(detect_pair(&a, &b).is_none());
    }

    #[test]
    fn coincident_centers_fall_back_to_up() {
        let a = Body::sphere(1.0, 1.0, Vector3::new(3.0, 1.0, 3.0));
        let b = Body::sphere(0.5, 1.0, Vector3::new(3.0, 1.0, 3.0));

        let contact = detect_pair(&a, &b).expect("coincident spheres overlap");
        assert_eq!(contact.normal, Vector3::UP);
        assert!(contact.normal.is_finite());
        assert_relative_eq!(contact.depth, 1.5, epsilon = 1.0e-6);
    }

    #[test]
    fn normal_follows_call_order() {
        let car = Body::car(CAR_HALF, 1000.0, Vector3::new(0.0, 0.5, 0.0), 0.0);
        let sphere = Body::sphere(1.0, 1.0, Vector3::new(2.5, 0.5, 0.0));

        let forward = detect_pair(&car, &sphere).expect("car reaches the sphere");
        let reverse = detect_pair(&sphere, &car).expect("sphere reaches the car");

        assert_eq!(forward.pair, PairKind::CarSphere);
        assert_relative_eq!(forward.normal.x, 1.0, epsilon = 1.0e-6);
        assert_relative_eq!(reverse.normal.x, -1.0, epsilon = 1.0e-6);
        assert_relative_eq!(forward.depth, reverse.depth, epsilon = 1.0e-6);
    }

    #[test]
    fn car_sphere_uses_circumscribed_circle() {
        // Outside the car box on X, inside the circle of radius max(hx, hz) = 2.
        let car = Body::car(CAR_HALF, 1000.0, Vector3::new(0.0, 0.5, 0.0), 0.0);
        let sphere = Body::sphere(0.5, 1.0, Vector3::new(2.2, 0.5, 0.0));

        let contact = detect_pair(&car, &sphere).expect("within circumscribed circle");
        assert_relative_eq!(contact.depth, 0.3, epsilon = 1.0e-5);
    }

    #[test]
    fn car_house_picks_shallowest_axis() {
        let house = Body::house(Vector3::new(3.0, 3.0, 3.0), Vector3::new(0.0, 3.0, 0.0));
        let car = Body::car(CAR_HALF, 1000.0, Vector3::new(0.0, 0.5, -4.5), 0.0);

        let contact = detect_pair(&car, &house).expect("car touches the house");
        assert_eq!(contact.pair, PairKind::CarHouse);
        // From the car toward the house.
        assert_eq!(contact.normal, Vector3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(contact.depth, 0.5, epsilon = 1.0e-5);
        match contact.response {
            Some(ContactResponse::CarBounce { normal }) => assert_eq!(normal, Vector3::new(0.0, 0.0, -1.0)),
            other => panic!("expected a bounce, got {:?}", other),
        }
    }

    #[test]
    fn car_house_buffer_extends_reach() {
        let house = Body::house(Vector3::new(3.0, 3.0, 3.0), Vector3::new(0.0, 3.0, 0.0));
        let car = Body::car(CAR_HALF, 1000.0, Vector3::new(0.0, 0.5, -5.05), 0.0);

        let contact = detect_pair(&house, &car).expect("within the buffer");
        assert_eq!(contact.depth, 0.0);

        let far = Body::car(CAR_HALF, 1000.0, Vector3::new(0.0, 0.5, -5.5), 0.0);
        assert!(detect_pair(&house, &far).is_none());
    }

    #[test]
    fn sphere_house_pushes_out_of_wall() {
        let house = Body::house(Vector3::new(2.0, 2.0, 2.0), Vector3::new(0.0, 2.0, 0.0));
        let sphere = Body::sphere(1.0, 1.0, Vector3::new(2.5, 1.0, 0.0));

        let contact = detect_pair(&house, &sphere).expect("sphere touches the wall");
        assert_eq!(contact.pair, PairKind::SphereHouse);
        assert_relative_eq!(contact.normal.x, 1.0, epsilon = 1.0e-6);
        assert_relative_eq!(contact.depth, 0.5, epsilon = 1.0e-6);
    }

    #[test]
    fn car_on_ramp_reports_position_along() {
        // Ramp half height 1 and half length 4 centered at y = 1; surface at z = 2.4 is y = 1.6.
        let ramp = Body::ramp(Vector3::new(3.0, 1.0, 4.0), Vector3::new(0.0, 1.0, 0.0), 0.0);
        let car = Body::car(CAR_HALF, 1000.0, Vector3::new(0.0, 2.0, 2.4), 0.0);

        let contact = detect_pair(&car, &ramp).expect("car rests on the ramp");
        assert_eq!(contact.pair, PairKind::CarRamp);
        assert_relative_eq!(contact.depth, 0.1, epsilon = 1.0e-5);
        assert!(contact.normal.y < 0.0);
        match contact.response {
            Some(ContactResponse::RampBoost { along }) => assert_relative_eq!(along, 0.8, epsilon = 1.0e-5),
            other => panic!("expected a ramp boost, got {:?}", other),
        }
    }

    #[test]
    fn sphere_ramp_uses_surface_height() {
        let ramp = Body::ramp(Vector3::new(3.0, 1.0, 4.0), Vector3::new(0.0, 1.0, 0.0), 0.0);
        let sphere = Body::sphere(0.5, 1.0, Vector3::new(0.0, 0.3, -4.0));
        let contact = detect_pair(&ramp, &sphere).expect("sphere sinks into the low end");
        // From the ramp toward the sphere.
        assert!(contact.normal.y > 0.0);
        assert_relative_eq!(contact.depth, 0.2, epsilon = 1.0e-5);

        let high = Body::sphere(0.5, 1.0, Vector3::new(0.0, 3.0, -4.0));
        assert!(detect_pair(&ramp, &high).is_none());
    }

    #[test]
    fn static_pairs_are_skipped() {
        let house = Body::house(Vector3::new(1.0, 1.0, 1.0), Vector3::ZERO);
        let ramp = Body::ramp(Vector3::new(1.0, 1.0, 1.0), Vector3::ZERO, 0.0);
        assert!(detect_pair(&house, &ramp).is_none());
        assert!(detect_pair(&house, &house.clone()).is_none());
    }
}
