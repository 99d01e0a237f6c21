use crate::bodies::{body_flags::BodyFlags, RigidBodyType, Shape, ShapeKind};
use crate::math::{Vector3, Transform, Quaternion};

/// Forward direction of a car with identity orientation
pub const CAR_FORWARD: Vector3 = Vector3::new(0.0, 0.0, 1.0);

/// A simulated body: a sphere, the car, a house or a ramp
#[derive(Debug, Clone)]
pub struct Body {
    /// The body's placement in world space
    transform: Transform,

    /// The body's linear velocity
    velocity: Vector3,

    /// The body's collision shape
    shape: Shape,

    /// Dynamic or static
    body_type: RigidBodyType,

    /// The body's mass, zero for static bodies
    mass: f32,

    /// Inverse of the body's mass, zero for static bodies
    inv_mass: f32,

    /// Contact flags
    flags: BodyFlags,

    /// Consecutive frames spent in ground contact
    settlement_counter: u32,

    /// Unit heading in the ground plane (car only)
    direction: Vector3,

    /// Signed speed along `direction` (car only)
    speed: f32,
}

impl Body {
    fn new(shape: Shape, transform: Transform, body_type: RigidBodyType, mass: f32) -> Self {
        let (mass, inv_mass) = match body_type {
            RigidBodyType::Static => (0.0, 0.0),
            RigidBodyType::Dynamic if mass > 0.0 => (mass, 1.0 / mass),
            RigidBodyType::Dynamic => (mass, 0.0),
        };

        Self {
            transform,
            velocity: Vector3::zero(),
            shape,
            body_type,
            mass,
            inv_mass,
            flags: BodyFlags::empty(),
            settlement_counter: 0,
            direction: transform.rotation.rotate_vector(CAR_FORWARD),
            speed: 0.0,
        }
    }

    /// Creates a dynamic sphere
    pub fn sphere(radius: f32, mass: f32, position: Vector3) -> Self {
        Self::new(
            Shape::Sphere { radius },
            Transform::from_position(position),
            RigidBodyType::Dynamic,
            mass,
        )
    }

    /// Creates the car, facing `yaw` radians from +Z about world up
    pub fn car(half_extents: Vector3, mass: f32, position: Vector3, yaw: f32) -> Self {
        Self::new(
            Shape::Car { half_extents },
            Transform::new(position, Quaternion::from_yaw(yaw)),
            RigidBodyType::Dynamic,
            mass,
        )
    }

    /// Creates a static house block
    pub fn house(half_extents: Vector3, position: Vector3) -> Self {
        Self::new(
            Shape::House { half_extents },
            Transform::from_position(position),
            RigidBodyType::Static,
            0.0,
        )
    }

    /// Creates a static ramp rising along its local +Z, turned `yaw` radians about world up
    pub fn ramp(half_extents: Vector3, position: Vector3, yaw: f32) -> Self {
        let rotation = Quaternion::from_yaw(yaw);
        Self::new(
            Shape::ramp(half_extents, rotation),
            Transform::new(position, rotation),
            RigidBodyType::Static,
            0.0,
        )
    }

    /// Returns the body's transform
    pub fn get_transform(&self) -> Transform {
        self.transform
    }

    /// Returns the body's position
    pub fn get_position(&self) -> Vector3 {
        self.transform.position
    }

    /// Sets the body's position
    pub fn set_position(&mut self, position: Vector3) {
        self.transform.position = position;
    }

    /// Returns the body's orientation
    pub fn get_rotation(&self) -> Quaternion {
        self.transform.rotation
    }

    /// Sets the body's orientation
    pub fn set_rotation(&mut self, rotation: Quaternion) {
        self.transform.rotation = rotation;
    }

    /// Returns the body's linear velocity
    pub fn get_velocity(&self) -> Vector3 {
        self.velocity
    }

    /// Sets the body's linear velocity; ignored for static bodies
    pub fn set_velocity(&mut self, velocity: Vector3) {
        if self.is_static() {
            return;
        }
        self.velocity = velocity;
    }

    /// Mutable access to the velocity for the integrator and resolver
    pub(crate) fn velocity_mut(&mut self) -> &mut Vector3 {
        &mut self.velocity
    }

    /// Mutable access to the position for the integrator and resolver
    pub(crate) fn position_mut(&mut self) -> &mut Vector3 {
        &mut self.transform.position
    }

    /// Returns the body's shape
    pub fn get_shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the body's shape tag
    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    /// Whether this body is the car
    pub fn is_car(&self) -> bool {
        self.kind() == ShapeKind::Car
    }

    /// Returns the body type
    pub fn get_body_type(&self) -> RigidBodyType {
        self.body_type
    }

    /// Whether this body is static
    pub fn is_static(&self) -> bool {
        self.body_type == RigidBodyType::Static
    }

    /// Returns the body's mass
    pub fn get_mass(&self) -> f32 {
        self.mass
    }

    /// Returns the body's inverse mass
    pub fn get_inverse_mass(&self) -> f32 {
        self.inv_mass
    }

    /// Height of the center above the contact point on flat ground
    pub fn collision_height(&self) -> f32 {
        self.shape.collision_height()
    }

    /// Whether the body was in ground (or ramp) contact at the last test
    pub fn is_on_ground(&self) -> bool {
        self.flags.contains(BodyFlags::ON_GROUND)
    }

    /// Sets or clears ground contact
    pub fn set_on_ground(&mut self, on_ground: bool) {
        self.flags.set(BodyFlags::ON_GROUND, on_ground);
    }

    /// Consecutive frames spent in ground contact
    pub fn get_settlement_counter(&self) -> u32 {
        self.settlement_counter
    }

    pub(crate) fn increment_settlement(&mut self) -> u32 {
        self.settlement_counter = self.settlement_counter.saturating_add(1);
        self.settlement_counter
    }

    pub(crate) fn reset_settlement(&mut self) {
        self.settlement_counter = 0;
    }

    /// Heading of the car in the ground plane
    pub fn get_direction(&self) -> Vector3 {
        self.direction
    }

    pub(crate) fn set_direction(&mut self, direction: Vector3) {
        self.direction = direction;
    }

    /// Signed speed of the car along its heading
    pub fn get_speed(&self) -> f32 {
        self.speed
    }

    /// Sets the car's signed speed
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }
}
