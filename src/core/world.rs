use crate::core::{
    BodyHandle, SimulationConfig, EventQueue, CollisionEvent, BodyEventType, BodyStorage,
};
use crate::bodies::{Body, RigidBodyType};
use crate::collision::{self, ImpulseResolver};
use crate::error::PhysicsError;
use crate::integration::{Integrator, SettlingIntegrator};
use crate::math::Vector3;
use crate::vehicle::{CarController, ControlInput};
use crate::Result;

use tracing::{debug, trace, warn};

/// What the camera collaborator needs to follow the car
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarView {
    /// World position of the car
    pub position: Vector3,

    /// Unit heading in the ground plane
    pub direction: Vector3,

    /// Signed speed along `direction`
    pub speed: f32,
}

/// The sandbox world: every body, the car handle and the per-frame pipeline
pub struct World {
    /// All bodies in registration order
    bodies: BodyStorage<Body>,

    /// The single car, once registered
    car: Option<BodyHandle>,

    /// Configuration for the simulation
    config: SimulationConfig,

    /// Drives the car from held controls
    controller: CarController,

    /// Advances dynamic bodies against the ground plane
    integrator: SettlingIntegrator,

    /// Turns contacts into impulses and corrections
    resolver: ImpulseResolver,

    /// Events raised by the most recent step
    events: EventQueue,

    /// The total elapsed simulation time
    time: f32,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Creates a new world with default settings
    pub fn new() -> Self {
        Self::build(SimulationConfig::default())
    }

    /// Creates a new world with the given configuration
    pub fn with_config(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: SimulationConfig) -> Self {
        Self {
            bodies: BodyStorage::new(),
            car: None,
            controller: CarController::new(config.car.clone()),
            integrator: SettlingIntegrator::new(config.integration.clone(), config.car.clone(), config.gravity),
            resolver: ImpulseResolver::new(config.contact.clone()),
            config,
            events: EventQueue::new(),
            time: 0.0,
        }
    }

    /// Replaces the configuration, keeping every registered body
    pub fn set_config(&mut self, config: SimulationConfig) -> Result<()> {
        config.validate()?;
        self.controller = CarController::new(config.car.clone());
        self.integrator = SettlingIntegrator::new(config.integration.clone(), config.car.clone(), config.gravity);
        self.resolver = ImpulseResolver::new(config.contact.clone());
        self.config = config;
        Ok(())
    }

    /// Returns the current simulation time
    pub fn get_time(&self) -> f32 {
        self.time
    }

    /// Returns a reference to the simulation configuration
    pub fn get_config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Registers a body and returns its handle.
    ///
    /// Fails if the shape has a non-positive or non-finite dimension, if a
    /// dynamic body has no usable mass, or if a second car is registered.
    pub fn add_body(&mut self, body: Body) -> Result<BodyHandle> {
        if !body.get_shape().is_valid() {
            return Err(PhysicsError::InvalidParameter(format!(
                "{:?} has a degenerate shape",
                body.kind()
            )));
        }

        let mass = body.get_mass();
        if body.get_body_type() == RigidBodyType::Dynamic && !(mass.is_finite() && mass > 0.0) {
            return Err(PhysicsError::InvalidParameter(format!(
                "Dynamic {:?} needs a positive mass, got {}",
                body.kind(),
                mass
            )));
        }

        if body.is_car() && self.car.is_some() {
            return Err(PhysicsError::DuplicateCar);
        }

        let is_car = body.is_car();
        let kind = body.kind();
        let handle = self.bodies.add(body);
        if is_car {
            self.car = Some(handle);
        }

        debug!(handle = handle.index(), ?kind, "body registered");
        self.events.add_body_event(BodyEventType::Added, handle);

        Ok(handle)
    }

    /// Gets a reference to a body by its handle
    pub fn get_body(&self, handle: BodyHandle) -> Result<&Body> {
        self.bodies.get_body(handle)
    }

    /// Gets a mutable reference to a body by its handle
    pub fn get_body_mut(&mut self, handle: BodyHandle) -> Result<&mut Body> {
        self.bodies.get_body_mut(handle)
    }

    /// Iterates over every body with its handle, in registration order
    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &Body)> + '_ {
        self.bodies.iter()
    }

    /// Returns the number of bodies in the world
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Handle of the car, if one has been registered
    pub fn car_handle(&self) -> Option<BodyHandle> {
        self.car
    }

    /// Position and heading of the car for camera follow, if a car exists
    pub fn car_view(&self) -> Option<CarView> {
        let car = self.bodies.get(self.car?)?;
        Some(CarView {
            position: car.get_position(),
            direction: car.get_direction(),
            speed: car.get_speed(),
        })
    }

    /// Returns a reference to the event queue
    pub fn get_events(&self) -> &EventQueue {
        &self.events
    }

    /// Returns a mutable reference to the event queue
    pub fn get_events_mut(&mut self) -> &mut EventQueue {
        &mut self.events
    }

    /// Runs one frame of the simulation.
    ///
    /// `dt` is clamped to `max_time_step`; non-positive or non-finite values
    /// leave the world untouched. Events from the previous step are dropped.
    pub fn step(&mut self, dt: f32, input: &ControlInput) {
        self.events.clear();

        if !(dt.is_finite() && dt > 0.0) {
            warn!(dt, "ignoring step with unusable time delta");
            return;
        }
        let dt = dt.min(self.config.max_time_step);

        self.drive_car(input, dt);
        self.integrate(dt);
        self.resolve_contacts();
        self.clamp_to_floor();

        self.time += dt;
        trace!(time = self.time, dt, "step finished");
    }

    fn drive_car(&mut self, input: &ControlInput, dt: f32) {
        let Some(handle) = self.car else {
            return;
        };
        let Some(car) = self.bodies.get_mut(handle) else {
            return;
        };

        let update = self.controller.update(car, input, self.config.gravity, dt);
        if update.jumped {
            self.events.add_body_event(BodyEventType::Jumped, handle);
        }
    }

    fn integrate(&mut self, dt: f32) {
        for (handle, body) in self.bodies.iter_mut() {
            if body.is_static() {
                continue;
            }

            let outcome = self.integrator.integrate(body, dt);
            if outcome.landed {
                self.events.add_body_event(BodyEventType::Landed, handle);
            }
            if outcome.settled {
                debug!(handle = handle.index(), "body settled");
                self.events.add_body_event(BodyEventType::Settled, handle);
            }
        }
    }

    /// Tests every unordered pair once and resolves each contact in turn
    fn resolve_contacts(&mut self) {
        let count = self.bodies.len() as u32;

        for i in 0..count {
            for j in (i + 1)..count {
                let (handle_a, handle_b) = (BodyHandle(i), BodyHandle(j));
                let contact = match (self.bodies.get(handle_a), self.bodies.get(handle_b)) {
                    (Some(a), Some(b)) => collision::detect(handle_a, a, handle_b, b, &self.config.contact),
                    _ => None,
                };
                let Some(contact) = contact else {
                    continue;
                };

                let Ok((a, b)) = self.bodies.get_pair_mut(handle_a, handle_b) else {
                    continue;
                };

                if let Some(response) = contact.response {
                    let (car, car_handle) = if a.is_car() { (a, handle_a) } else { (b, handle_b) };
                    if response.apply(car, &self.config.car) {
                        self.events.add_body_event(BodyEventType::Launched, car_handle);
                    }
                }

                let Ok((a, b)) = self.bodies.get_pair_mut(handle_a, handle_b) else {
                    continue;
                };
                let resolution = self.resolver.resolve(&contact, a, b);

                self.events.add_collision_event(CollisionEvent {
                    body_a: contact.body_a,
                    body_b: contact.body_b,
                    pair: contact.pair,
                    normal: contact.normal,
                    depth: contact.depth,
                    impulse: resolution.impulse,
                });
            }
        }
    }

    /// Lifts dynamic bodies that a correction pushed below the ground plane
    fn clamp_to_floor(&mut self) {
        for (_, body) in self.bodies.iter_mut() {
            if body.is_static() {
                continue;
            }

            let height = body.collision_height();
            let position = body.position_mut();
            if position.y < height {
                position.y = height;
            }
        }
    }
}
