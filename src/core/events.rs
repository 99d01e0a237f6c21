use crate::collision::PairKind;
use crate::core::BodyHandle;
use crate::math::Vector3;
use std::collections::VecDeque;

/// A contact that was detected and passed to the resolver this step
#[derive(Debug, Clone)]
pub struct CollisionEvent {
    /// The first body in the contact
    pub body_a: BodyHandle,

    /// The second body in the contact
    pub body_b: BodyHandle,

    /// Shape pairing of the contact
    pub pair: PairKind,

    /// Contact normal, pointing from `body_a` toward `body_b`
    pub normal: Vector3,

    /// Penetration depth at detection
    pub depth: f32,

    /// Normal impulse applied, zero when the bodies were already separating
    pub impulse: f32,
}

/// Types of body events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEventType {
    /// A body has been added to the world
    Added,

    /// A body touched down on the ground plane
    Landed,

    /// A body was forced to rest after staying grounded
    Settled,

    /// The car jumped
    Jumped,

    /// The car was launched off the top of a ramp
    Launched,
}

/// An event related to a single body
#[derive(Debug, Clone)]
pub struct BodyEvent {
    /// The type of body event
    pub event_type: BodyEventType,

    /// The body that the event refers to
    pub body: BodyHandle,
}

/// Events raised during the most recent step
#[derive(Debug, Default)]
pub struct EventQueue {
    /// Collision events
    collision_events: VecDeque<CollisionEvent>,

    /// Body events
    body_events: VecDeque<BodyEvent>,
}

impl EventQueue {
    /// Creates a new empty event queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a collision event to the queue
    pub fn add_collision_event(&mut self, event: CollisionEvent) {
        self.collision_events.push_back(event);
    }

    /// Adds a body event to the queue
    pub fn add_body_event(&mut self, event_type: BodyEventType, body: BodyHandle) {
        self.body_events.push_back(BodyEvent { event_type, body });
    }

    /// Gets the next collision event from the queue
    pub fn next_collision_event(&mut self) -> Option<CollisionEvent> {
        self.collision_events.pop_front()
    }

    /// Gets the next body event from the queue
    pub fn next_body_event(&mut self) -> Option<BodyEvent> {
        self.body_events.pop_front()
    }

    /// Iterates over pending collision events
    pub fn collision_events(&self) -> impl Iterator<Item = &CollisionEvent> {
        self.collision_events.iter()
    }

    /// Iterates over pending body events
    pub fn body_events(&self) -> impl Iterator<Item = &BodyEvent> {
        self.body_events.iter()
    }

    /// Returns whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.collision_events.is_empty() && self.body_events.is_empty()
    }

    /// Clears all events from the queue
    pub fn clear(&mut self) {
        self.collision_events.clear();
        self.body_events.clear();
    }

    /// Gets all collision events involving a specific body
    pub fn get_collision_events_for_body(&self, body: BodyHandle) -> Vec<&CollisionEvent> {
        self.collision_events
            .iter()
            .filter(|e| e.body_a == body || e.body_b == body)
            .collect()
    }

    /// Whether a body event of `event_type` was raised for `body`
    pub fn has_body_event(&self, body: BodyHandle, event_type: BodyEventType) -> bool {
        self.body_events
            .iter()
            .any(|e| e.body == body && e.event_type == event_type)
    }
}
