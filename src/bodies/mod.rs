mod body;
mod body_type;
mod shape;

pub use self::body::{Body, CAR_FORWARD};
pub use self::body_type::RigidBodyType;
pub use self::shape::{Shape, ShapeKind};

/// Flags for per-frame body state
pub mod body_flags {
    use bitflags::bitflags;

    bitflags! {
        /// Contact state derived during the step
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct BodyFlags: u32 {
            /// Body rests on the ground plane or a ramp
            const ON_GROUND = 0x01;
        }
    }
}
