mod pair_kind;
mod contact;
mod narrow_phase;
mod contact_solver;

pub use self::pair_kind::PairKind;
pub use self::contact::{Contact, ContactResponse};
pub use self::narrow_phase::detect;
pub use self::contact_solver::{ImpulseResolver, Resolution};
