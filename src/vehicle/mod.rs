//! Player car input and motion model.

mod controls;
mod controller;

pub use self::controls::{Controls, ControlInput, InputSampler};
pub use self::controller::{CarController, CarUpdate};
