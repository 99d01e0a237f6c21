use bitflags::bitflags;

bitflags! {
    /// Logical controls currently held by the player
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Controls: u8 {
        /// Accelerate forward
        const FORWARD = 0x01;

        /// Brake / reverse
        const BACK = 0x02;

        /// Turn left
        const LEFT = 0x04;

        /// Turn right
        const RIGHT = 0x08;

        /// Handbrake
        const HANDBRAKE = 0x10;

        /// Jump (held state; the trigger is `ControlInput::jump_pressed`)
        const JUMP = 0x20;
    }
}

impl Controls {
    /// +1 when only FORWARD is held, -1 when only BACK is held, else 0
    pub fn throttle(self) -> f32 {
        axis(self.contains(Controls::FORWARD), self.contains(Controls::BACK))
    }

    /// +1 when only LEFT is held, -1 when only RIGHT is held, else 0
    pub fn steer(self) -> f32 {
        axis(self.contains(Controls::LEFT), self.contains(Controls::RIGHT))
    }
}

fn axis(positive: bool, negative: bool) -> f32 {
    match (positive, negative) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    }
}

/// Control snapshot sampled once per step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlInput {
    /// Controls held this frame
    pub held: Controls,

    /// Jump went from released to pressed since the previous sample
    pub jump_pressed: bool,
}

impl ControlInput {
    /// No controls held
    pub fn none() -> Self {
        Self::default()
    }

    /// Holds `held` without triggering a jump
    pub fn holding(held: Controls) -> Self {
        Self {
            held,
            jump_pressed: false,
        }
    }

    /// Triggers a jump this frame in addition to `held`
    pub fn jumping(held: Controls) -> Self {
        Self {
            held: held | Controls::JUMP,
            jump_pressed: true,
        }
    }
}

/// Turns raw held-key state into a `ControlInput` with jump edge detection
#[derive(Debug, Clone, Default)]
pub struct InputSampler {
    previous: Controls,
}

impl InputSampler {
    /// Creates a sampler with nothing held
    pub fn new() -> Self {
        Self::default()
    }

    /// Samples the current held state; jump fires only on its rising edge
    pub fn sample(&mut self, held: Controls) -> ControlInput {
        let jump_pressed = held.contains(Controls::JUMP) && !self.previous.contains(Controls::JUMP);
        self.previous = held;
        ControlInput { held, jump_pressed }
    }
}
