//! Held-key state
//!
//! Key events only flip flags here; the tick reads them once per step.

/// Directional controls the game responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Accelerate,
    Brake,
    SteerLeft,
    SteerRight,
}

impl Control {
    /// Map a DOM `KeyboardEvent.key` value; everything else is ignored
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Control::Accelerate),
            "ArrowDown" => Some(Control::Brake),
            "ArrowLeft" => Some(Control::SteerLeft),
            "ArrowRight" => Some(Control::SteerRight),
            _ => None,
        }
    }
}

/// Which controls are currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub accelerate: bool,
    pub brake: bool,
    pub steer_left: bool,
    pub steer_right: bool,
}

impl InputState {
    pub fn set(&mut self, control: Control, held: bool) {
        match control {
            Control::Accelerate => self.accelerate = held,
            Control::Brake => self.brake = held,
            Control::SteerLeft => self.steer_left = held,
            Control::SteerRight => self.steer_right = held,
        }
    }

    pub fn is_held(&self, control: Control) -> bool {
        match control {
            Control::Accelerate => self.accelerate,
            Control::Brake => self.brake,
            Control::SteerLeft => self.steer_left,
            Control::SteerRight => self.steer_right,
        }
    }

    /// Handle a keydown; returns whether the key was recognised
    pub fn key_down(&mut self, key: &str) -> bool {
        self.apply_key(key, true)
    }

    /// Handle a keyup; returns whether the key was recognised
    pub fn key_up(&mut self, key: &str) -> bool {
        self.apply_key(key, false)
    }

    fn apply_key(&mut self, key: &str, held: bool) -> bool {
        match Control::from_key(key) {
            Some(control) => {
                self.set(control, held);
                true
            }
            None => false,
        }
    }
}
