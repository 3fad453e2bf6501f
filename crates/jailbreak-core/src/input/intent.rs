use serde::{Deserialize, Serialize};

/// The five player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Left,
    Right,
    Jump,
    Attack,
    Roll,
}

/// Level-triggered input: `true` while the control is held.
/// Hosts write these directly from touch or key handlers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputIntent {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub attack: bool,
    pub roll: bool,
}

impl InputIntent {
    pub fn held(&self, action: Action) -> bool {
        match action {
            Action::Left => self.left,
            Action::Right => self.right,
            Action::Jump => self.jump,
            Action::Attack => self.attack,
            Action::Roll => self.roll,
        }
    }

    pub fn set(&mut self, action: Action, held: bool) {
        match action {
            Action::Left => self.left = held,
            Action::Right => self.right = held,
            Action::Jump => self.jump = held,
            Action::Attack => self.attack = held,
            Action::Roll => self.roll = held,
        }
    }
}

/// Derives press edges by diffing against the previous frame's input.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputEdges {
    previous: InputIntent,
}

impl InputEdges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `current` and return the controls that went from released to
    /// held since the last call.
    pub fn advance(&mut self, current: &InputIntent) -> InputIntent {
        let prev = self.previous;
        self.previous = *current;
        InputIntent {
            left: current.left && !prev.left,
            right: current.right && !prev.right,
            jump: current.jump && !prev.jump,
            attack: current.attack && !prev.attack,
            roll: current.roll && !prev.roll,
        }
    }
}
