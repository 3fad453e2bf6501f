use serde::{Deserialize, Serialize};

use crate::input::intent::{Action, InputIntent};

/// Input event types a host can push between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// A control was pressed (touch began, key down).
    Press(Action),
    /// A control was released.
    Release(Action),
}

/// A queue of input events.
/// The host writes events into the queue; the driver folds them into the
/// level-triggered [`InputIntent`] once per frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(16),
        }
    }

    /// Push a new input event.
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Apply all pending events to `intent` in arrival order and clear the queue.
    pub fn drain_into(&mut self, intent: &mut InputIntent) {
        for event in self.events.drain(..) {
            match event {
                InputEvent::Press(action) => intent.set(action, true),
                InputEvent::Release(action) => intent.set(action, false),
            }
        }
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
