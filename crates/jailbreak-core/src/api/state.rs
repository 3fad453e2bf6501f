use serde::Serialize;

use crate::core::time::Millis;

/// Session-wide flags, passed by reference into each system.
/// A reset replaces the whole struct.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GameState {
    pub paused: bool,
    pub game_over: bool,
    pub victory: bool,
    /// Physics stays frozen while `now < hit_stop_until`.
    pub hit_stop_until: Millis,
}

impl GameState {
    /// Gameplay systems run only while this holds.
    pub fn is_running(&self) -> bool {
        !self.paused && !self.game_over
    }

    pub fn hit_stop_active(&self, now: Millis) -> bool {
        self.hit_stop_until > now
    }

    /// Set the freeze deadline. A later trigger replaces the deadline; triggers
    /// do not stack.
    pub fn trigger_hit_stop(&mut self, now: Millis, duration: Millis) {
        self.hit_stop_until = now + duration;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_stop_is_a_deadline_not_a_stack() {
        let mut state = GameState::default();
        state.trigger_hit_stop(100.0, 50.0);
        state.trigger_hit_stop(120.0, 50.0);
        assert_eq!(state.hit_stop_until, 170.0);
        assert!(state.hit_stop_active(169.9));
        assert!(!state.hit_stop_active(170.0));
    }

    #[test]
    fn paused_or_over_stops_gameplay() {
        let mut state = GameState::default();
        assert!(state.is_running());
        state.paused = true;
        assert!(!state.is_running());
        state.paused = false;
        state.game_over = true;
        assert!(!state.is_running());
    }
}
