use serde::{Deserialize, Serialize};

use jailbreak_core::{Action, InputEvent, SimEvent};

use crate::runner::GameRunner;

/// One input event, delivered just before the given host frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    pub frame: u32,
    pub event: InputEvent,
}

/// A timeline of input for headless runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    /// Host frames to run in total.
    pub frames: u32,
    pub steps: Vec<ScriptStep>,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Walk right toward the first zombie, jump, swing twice, roll away.
    pub fn demo() -> Self {
        use InputEvent::{Press, Release};
        let tap = |frame: u32, action: Action| {
            [
                ScriptStep {
                    frame,
                    event: Press(action),
                },
                ScriptStep {
                    frame: frame + 2,
                    event: Release(action),
                },
            ]
        };

        let mut steps = vec![ScriptStep {
            frame: 60,
            event: Press(Action::Right),
        }];
        steps.extend(tap(80, Action::Jump));
        steps.push(ScriptStep {
            frame: 110,
            event: Release(Action::Right),
        });
        steps.extend(tap(120, Action::Attack));
        steps.extend(tap(150, Action::Attack));
        steps.extend(tap(200, Action::Roll));
        steps.extend(tap(260, Action::Attack));

        Self { frames: 600, steps }
    }

    /// Events scheduled for `frame`, in script order.
    pub fn events_at(&self, frame: u32) -> impl Iterator<Item = InputEvent> + '_ {
        self.steps
            .iter()
            .filter(move |s| s.frame == frame)
            .map(|s| s.event)
    }

    /// Drive `runner` through the whole timeline, one `frame_dt` per host
    /// frame. Returns every event the simulation produced.
    pub fn run(&self, runner: &mut GameRunner, frame_dt: f32) -> Vec<SimEvent> {
        let mut events = Vec::new();
        for frame in 0..self.frames {
            for event in self.events_at(frame) {
                runner.push_input(event);
            }
            runner.tick(frame_dt);
            events.extend_from_slice(runner.events());
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jailbreak_core::SimConfig;

    #[test]
    fn parses_json_timeline() {
        let script = Script::from_json(
            r#"{"frames": 10, "steps": [{"frame": 2, "event": {"Press": "Jump"}}]}"#,
        )
        .unwrap();
        assert_eq!(script.frames, 10);
        assert_eq!(
            script.events_at(2).collect::<Vec<_>>(),
            vec![InputEvent::Press(Action::Jump)]
        );
        assert_eq!(script.events_at(3).count(), 0);
    }

    #[test]
    fn demo_releases_everything_it_presses() {
        let script = Script::demo();
        let presses = script
            .steps
            .iter()
            .filter(|s| matches!(s.event, InputEvent::Press(_)))
            .count();
        assert_eq!(presses * 2, script.steps.len());
    }

    #[test]
    fn demo_session_runs_to_completion() {
        let mut runner = GameRunner::new(SimConfig::default()).unwrap();
        let events = Script::demo().run(&mut runner, 1.0 / 60.0);
        assert!(events
            .iter()
            .any(|e| matches!(e, SimEvent::AttackStarted { .. })));
        assert!(runner.snapshot().player().is_some());
    }
}
