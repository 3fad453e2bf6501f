use jailbreak_core::{
    pack_events, FixedTimestep, FrameTime, GameEvent, InputEvent, InputIntent, InputQueue,
    SimConfig, SimEvent, SimResult, Simulation, Snapshot,
};

/// Default fixed tick, 60 Hz.
pub const DEFAULT_FIXED_DT: f32 = 1.0 / 60.0;

/// Wires a [`Simulation`] to a host loop.
///
/// The host pushes input events between frames and calls [`GameRunner::tick`]
/// with the wall-clock frame time. The runner folds input into the held
/// intent, runs a whole number of fixed simulation ticks and collects their
/// events. A tick that fails ends the session and the runner resets it.
pub struct GameRunner {
    sim: Simulation,
    input: InputQueue,
    intent: InputIntent,
    timestep: FixedTimestep,
    /// Simulation clock in ms, advanced by whole fixed ticks.
    clock_ms: f64,
    reset_requested: bool,
    events: Vec<SimEvent>,
    /// Flat `GameEvent` buffer for host-side reads.
    event_buffer: Vec<f32>,
}

impl GameRunner {
    pub fn new(config: SimConfig) -> SimResult<Self> {
        Self::with_fixed_dt(config, DEFAULT_FIXED_DT)
    }

    pub fn with_fixed_dt(config: SimConfig, fixed_dt: f32) -> SimResult<Self> {
        Ok(Self {
            sim: Simulation::new(config)?,
            input: InputQueue::new(),
            intent: InputIntent::default(),
            timestep: FixedTimestep::new(fixed_dt),
            clock_ms: 0.0,
            reset_requested: false,
            events: Vec::new(),
            event_buffer: Vec::new(),
        })
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Reset the session before the next tick runs.
    pub fn request_reset(&mut self) {
        self.reset_requested = true;
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.sim.set_paused(paused);
    }

    /// Run one host frame. Returns the number of fixed ticks taken.
    pub fn tick(&mut self, frame_dt: f32) -> u32 {
        self.events.clear();

        if self.reset_requested {
            self.reset_requested = false;
            self.reset();
        }

        self.input.drain_into(&mut self.intent);

        let steps = self.timestep.accumulate(frame_dt);
        let dt_ms = self.timestep.dt() as f64 * 1000.0;
        let mut taken = 0;
        for _ in 0..steps {
            self.clock_ms += dt_ms;
            let frame = FrameTime::new(self.clock_ms, dt_ms);
            let result = self.sim.tick(frame, &self.intent);
            self.events.extend(self.sim.drain_events());
            taken += 1;
            if let Err(err) = result {
                log::error!("simulation failed at {:.0}ms: {err}; resetting", self.clock_ms);
                self.reset();
                break;
            }
        }

        self.event_buffer = pack_events(&self.events);
        taken
    }

    fn reset(&mut self) {
        self.sim.reset();
        self.intent = InputIntent::default();
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn simulation_mut(&mut self) -> &mut Simulation {
        &mut self.sim
    }

    pub fn snapshot(&self) -> Snapshot {
        self.sim.snapshot()
    }

    /// Events produced during the last [`GameRunner::tick`].
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// Intent currently held, after the last drained input.
    pub fn intent(&self) -> &InputIntent {
        &self.intent
    }

    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    /// Last tick's events packed as flat `GameEvent` records.
    pub fn game_events(&self) -> &[f32] {
        &self.event_buffer
    }

    pub fn game_events_len(&self) -> usize {
        self.event_buffer.len() / GameEvent::FLOATS
    }
}
