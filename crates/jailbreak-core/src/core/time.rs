/// Milliseconds on the host clock.
pub type Millis = f64;

/// What the driver hands the core each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    pub now_ms: Millis,
    pub delta_ms: Millis,
}

impl FrameTime {
    pub fn new(now_ms: Millis, delta_ms: Millis) -> Self {
        Self { now_ms, delta_ms }
    }
}

/// Current time and per-frame delta, with the delta clamped to a sane maximum.
pub struct FrameClock {
    now: Millis,
    delta: Millis,
    max_delta: Millis,
    /// True while consecutive frames keep getting clamped, so a long stall
    /// logs once.
    clamping: bool,
}

impl FrameClock {
    pub fn new(max_delta: Millis) -> Self {
        Self {
            now: 0.0,
            delta: 0.0,
            max_delta,
            clamping: false,
        }
    }

    /// Take the next frame. Time never runs backwards; a non-finite delta
    /// becomes zero and a huge one is clamped.
    pub fn advance(&mut self, frame: FrameTime) -> Millis {
        if frame.now_ms.is_finite() && frame.now_ms > self.now {
            self.now = frame.now_ms;
        }

        let delta = if frame.delta_ms.is_finite() {
            frame.delta_ms.max(0.0)
        } else {
            0.0
        };

        if delta > self.max_delta {
            if !self.clamping {
                log::warn!(
                    "frame delta {:.1}ms clamped to {:.1}ms",
                    delta,
                    self.max_delta
                );
            }
            self.clamping = true;
            self.delta = self.max_delta;
        } else {
            self.clamping = false;
            self.delta = delta;
        }
        self.delta
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    /// The clamped delta of the current frame.
    pub fn delta(&self) -> Millis {
        self.delta
    }

    /// The clamped delta in seconds, as the physics step wants it.
    pub fn delta_secs(&self) -> f32 {
        (self.delta / 1000.0) as f32
    }
}

/// Fixed timestep accumulator.
/// Turns variable host frame times into a whole number of simulation ticks.
pub struct FixedTimestep {
    /// The fixed delta time per tick, in seconds.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        if !frame_dt.is_finite() {
            return 0;
        }
        self.accumulator += frame_dt.max(0.0);
        // Cap to prevent spiral of death (max 10 steps per frame)
        self.accumulator = self.accumulator.min(self.dt * 10.0);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}
