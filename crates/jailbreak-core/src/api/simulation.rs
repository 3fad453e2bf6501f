use crate::api::config::SimConfig;
use crate::api::snapshot::Snapshot;
use crate::api::state::GameState;
use crate::api::types::SimEvent;
use crate::api::world::World;
use crate::core::time::{FrameClock, FrameTime};
use crate::error::SimResult;
use crate::input::intent::InputIntent;
use crate::level;
use crate::systems::damage::resolve_damage;
use crate::systems::enemy::update_zombies;
use crate::systems::player::PlayerController;
use crate::systems::win::evaluate_win;

/// One play session: the world, its flags and the per-frame driver.
///
/// Each [`Simulation::tick`] runs, in order: the physics step (skipped during
/// hit-stop), the player controller, zombie behaviour, damage resolution and
/// the win check.
pub struct Simulation {
    config: SimConfig,
    world: World,
    state: GameState,
    clock: FrameClock,
    controller: PlayerController,
}

impl Simulation {
    /// Validate `config` and build the default level.
    pub fn new(config: SimConfig) -> SimResult<Self> {
        config.validate()?;
        let mut world = World::new(config.gravity);
        level::build_default_level(&mut world, &config);
        Ok(Self {
            clock: FrameClock::new(config.max_frame_dt_ms),
            config,
            world,
            state: GameState::default(),
            controller: PlayerController::new(),
        })
    }

    /// Advance one frame. An error means the world is inconsistent; the
    /// driver should [`reset`](Self::reset).
    pub fn tick(&mut self, frame: FrameTime, input: &InputIntent) -> SimResult<()> {
        self.clock.advance(frame);
        let now = self.clock.now();
        let tuning = &self.config.tuning;

        if !self.state.hit_stop_active(now) {
            self.world.step_physics(self.clock.delta_secs());
        }

        self.controller
            .update(&mut self.world, &self.state, input, now, tuning)?;
        update_zombies(&mut self.world, &self.state, now, tuning)?;
        resolve_damage(&mut self.world, &mut self.state, now, tuning)?;
        evaluate_win(&mut self.world, &mut self.state)?;
        Ok(())
    }

    /// Drop the world, flags and clock and start over with the same config.
    /// The host restarts its time base from zero.
    pub fn reset(&mut self) {
        let mut world = World::new(self.config.gravity);
        level::build_default_level(&mut world, &self.config);
        self.world = world;
        self.state = GameState::default();
        self.clock = FrameClock::new(self.config.max_frame_dt_ms);
        self.controller = PlayerController::new();
        log::info!("simulation reset");
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.state.paused = paused;
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Events emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        self.world.drain_events()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.world.scene, &self.state, self.clock.now())
    }
}
