//! Full-frame scenarios on the default level.

use glam::Vec2;
use jailbreak_core::{
    category, level, EntityKind, FrameTime, InputIntent, SimConfig, SimEvent, Simulation,
    ZombieState,
};

const FRAME_MS: f64 = 1000.0 / 60.0;

struct Session {
    sim: Simulation,
    frame: u32,
    events: Vec<SimEvent>,
}

impl Session {
    fn new() -> Self {
        Self {
            sim: Simulation::new(SimConfig::default()).unwrap(),
            frame: 0,
            events: Vec::new(),
        }
    }

    /// Default level with the zombies removed, so nothing interferes.
    fn empty() -> Self {
        let mut s = Self::new();
        let zombies = s.sim.world().scene.ids_of(EntityKind::Zombie);
        for id in zombies {
            s.sim.world_mut().despawn(id);
        }
        s
    }

    fn now(&self) -> f64 {
        self.frame as f64 * FRAME_MS
    }

    fn step(&mut self, input: InputIntent) {
        self.frame += 1;
        let frame = FrameTime::new(self.now(), FRAME_MS);
        self.sim.tick(frame, &input).unwrap();
        self.events.extend(self.sim.drain_events());
    }

    fn idle(&mut self, frames: u32) {
        for _ in 0..frames {
            self.step(InputIntent::default());
        }
    }

    /// Press for one frame, then release.
    fn tap(&mut self, input: InputIntent) {
        self.step(input);
        self.step(InputIntent::default());
    }

    fn count(&self, pred: impl Fn(&SimEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    fn player_mask(&self) -> u32 {
        let world = self.sim.world();
        let body = world.scene.player().unwrap().body.unwrap();
        world.physics.collision_filter(&body).unwrap().mask
    }

    fn player_hp(&self) -> i32 {
        self.sim.world().scene.player().unwrap().as_player().unwrap().hp
    }
}

fn jump() -> InputIntent {
    InputIntent {
        jump: true,
        ..Default::default()
    }
}

fn attack() -> InputIntent {
    InputIntent {
        attack: true,
        ..Default::default()
    }
}

fn roll() -> InputIntent {
    InputIntent {
        roll: true,
        ..Default::default()
    }
}

#[test]
fn double_jump_then_third_press_is_ignored() {
    let mut s = Session::empty();
    s.idle(90);

    s.tap(jump());
    s.idle(8);
    s.tap(jump());
    s.idle(8);
    s.tap(jump());

    assert_eq!(s.count(|e| *e == SimEvent::Jumped), 1);
    assert_eq!(s.count(|e| *e == SimEvent::DoubleJumped), 1);
}

#[test]
fn landing_restores_double_jump() {
    let mut s = Session::empty();
    s.idle(90);
    s.tap(jump());
    s.idle(8);
    s.tap(jump());
    // Long enough to come back down and settle.
    s.idle(300);
    s.tap(jump());
    s.idle(8);
    s.tap(jump());

    assert_eq!(s.count(|e| *e == SimEvent::Jumped), 2);
    assert_eq!(s.count(|e| *e == SimEvent::DoubleJumped), 2);
}

#[test]
fn dodge_passes_through_enemies_for_its_duration() {
    let mut s = Session::empty();
    s.idle(60);
    let full = category::ENVIRONMENT | category::ENEMY;
    assert_eq!(s.player_mask(), full);

    s.tap(roll());
    assert_eq!(s.player_mask(), category::ENVIRONMENT);

    // The 300ms dodge ends between frames 18 and 19 after the press.
    s.idle(18);
    assert_eq!(s.player_mask(), full);
    assert_eq!(s.count(|e| *e == SimEvent::Dodged), 1);
}

#[test]
fn clearing_the_level_unlocks_the_door_once() {
    let mut s = Session::empty();
    s.idle(1);
    assert!(s.sim.state().victory);
    s.idle(30);
    assert_eq!(
        s.count(|e| matches!(e, SimEvent::DoorUnlocked { .. })),
        1
    );
    let snap = s.sim.snapshot();
    assert!(snap.victory && !snap.game_over);
}

#[test]
fn zombies_on_the_level_keep_the_door_locked() {
    let mut s = Session::new();
    s.idle(30);
    assert!(!s.sim.state().victory);
    assert_eq!(s.count(|e| matches!(e, SimEvent::DoorUnlocked { .. })), 0);
}

#[test]
fn chasing_zombie_ends_the_game_once() {
    let mut s = Session::new();
    s.sim
        .world_mut()
        .scene
        .player_mut()
        .unwrap()
        .as_player_mut()
        .unwrap()
        .hp = 10;

    for _ in 0..600 {
        s.step(InputIntent::default());
        if s.sim.state().game_over {
            break;
        }
    }
    assert!(s.sim.state().game_over, "zombie never reached the player");
    assert_eq!(s.player_hp(), 0);

    // Everything after game-over is inert.
    s.idle(120);
    assert_eq!(s.count(|e| *e == SimEvent::GameOver), 1);
    assert_eq!(s.count(|e| matches!(e, SimEvent::PlayerHit { .. })), 1);
    assert_eq!(s.player_hp(), 0);
    assert!(s.sim.snapshot().player().is_some());
}

#[test]
fn nearby_zombie_switches_to_aggro_and_far_one_patrols() {
    let mut s = Session::new();
    s.idle(1);
    let world = s.sim.world();
    let mut states: Vec<(f32, ZombieState)> = world
        .scene
        .ids_of(EntityKind::Zombie)
        .into_iter()
        .map(|id| {
            let e = world.scene.get(id).unwrap();
            (e.pos.x, e.as_zombie().unwrap().state)
        })
        .collect();
    states.sort_by(|a, b| a.0.total_cmp(&b.0));
    assert_eq!(states[0].1, ZombieState::Aggro);
    assert_eq!(states[1].1, ZombieState::Patrol);
}

#[test]
fn repeated_attacks_defeat_an_adjacent_zombie() {
    let mut s = Session::empty();
    s.idle(90);
    let player_pos = s.sim.snapshot().player().unwrap().pos;
    let tuning = s.sim.config().tuning;
    let zombie = level::spawn_zombie(
        s.sim.world_mut(),
        &tuning,
        player_pos + Vec2::new(38.0, 2.0),
        0.0,
        375.0,
    );

    for _ in 0..20 {
        s.tap(attack());
        s.idle(10);
        if s.sim.world().scene.get(zombie).is_none() {
            break;
        }
    }

    assert!(s.sim.world().scene.get(zombie).is_none());
    assert_eq!(
        s.count(|e| *e == SimEvent::ZombieDefeated { zombie }),
        1
    );
    // 30 hp at 20 damage per swing, each swing landing at most once.
    assert_eq!(s.count(|e| matches!(e, SimEvent::ZombieHit { .. })), 2);
}

#[test]
fn paused_session_ignores_input() {
    let mut s = Session::empty();
    s.idle(60);
    s.sim.set_paused(true);
    s.tap(jump());
    s.tap(attack());
    assert!(s.events.iter().all(|e| matches!(e, SimEvent::DoorUnlocked { .. })));

    s.sim.set_paused(false);
    s.tap(jump());
    assert_eq!(s.count(|e| *e == SimEvent::Jumped), 1);
}

#[test]
fn defeating_the_last_zombie_unlocks_the_door_in_the_same_tick() {
    let mut s = Session::empty();
    let tuning = s.sim.config().tuning;
    let h = s.sim.config().world_height;
    // A patrolling zombie keeps the door shut while the player settles.
    let far = level::spawn_zombie(
        s.sim.world_mut(),
        &tuning,
        Vec2::new(320.0, h - 150.0),
        280.0,
        360.0,
    );
    s.idle(90);
    assert!(!s.sim.state().victory);

    // Swap it for a weakened one in reach, without a tick in between.
    s.sim.world_mut().despawn(far);
    let player_pos = s.sim.snapshot().player().unwrap().pos;
    let zombie = level::spawn_zombie(
        s.sim.world_mut(),
        &tuning,
        player_pos + Vec2::new(38.0, 2.0),
        0.0,
        375.0,
    );
    s.sim
        .world_mut()
        .scene
        .get_mut(zombie)
        .unwrap()
        .as_zombie_mut()
        .unwrap()
        .hp = 10;

    let before = s.events.len();
    s.step(attack());
    let tick_events = &s.events[before..];

    assert!(tick_events.contains(&SimEvent::ZombieDefeated { zombie }));
    assert!(tick_events
        .iter()
        .any(|e| matches!(e, SimEvent::DoorUnlocked { .. })));
    assert!(s.sim.state().victory);
    assert_eq!(s.count(|e| matches!(e, SimEvent::DoorUnlocked { .. })), 1);
}
