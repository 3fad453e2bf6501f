//! Per-kind gameplay payloads. Simulation-owned: only the systems mutate them.

use serde::Serialize;

use crate::api::types::EntityId;
use crate::core::time::Millis;

/// Player state. There is exactly one player during active play.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayerData {
    pub hp: i32,
    pub max_hp: i32,
    /// Set while a dodge is running. Post-hit i-frames use `last_hit_time`.
    pub is_invulnerable: bool,
    pub can_double_jump: bool,
    pub is_grounded: bool,
    /// `None` once a jump has consumed the coyote window.
    pub last_grounded_time: Option<Millis>,
    /// Time of the last unconsumed jump press.
    pub jump_buffer_time: Option<Millis>,
    pub facing_right: bool,
    pub dodge_end_time: Millis,
    pub attack_hitbox: Option<EntityId>,
    /// Start of the current i-frame window, if any.
    pub last_hit_time: Option<Millis>,
}

impl PlayerData {
    pub fn new(max_hp: i32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            is_invulnerable: false,
            can_double_jump: false,
            is_grounded: false,
            last_grounded_time: None,
            jump_buffer_time: None,
            facing_right: true,
            dodge_end_time: 0.0,
            attack_hitbox: None,
            last_hit_time: None,
        }
    }

    pub fn is_dodging(&self, now: Millis) -> bool {
        self.dodge_end_time > now
    }
}

/// Behaviour state of a zombie, recomputed from distance every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ZombieState {
    Patrol,
    Aggro,
    Attack,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZombieData {
    pub hp: i32,
    pub max_hp: i32,
    pub state: ZombieState,
    pub patrol_left: f32,
    pub patrol_right: f32,
    /// +1 walks right, -1 walks left.
    pub patrol_direction: f32,
    pub last_attack_time: Millis,
}

impl ZombieData {
    pub fn new(max_hp: i32, patrol_left: f32, patrol_right: f32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            state: ZombieState::Patrol,
            patrol_left,
            patrol_right,
            patrol_direction: 1.0,
            last_attack_time: 0.0,
        }
    }
}

/// The win trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DoorData {
    pub is_unlocked: bool,
}

/// Transient sensor spawned by a player attack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HitboxData {
    pub damage: i32,
    pub created_time: Millis,
    pub duration: Millis,
    /// Latched on first hit; never cleared.
    pub has_hit: bool,
}

impl HitboxData {
    pub fn is_expired(&self, now: Millis) -> bool {
        now - self.created_time > self.duration
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GeometryKind {
    Floor,
    Wall,
    Platform,
}
