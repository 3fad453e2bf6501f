use glam::Vec2;
use serde::Serialize;

use crate::api::types::EntityId;
use crate::components::data::{DoorData, GeometryKind, HitboxData, PlayerData, ZombieData};
use crate::core::physics::PhysicsBody;
use crate::error::{SimError, SimResult};

/// Gameplay payload, one variant per entity kind.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityData {
    Player(PlayerData),
    Zombie(ZombieData),
    Door(DoorData),
    AttackHitbox(HitboxData),
    Geometry(GeometryKind),
}

/// Payload-free label for an entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EntityKind {
    Player,
    Zombie,
    Door,
    AttackHitbox,
    Geometry,
}

impl EntityData {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityData::Player(_) => EntityKind::Player,
            EntityData::Zombie(_) => EntityKind::Zombie,
            EntityData::Door(_) => EntityKind::Door,
            EntityData::AttackHitbox(_) => EntityKind::AttackHitbox,
            EntityData::Geometry(_) => EntityKind::Geometry,
        }
    }
}

/// Fat Entity: body handle, presentation size and gameplay payload in one struct.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// Centre position in world space, synced from physics after each step.
    pub pos: Vec2,
    /// Full width/height. Presentation metadata; the simulation never changes it.
    pub size: Vec2,
    pub body: Option<PhysicsBody>,
    pub data: EntityData,
}

impl Entity {
    /// Create a new entity with the given ID and payload at the origin.
    pub fn new(id: EntityId, data: EntityData) -> Self {
        Self {
            id,
            pos: Vec2::ZERO,
            size: Vec2::ONE,
            body: None,
            data,
        }
    }

    // -- Builder pattern --

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    pub fn with_body(mut self, body: PhysicsBody) -> Self {
        self.body = Some(body);
        self
    }

    pub fn kind(&self) -> EntityKind {
        self.data.kind()
    }

    /// The physics body, or an error for entities that must have one.
    pub fn require_body(&self) -> SimResult<PhysicsBody> {
        self.body.ok_or(SimError::MissingBody(self.id))
    }

    // -- Typed payload access. A mismatch is an invariant violation. --

    fn mismatch(&self, expected: EntityKind) -> SimError {
        SimError::KindMismatch {
            id: self.id,
            expected,
            found: self.kind(),
        }
    }

    pub fn as_player(&self) -> SimResult<&PlayerData> {
        match &self.data {
            EntityData::Player(p) => Ok(p),
            _ => Err(self.mismatch(EntityKind::Player)),
        }
    }

    pub fn as_player_mut(&mut self) -> SimResult<&mut PlayerData> {
        let err = self.mismatch(EntityKind::Player);
        match &mut self.data {
            EntityData::Player(p) => Ok(p),
            _ => Err(err),
        }
    }

    pub fn as_zombie(&self) -> SimResult<&ZombieData> {
        match &self.data {
            EntityData::Zombie(z) => Ok(z),
            _ => Err(self.mismatch(EntityKind::Zombie)),
        }
    }

    pub fn as_zombie_mut(&mut self) -> SimResult<&mut ZombieData> {
        let err = self.mismatch(EntityKind::Zombie);
        match &mut self.data {
            EntityData::Zombie(z) => Ok(z),
            _ => Err(err),
        }
    }

    pub fn as_door_mut(&mut self) -> SimResult<&mut DoorData> {
        let err = self.mismatch(EntityKind::Door);
        match &mut self.data {
            EntityData::Door(d) => Ok(d),
            _ => Err(err),
        }
    }

    pub fn as_hitbox(&self) -> SimResult<&HitboxData> {
        match &self.data {
            EntityData::AttackHitbox(h) => Ok(h),
            _ => Err(self.mismatch(EntityKind::AttackHitbox)),
        }
    }

    pub fn as_hitbox_mut(&mut self) -> SimResult<&mut HitboxData> {
        let err = self.mismatch(EntityKind::AttackHitbox);
        match &mut self.data {
            EntityData::AttackHitbox(h) => Ok(h),
            _ => Err(err),
        }
    }
}
