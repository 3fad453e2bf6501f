use glam::Vec2;
use serde::Serialize;

use crate::api::state::GameState;
use crate::api::types::EntityId;
use crate::components::data::{GeometryKind, ZombieState};
use crate::components::entity::{Entity, EntityData, EntityKind};
use crate::core::scene::Scene;

/// Display-relevant payload of one entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum EntityDetail {
    Player {
        hp: i32,
        max_hp: i32,
        facing_right: bool,
        dodging: bool,
        grounded: bool,
    },
    Zombie {
        hp: i32,
        max_hp: i32,
        state: ZombieState,
    },
    Door {
        unlocked: bool,
    },
    AttackHitbox,
    Geometry {
        geometry: GeometryKind,
    },
}

/// What the presentation layer needs to draw one entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EntityView {
    pub id: EntityId,
    pub kind: EntityKind,
    /// Center, px.
    pub pos: Vec2,
    pub size: Vec2,
    pub detail: EntityDetail,
}

impl EntityView {
    fn from_entity(entity: &Entity) -> Self {
        let detail = match &entity.data {
            EntityData::Player(p) => EntityDetail::Player {
                hp: p.hp.max(0),
                max_hp: p.max_hp,
                facing_right: p.facing_right,
                dodging: p.is_invulnerable,
                grounded: p.is_grounded,
            },
            EntityData::Zombie(z) => EntityDetail::Zombie {
                hp: z.hp.max(0),
                max_hp: z.max_hp,
                state: z.state,
            },
            EntityData::Door(d) => EntityDetail::Door {
                unlocked: d.is_unlocked,
            },
            EntityData::AttackHitbox(_) => EntityDetail::AttackHitbox,
            EntityData::Geometry(kind) => EntityDetail::Geometry { geometry: *kind },
        };
        Self {
            id: entity.id,
            kind: entity.kind(),
            pos: entity.pos,
            size: entity.size,
            detail,
        }
    }
}

/// Read-only view of a frame, for rendering and HUDs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub now_ms: f64,
    pub paused: bool,
    pub game_over: bool,
    pub victory: bool,
    pub hit_stop: bool,
    pub entities: Vec<EntityView>,
}

impl Snapshot {
    pub fn capture(scene: &Scene, state: &GameState, now_ms: f64) -> Self {
        Self {
            now_ms,
            paused: state.paused,
            game_over: state.game_over,
            victory: state.victory,
            hit_stop: state.hit_stop_active(now_ms),
            entities: scene.iter().map(EntityView::from_entity).collect(),
        }
    }

    /// The player's view, if the player exists.
    pub fn player(&self) -> Option<&EntityView> {
        self.entities.iter().find(|e| e.kind == EntityKind::Player)
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind == kind).count()
    }
}
