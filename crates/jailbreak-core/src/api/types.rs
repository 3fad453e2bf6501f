use bytemuck::{Pod, Zeroable};
use serde::Serialize;

/// Unique identifier for an entity in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EntityId(pub u32);

/// Something that happened during a tick, for audio, effects and overlays.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    Jumped,
    DoubleJumped,
    Dodged,
    AttackStarted { hitbox: EntityId },
    ZombieHit { zombie: EntityId, hp: i32 },
    ZombieDefeated { zombie: EntityId },
    PlayerHit { hp: i32 },
    GameOver,
    DoorUnlocked { door: EntityId },
}

impl SimEvent {
    /// Stable numeric code used in the flat [`GameEvent`] form.
    pub fn kind(&self) -> u32 {
        match self {
            SimEvent::Jumped => 1,
            SimEvent::DoubleJumped => 2,
            SimEvent::Dodged => 3,
            SimEvent::AttackStarted { .. } => 4,
            SimEvent::ZombieHit { .. } => 5,
            SimEvent::ZombieDefeated { .. } => 6,
            SimEvent::PlayerHit { .. } => 7,
            SimEvent::GameOver => 8,
            SimEvent::DoorUnlocked { .. } => 9,
        }
    }
}

/// A game event packed for a host-side float buffer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;
}

impl From<&SimEvent> for GameEvent {
    fn from(event: &SimEvent) -> Self {
        let (a, b) = match *event {
            SimEvent::AttackStarted { hitbox } => (hitbox.0 as f32, 0.0),
            SimEvent::ZombieHit { zombie, hp } => (zombie.0 as f32, hp as f32),
            SimEvent::ZombieDefeated { zombie } => (zombie.0 as f32, 0.0),
            SimEvent::PlayerHit { hp } => (hp as f32, 0.0),
            SimEvent::DoorUnlocked { door } => (door.0 as f32, 0.0),
            SimEvent::Jumped | SimEvent::DoubleJumped | SimEvent::Dodged | SimEvent::GameOver => {
                (0.0, 0.0)
            }
        };
        GameEvent {
            kind: event.kind() as f32,
            a,
            b,
            c: 0.0,
        }
    }
}

/// Pack events into a flat float slice (4 floats per event).
pub fn pack_events(events: &[SimEvent]) -> Vec<f32> {
    let packed: Vec<GameEvent> = events.iter().map(GameEvent::from).collect();
    bytemuck::cast_slice(&packed).to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zombie_hit_packs_id_and_hp() {
        let ev = GameEvent::from(&SimEvent::ZombieHit {
            zombie: EntityId(7),
            hp: 10,
        });
        assert_eq!(ev.kind, 5.0);
        assert_eq!(ev.a, 7.0);
        assert_eq!(ev.b, 10.0);
    }

    #[test]
    fn packed_buffer_has_four_floats_per_event() {
        let flat = pack_events(&[SimEvent::Jumped, SimEvent::GameOver]);
        assert_eq!(flat.len(), 2 * GameEvent::FLOATS);
        assert_eq!(flat[0], 1.0);
        assert_eq!(flat[4], 8.0);
    }

    #[test]
    fn events_serialize_with_type_tag() {
        let json = serde_json::to_string(&SimEvent::PlayerHit { hp: 90 }).unwrap();
        assert_eq!(json, r#"{"type":"PlayerHit","hp":90}"#);
    }
}
