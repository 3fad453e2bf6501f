//! Player controller: turns input intent into motion, jumps, dodges and attacks.

use glam::Vec2;

use crate::api::config::Tuning;
use crate::api::state::GameState;
use crate::api::types::{EntityId, SimEvent};
use crate::api::world::World;
use crate::components::data::{HitboxData, PlayerData};
use crate::components::entity::{Entity, EntityData};
use crate::core::physics::{BodyDesc, ColliderDesc, ColliderMaterial};
use crate::core::time::Millis;
use crate::error::SimResult;
use crate::input::intent::{InputEdges, InputIntent};

/// Weight of the current horizontal velocity when easing toward the target.
const VELOCITY_RETAIN: f32 = 0.8;

/// New horizontal velocity: exponential ease toward `target`, clamped to
/// the player's top speed.
pub fn smooth_horizontal(current: f32, target: f32, max_speed: f32) -> f32 {
    let eased = current * VELOCITY_RETAIN + target * (1.0 - VELOCITY_RETAIN);
    eased.clamp(-max_speed, max_speed)
}

/// Owns the previous-frame input used to derive press edges.
#[derive(Debug, Default)]
pub struct PlayerController {
    edges: InputEdges,
}

impl PlayerController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(
        &mut self,
        world: &mut World,
        state: &GameState,
        input: &InputIntent,
        now: Millis,
        tuning: &Tuning,
    ) -> SimResult<()> {
        let pressed = self.edges.advance(input);
        if !state.is_running() {
            return Ok(());
        }

        let player = world.scene.player()?;
        let id = player.id;
        let pos = player.pos;
        let size = player.size;
        let mut data = *player.as_player()?;
        let mut vel = world.velocity(id)?;

        // Grounded check
        let grounded = vel.y.abs() < tuning.grounded_velocity;
        if grounded {
            data.last_grounded_time = Some(now);
            data.can_double_jump = true;
        }
        data.is_grounded = grounded;

        let in_coyote = data
            .last_grounded_time
            .is_some_and(|t| now - t < tuning.coyote_time);

        // Dodge state drives invulnerability and the collision mask.
        if data.is_dodging(now) {
            data.is_invulnerable = true;
            world.set_collision_mask(id, tuning.layers.player_dodge_mask)?;
        } else {
            data.is_invulnerable = false;
            world.set_collision_mask(id, tuning.layers.player.mask)?;
        }

        // Horizontal movement; right is applied last and wins.
        let mut target = 0.0;
        if input.left {
            target = -tuning.player_speed;
            data.facing_right = false;
        }
        if input.right {
            target = tuning.player_speed;
            data.facing_right = true;
        }
        vel.x = smooth_horizontal(vel.x, target, tuning.player_speed);
        world.set_velocity(id, vel)?;

        // Jump buffering
        if pressed.jump {
            data.jump_buffer_time = Some(now);
        }
        let has_buffered_jump = data
            .jump_buffer_time
            .is_some_and(|t| now - t < tuning.jump_buffer_time);

        if has_buffered_jump {
            if grounded || in_coyote {
                world.add_velocity(id, Vec2::new(0.0, -tuning.jump_speed))?;
                data.jump_buffer_time = None;
                // One ground jump per coyote window.
                data.last_grounded_time = None;
                world.emit(SimEvent::Jumped);
            } else if data.can_double_jump {
                world.set_velocity(id, Vec2::new(vel.x, 0.0))?;
                world.add_velocity(id, Vec2::new(0.0, -tuning.jump_speed))?;
                data.jump_buffer_time = None;
                data.can_double_jump = false;
                world.emit(SimEvent::DoubleJumped);
            }
        }

        // Dodge roll
        if pressed.roll && !data.is_dodging(now) {
            let dir = if data.facing_right { 1.0 } else { -1.0 };
            world.add_velocity(id, Vec2::new(tuning.dodge_speed * dir, 0.0))?;
            data.dodge_end_time = now + tuning.dodge_duration;
            // Enemies pass through from the press frame on.
            data.is_invulnerable = true;
            world.set_collision_mask(id, tuning.layers.player_dodge_mask)?;
            world.emit(SimEvent::Dodged);
        }

        // Attack
        if pressed.attack && data.attack_hitbox.is_none() {
            let hitbox = spawn_attack_hitbox(world, tuning, pos, size, data.facing_right, now);
            data.attack_hitbox = Some(hitbox);
            world.emit(SimEvent::AttackStarted { hitbox });
        }

        // Hitbox expiry
        if let Some(hitbox) = data.attack_hitbox {
            let expired = match world.scene.get(hitbox) {
                Some(entity) => entity.as_hitbox()?.is_expired(now),
                None => true,
            };
            if expired {
                world.despawn(hitbox);
                data.attack_hitbox = None;
            }
        }

        *world.scene.player_mut()?.as_player_mut()? = data;
        Ok(())
    }
}

/// Sensor in front of the player, sized by `tuning.hitbox_size`.
fn spawn_attack_hitbox(
    world: &mut World,
    tuning: &Tuning,
    player_pos: Vec2,
    player_size: Vec2,
    facing_right: bool,
    now: Millis,
) -> EntityId {
    let size = tuning.hitbox_size;
    let reach = player_size.x / 2.0 + size.x / 2.0;
    let offset = if facing_right { reach } else { -reach };
    let pos = player_pos + Vec2::new(offset, 0.0);

    let id = world.next_id();
    let data = HitboxData {
        damage: tuning.player_damage,
        created_time: now,
        duration: tuning.attack_duration,
        has_hit: false,
    };
    let entity = Entity::new(id, EntityData::AttackHitbox(data)).with_size(size);
    let desc = BodyDesc::kinematic(ColliderDesc::rect(size))
        .with_position(pos)
        .with_sensor(true)
        .with_filter(tuning.layers.player_attack);
    world.spawn_with_body(entity, desc, ColliderMaterial::default())
}

/// Copy of the player's payload, for tests and presentation.
pub fn player_data(world: &World) -> SimResult<PlayerData> {
    Ok(*world.scene.player()?.as_player()?)
}
