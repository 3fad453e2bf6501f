//! Zombie behaviour: patrol, chase and lunge, picked by distance each frame.

use glam::Vec2;

use crate::api::config::Tuning;
use crate::api::state::GameState;
use crate::api::world::World;
use crate::components::data::ZombieState;
use crate::components::entity::EntityKind;
use crate::core::time::Millis;
use crate::error::SimResult;

/// Behaviour for a zombie `distance` px away from the player, horizontally.
/// Both thresholds are strict.
pub fn classify(distance: f32, tuning: &Tuning) -> ZombieState {
    if distance < tuning.attack_distance {
        ZombieState::Attack
    } else if distance < tuning.aggro_distance {
        ZombieState::Aggro
    } else {
        ZombieState::Patrol
    }
}

/// Patrol direction after checking the bounds at `x`.
fn patrol_direction(x: f32, left: f32, right: f32, current: f32) -> f32 {
    if x <= left {
        1.0
    } else if x >= right {
        -1.0
    } else {
        current
    }
}

pub fn update_zombies(
    world: &mut World,
    state: &GameState,
    now: Millis,
    tuning: &Tuning,
) -> SimResult<()> {
    if !state.is_running() {
        return Ok(());
    }

    let player_x = world.scene.player()?.pos.x;

    for id in world.scene.ids_of(EntityKind::Zombie) {
        let Some(entity) = world.scene.get(id) else {
            continue;
        };
        let x = entity.pos.x;
        let mut data = *entity.as_zombie()?;

        let distance = (x - player_x).abs();
        let dir = if player_x > x { 1.0 } else { -1.0 };
        data.state = classify(distance, tuning);

        match data.state {
            ZombieState::Attack => {
                if now - data.last_attack_time > tuning.lunge_cooldown {
                    world.add_velocity(id, Vec2::new(tuning.lunge_speed * dir, 0.0))?;
                    data.last_attack_time = now;
                    log::debug!("zombie {:?} lunges", id);
                }
            }
            ZombieState::Aggro => {
                let vel = world.velocity(id)?;
                world.set_velocity(id, Vec2::new(tuning.zombie_speed * dir, vel.y))?;
            }
            ZombieState::Patrol => {
                data.patrol_direction =
                    patrol_direction(x, data.patrol_left, data.patrol_right, data.patrol_direction);
                let vel = world.velocity(id)?;
                world.set_velocity(
                    id,
                    Vec2::new(tuning.zombie_speed * data.patrol_direction, vel.y),
                )?;
            }
        }

        if let Some(entity) = world.scene.get_mut(id) {
            *entity.as_zombie_mut()? = data;
        }
    }

    Ok(())
}
