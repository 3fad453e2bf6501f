use crate::api::state::GameState;
use crate::api::types::SimEvent;
use crate::api::world::World;
use crate::components::entity::EntityKind;
use crate::error::SimResult;

/// Unlock the door once the last zombie is gone.
pub fn evaluate_win(world: &mut World, state: &mut GameState) -> SimResult<()> {
    if !state.is_running() || world.scene.any_of(EntityKind::Zombie) {
        return Ok(());
    }

    let door = world.scene.door_mut()?;
    let id = door.id;
    let data = door.as_door_mut()?;
    if data.is_unlocked {
        return Ok(());
    }
    data.is_unlocked = true;
    state.victory = true;
    world.emit(SimEvent::DoorUnlocked { door: id });
    log::info!("all zombies defeated, door {:?} unlocked", id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::Tuning;
    use crate::level;
    use glam::Vec2;

    fn world_with_door() -> World {
        let tuning = Tuning::default();
        let mut world = World::new(Vec2::ZERO);
        level::spawn_door(&mut world, &tuning, Vec2::new(275.0, 722.0));
        world
    }

    #[test]
    fn unlocks_once_when_no_zombies() {
        let mut world = world_with_door();
        let mut state = GameState::default();

        evaluate_win(&mut world, &mut state).unwrap();
        assert!(state.victory);
        assert_eq!(world.drain_events().len(), 1);

        evaluate_win(&mut world, &mut state).unwrap();
        assert!(state.victory);
        assert!(world.drain_events().is_empty());
    }

    #[test]
    fn stays_locked_while_a_zombie_lives() {
        let mut world = world_with_door();
        level::spawn_zombie(&mut world, &Tuning::default(), Vec2::ZERO, 0.0, 10.0);
        let mut state = GameState::default();
        evaluate_win(&mut world, &mut state).unwrap();
        assert!(!state.victory);
        assert!(!world.scene.door_mut().unwrap().as_door_mut().unwrap().is_unlocked);
    }

    #[test]
    fn no_victory_after_game_over() {
        let mut world = world_with_door();
        let mut state = GameState {
            game_over: true,
            ..Default::default()
        };
        evaluate_win(&mut world, &mut state).unwrap();
        assert!(!state.victory);
    }

    #[test]
    fn missing_door_is_an_error() {
        let mut world = World::new(Vec2::ZERO);
        let mut state = GameState::default();
        assert!(evaluate_win(&mut world, &mut state).is_err());
    }
}
