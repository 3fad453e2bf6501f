//! Damage resolution over the frame's contact pairs.

use crate::api::config::Tuning;
use crate::api::state::GameState;
use crate::api::types::{EntityId, SimEvent};
use crate::api::world::World;
use crate::components::entity::EntityKind;
use crate::core::time::Millis;
use crate::error::SimResult;

pub fn resolve_damage(
    world: &mut World,
    state: &mut GameState,
    now: Millis,
    tuning: &Tuning,
) -> SimResult<()> {
    if !state.is_running() {
        return Ok(());
    }

    clear_expired_iframes(world, now, tuning)?;

    let mut defeated: Vec<EntityId> = Vec::new();

    for pair in world.contact_pairs() {
        let kinds = (
            world.scene.kind_of(pair.entity_a),
            world.scene.kind_of(pair.entity_b),
        );
        match kinds {
            (Some(EntityKind::AttackHitbox), Some(EntityKind::Zombie)) => {
                hit_zombie(world, state, pair.entity_a, pair.entity_b, now, tuning, &mut defeated)?;
            }
            (Some(EntityKind::Zombie), Some(EntityKind::AttackHitbox)) => {
                hit_zombie(world, state, pair.entity_b, pair.entity_a, now, tuning, &mut defeated)?;
            }
            (Some(EntityKind::Zombie), Some(EntityKind::Player))
            | (Some(EntityKind::Player), Some(EntityKind::Zombie)) => {
                hit_player(world, state, now, tuning)?;
            }
            _ => {}
        }
    }

    for zombie in defeated {
        if world.despawn(zombie).is_some() {
            log::info!("zombie {:?} defeated", zombie);
            world.emit(SimEvent::ZombieDefeated { zombie });
        }
    }

    Ok(())
}

fn clear_expired_iframes(world: &mut World, now: Millis, tuning: &Tuning) -> SimResult<()> {
    let player = world.scene.player_mut()?.as_player_mut()?;
    if player
        .last_hit_time
        .is_some_and(|t| now - t >= tuning.iframe_duration)
    {
        player.last_hit_time = None;
    }
    Ok(())
}

fn hit_zombie(
    world: &mut World,
    state: &mut GameState,
    hitbox: EntityId,
    zombie: EntityId,
    now: Millis,
    tuning: &Tuning,
    defeated: &mut Vec<EntityId>,
) -> SimResult<()> {
    let Some(hitbox_entity) = world.scene.get_mut(hitbox) else {
        return Ok(());
    };
    let data = hitbox_entity.as_hitbox_mut()?;
    if data.has_hit {
        return Ok(());
    }
    data.has_hit = true;
    let damage = data.damage;

    let Some(zombie_entity) = world.scene.get_mut(zombie) else {
        return Ok(());
    };
    let zombie_data = zombie_entity.as_zombie_mut()?;
    zombie_data.hp -= damage;
    let hp = zombie_data.hp;

    state.trigger_hit_stop(now, tuning.hit_stop_duration);
    world.emit(SimEvent::ZombieHit { zombie, hp });
    log::debug!("zombie {:?} hit, hp {}", zombie, hp);

    if hp <= 0 && !defeated.contains(&zombie) {
        defeated.push(zombie);
    }
    Ok(())
}

fn hit_player(
    world: &mut World,
    state: &mut GameState,
    now: Millis,
    tuning: &Tuning,
) -> SimResult<()> {
    if state.game_over {
        return Ok(());
    }
    let player = world.scene.player_mut()?.as_player_mut()?;
    if player.is_invulnerable || player.last_hit_time.is_some() {
        return Ok(());
    }

    player.hp -= tuning.zombie_damage;
    player.last_hit_time = Some(now);
    let hp = player.hp;

    state.trigger_hit_stop(now, tuning.hit_stop_duration);
    world.emit(SimEvent::PlayerHit { hp });
    log::debug!("player hit, hp {}", hp);

    if hp <= 0 {
        state.game_over = true;
        world.emit(SimEvent::GameOver);
        log::info!("game over");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::data::HitboxData;
    use crate::components::entity::{Entity, EntityData};
    use crate::core::physics::{BodyDesc, ColliderDesc, ColliderMaterial};
    use crate::level;
    use glam::Vec2;

    struct Rig {
        world: World,
        state: GameState,
        tuning: Tuning,
        player: EntityId,
    }

    impl Rig {
        /// Player at (100, 100) with nothing else around.
        fn new() -> Self {
            let tuning = Tuning::default();
            let mut world = World::new(Vec2::ZERO);
            let player = level::spawn_player(&mut world, &tuning, Vec2::new(100.0, 100.0));
            Self {
                world,
                state: GameState::default(),
                tuning,
                player,
            }
        }

        fn zombie_at(&mut self, pos: Vec2) -> EntityId {
            level::spawn_zombie(&mut self.world, &self.tuning, pos, 0.0, 1000.0)
        }

        fn hitbox_at(&mut self, pos: Vec2, now: Millis) -> EntityId {
            let id = self.world.next_id();
            let size = self.tuning.hitbox_size;
            let data = HitboxData {
                damage: self.tuning.player_damage,
                created_time: now,
                duration: self.tuning.attack_duration,
                has_hit: false,
            };
            let entity = Entity::new(id, EntityData::AttackHitbox(data)).with_size(size);
            let desc = BodyDesc::kinematic(ColliderDesc::rect(size))
                .with_position(pos)
                .with_sensor(true)
                .with_filter(self.tuning.layers.player_attack);
            self.world
                .spawn_with_body(entity, desc, ColliderMaterial::default())
        }

        fn resolve(&mut self, now: Millis) {
            resolve_damage(&mut self.world, &mut self.state, now, &self.tuning).unwrap();
        }

        fn player_hp(&self) -> i32 {
            self.world.scene.player().unwrap().as_player().unwrap().hp
        }

        fn zombie_hp(&self, id: EntityId) -> Option<i32> {
            self.world
                .scene
                .get(id)
                .map(|e| e.as_zombie().unwrap().hp)
        }
    }

    #[test]
    fn hitbox_damages_zombie_once() {
        let mut rig = Rig::new();
        let zombie = rig.zombie_at(Vec2::new(400.0, 100.0));
        rig.hitbox_at(Vec2::new(400.0, 100.0), 0.0);

        rig.resolve(0.0);
        assert_eq!(rig.zombie_hp(zombie), Some(10));
        assert_eq!(rig.state.hit_stop_until, 50.0);

        rig.resolve(16.0);
        rig.resolve(32.0);
        assert_eq!(rig.zombie_hp(zombie), Some(10));
    }

    #[test]
    fn second_hitbox_defeats_and_removes_zombie() {
        let mut rig = Rig::new();
        let zombie = rig.zombie_at(Vec2::new(400.0, 100.0));
        let first = rig.hitbox_at(Vec2::new(400.0, 100.0), 0.0);
        rig.resolve(0.0);
        rig.world.despawn(first);

        rig.hitbox_at(Vec2::new(400.0, 100.0), 300.0);
        rig.resolve(300.0);
        assert_eq!(rig.zombie_hp(zombie), None);
        assert!(rig
            .world
            .drain_events()
            .contains(&SimEvent::ZombieDefeated { zombie }));
        // Player and hitbox remain.
        assert_eq!(rig.world.physics.body_count(), 2);
    }

    #[test]
    fn hitbox_only_hits_one_zombie() {
        let mut rig = Rig::new();
        let a = rig.zombie_at(Vec2::new(400.0, 100.0));
        let b = rig.zombie_at(Vec2::new(410.0, 100.0));
        rig.hitbox_at(Vec2::new(405.0, 100.0), 0.0);
        rig.resolve(0.0);
        let hits = [a, b]
            .iter()
            .filter(|&&z| rig.zombie_hp(z) == Some(10))
            .count();
        assert_eq!(hits, 1);
    }

    #[test]
    fn zombie_contact_hurts_player_with_iframes() {
        let mut rig = Rig::new();
        rig.zombie_at(Vec2::new(130.0, 100.0));

        rig.resolve(1000.0);
        assert_eq!(rig.player_hp(), 90);
        assert_eq!(rig.state.hit_stop_until, 1050.0);

        // Still overlapping inside the i-frame window.
        rig.resolve(1200.0);
        rig.resolve(1499.0);
        assert_eq!(rig.player_hp(), 90);

        rig.resolve(1500.0);
        assert_eq!(rig.player_hp(), 80);
    }

    #[test]
    fn dodging_player_takes_no_damage() {
        let mut rig = Rig::new();
        rig.zombie_at(Vec2::new(130.0, 100.0));
        rig.world
            .scene
            .get_mut(rig.player)
            .unwrap()
            .as_player_mut()
            .unwrap()
            .is_invulnerable = true;
        rig.resolve(0.0);
        assert_eq!(rig.player_hp(), 100);
    }

    #[test]
    fn game_over_once_then_short_circuits() {
        let mut rig = Rig::new();
        rig.world.scene.player_mut().unwrap().as_player_mut().unwrap().hp = 10;
        rig.zombie_at(Vec2::new(130.0, 100.0));
        rig.zombie_at(Vec2::new(70.0, 100.0));

        rig.resolve(0.0);
        assert!(rig.state.game_over);
        assert_eq!(rig.player_hp(), 0);
        let events = rig.world.drain_events();
        assert_eq!(events.iter().filter(|e| **e == SimEvent::GameOver).count(), 1);

        rig.resolve(1000.0);
        assert_eq!(rig.player_hp(), 0);
        assert!(rig.world.drain_events().is_empty());
        assert_eq!(rig.world.scene.len(), 3);
    }

    #[test]
    fn paused_resolver_does_nothing() {
        let mut rig = Rig::new();
        rig.zombie_at(Vec2::new(130.0, 100.0));
        rig.state.paused = true;
        rig.resolve(0.0);
        assert_eq!(rig.player_hp(), 100);
    }

    #[test]
    fn hitbox_never_hurts_player() {
        let mut rig = Rig::new();
        rig.hitbox_at(Vec2::new(100.0, 100.0), 0.0);
        rig.resolve(0.0);
        assert_eq!(rig.player_hp(), 100);
        assert_eq!(rig.state.hit_stop_until, 0.0);
    }
}
