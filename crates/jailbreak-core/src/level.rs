//! Arena construction: the prefab spawners and the default level.

use glam::Vec2;

use crate::api::config::{SimConfig, Tuning};
use crate::api::types::EntityId;
use crate::api::world::World;
use crate::components::data::{DoorData, GeometryKind, PlayerData, ZombieData};
use crate::components::entity::{Entity, EntityData};
use crate::core::physics::{BodyDesc, ColliderDesc, ColliderMaterial};

pub const PLAYER_SIZE: f32 = 40.0;
pub const ZOMBIE_SIZE: f32 = 35.0;
pub const DOOR_SIZE: Vec2 = Vec2::new(50.0, 80.0);
const FLOOR_HEIGHT: f32 = 50.0;
const WALL_THICKNESS: f32 = 20.0;

pub fn spawn_player(world: &mut World, tuning: &Tuning, pos: Vec2) -> EntityId {
    let size = Vec2::splat(PLAYER_SIZE);
    let id = world.next_id();
    let entity = Entity::new(id, EntityData::Player(PlayerData::new(tuning.player_max_hp)))
        .with_size(size);
    let desc = BodyDesc::dynamic(ColliderDesc::rect(size))
        .with_position(pos)
        .with_linear_damping(0.6)
        .with_filter(tuning.layers.player);
    let material = ColliderMaterial {
        restitution: 0.0,
        friction: 0.01,
        density: 0.001,
    };
    world.spawn_with_body(entity, desc, material)
}

pub fn spawn_zombie(
    world: &mut World,
    tuning: &Tuning,
    pos: Vec2,
    patrol_left: f32,
    patrol_right: f32,
) -> EntityId {
    let size = Vec2::splat(ZOMBIE_SIZE);
    let id = world.next_id();
    let data = ZombieData::new(tuning.zombie_max_hp, patrol_left, patrol_right);
    let entity = Entity::new(id, EntityData::Zombie(data)).with_size(size);
    let desc = BodyDesc::dynamic(ColliderDesc::rect(size))
        .with_position(pos)
        .with_linear_damping(3.0)
        .with_filter(tuning.layers.enemy);
    let material = ColliderMaterial {
        restitution: 0.0,
        friction: 0.01,
        density: 0.001,
    };
    world.spawn_with_body(entity, desc, material)
}

/// Floors, walls and platforms: immovable and collidable.
pub fn spawn_geometry(
    world: &mut World,
    tuning: &Tuning,
    kind: GeometryKind,
    pos: Vec2,
    size: Vec2,
) -> EntityId {
    let id = world.next_id();
    let entity = Entity::new(id, EntityData::Geometry(kind)).with_size(size);
    let desc = BodyDesc::fixed(ColliderDesc::rect(size))
        .with_position(pos)
        .with_filter(tuning.layers.environment);
    world.spawn_with_body(entity, desc, ColliderMaterial::default())
}

/// The win trigger: a fixed sensor.
pub fn spawn_door(world: &mut World, tuning: &Tuning, pos: Vec2) -> EntityId {
    let id = world.next_id();
    let entity = Entity::new(id, EntityData::Door(DoorData::default())).with_size(DOOR_SIZE);
    let desc = BodyDesc::fixed(ColliderDesc::rect(DOOR_SIZE))
        .with_position(pos)
        .with_sensor(true)
        .with_filter(tuning.layers.trigger);
    world.spawn_with_body(entity, desc, ColliderMaterial::default())
}

/// The prison arena: floor, side walls, two platforms, two zombies and the
/// door, laid out for the configured screen size.
pub fn build_default_level(world: &mut World, config: &SimConfig) {
    let w = config.world_width;
    let h = config.world_height;
    let t = &config.tuning;

    spawn_player(world, t, Vec2::new(100.0, h - 200.0));

    spawn_geometry(
        world,
        t,
        GeometryKind::Floor,
        Vec2::new(w / 2.0, h - FLOOR_HEIGHT / 2.0),
        Vec2::new(w, FLOOR_HEIGHT),
    );
    for x in [-WALL_THICKNESS / 2.0, w + WALL_THICKNESS / 2.0] {
        spawn_geometry(
            world,
            t,
            GeometryKind::Wall,
            Vec2::new(x, h / 2.0),
            Vec2::new(WALL_THICKNESS, h),
        );
    }
    spawn_geometry(
        world,
        t,
        GeometryKind::Platform,
        Vec2::new(200.0, h - 300.0),
        Vec2::new(150.0, 20.0),
    );
    spawn_geometry(
        world,
        t,
        GeometryKind::Platform,
        Vec2::new(320.0, h - 450.0),
        Vec2::new(120.0, 20.0),
    );

    spawn_zombie(world, t, Vec2::new(250.0, h - 150.0), 200.0, 300.0);
    spawn_zombie(world, t, Vec2::new(320.0, h - 500.0), 280.0, 360.0);

    spawn_door(
        world,
        t,
        Vec2::new(w - 100.0, h - FLOOR_HEIGHT - DOOR_SIZE.y / 2.0),
    );

    log::info!(
        "level built: {} entities in a {}x{} arena",
        world.scene.len(),
        w,
        h
    );
}
