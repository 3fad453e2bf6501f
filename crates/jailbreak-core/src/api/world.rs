use glam::Vec2;

use crate::api::types::{EntityId, SimEvent};
use crate::components::entity::Entity;
use crate::core::physics::{BodyDesc, ColliderMaterial, CollisionPair, PhysicsBody, PhysicsWorld};
use crate::core::scene::Scene;
use crate::error::{SimError, SimResult};

/// Mutable access to the entity registry and physics world, passed to every
/// system. Entities and bodies are created and destroyed together here.
pub struct World {
    pub scene: Scene,
    pub physics: PhysicsWorld,
    events: Vec<SimEvent>,
    next_id: u32,
}

impl World {
    pub fn new(gravity: Vec2) -> Self {
        Self {
            scene: Scene::new(),
            physics: PhysicsWorld::new(gravity),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Record an event for the driver.
    pub fn emit(&mut self, event: SimEvent) {
        self.events.push(event);
    }

    /// Take every event emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    /// Spawn an entity with a physics body. Returns the EntityId.
    /// The entity's position is set from the BodyDesc.
    pub fn spawn_with_body(
        &mut self,
        entity: Entity,
        desc: BodyDesc,
        material: ColliderMaterial,
    ) -> EntityId {
        let id = entity.id;
        let body = self.physics.create_body(id, &desc, material);
        let entity = entity.with_pos(desc.position).with_body(body);
        self.scene.spawn(entity);
        id
    }

    /// Despawn an entity, cleaning up its physics body if present.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let entity = self.scene.despawn(id)?;
        if let Some(body) = &entity.body {
            self.physics.remove_body(body);
        }
        Some(entity)
    }

    fn body_of(&self, id: EntityId) -> SimResult<PhysicsBody> {
        self.scene
            .get(id)
            .ok_or(SimError::MissingBody(id))?
            .require_body()
    }

    /// Get the linear velocity of an entity's physics body.
    pub fn velocity(&self, id: EntityId) -> SimResult<Vec2> {
        let body = self.body_of(id)?;
        Ok(self.physics.velocity(&body))
    }

    /// Set the linear velocity of an entity's physics body.
    pub fn set_velocity(&mut self, id: EntityId, vel: Vec2) -> SimResult<()> {
        let body = self.body_of(id)?;
        self.physics.set_velocity(&body, vel);
        Ok(())
    }

    /// Add an instantaneous change of velocity (jumps, dodges, lunges).
    pub fn add_velocity(&mut self, id: EntityId, delta: Vec2) -> SimResult<()> {
        let body = self.body_of(id)?;
        self.physics.add_velocity(&body, delta);
        Ok(())
    }

    pub fn set_collision_mask(&mut self, id: EntityId, mask: u32) -> SimResult<()> {
        let body = self.body_of(id)?;
        self.physics.set_collision_mask(&body, mask);
        Ok(())
    }

    /// Touching pairs as of the current poses.
    pub fn contact_pairs(&self) -> Vec<CollisionPair> {
        self.physics.contact_pairs()
    }

    /// Step the physics simulation and sync positions back to entities.
    pub fn step_physics(&mut self, dt: f32) {
        self.physics.step(dt);

        for entity in self.scene.iter_mut() {
            if let Some(body) = &entity.body {
                let (pos, _) = self.physics.body_position(body);
                entity.pos = pos;
            }
        }
    }
}
