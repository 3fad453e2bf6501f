use crate::api::types::EntityId;
use crate::components::entity::{Entity, EntityKind};
use crate::error::{SimError, SimResult};

/// Entity registry using a flat Vec.
/// Designed for small entity counts (tens, not thousands).
///
/// Removal reorders entities, so code that despawns while scanning takes an
/// id snapshot first with [`Scene::ids_of`].
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: Vec::with_capacity(16),
        }
    }

    /// Add an entity to the scene.
    pub fn spawn(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Remove an entity by ID. Returns the removed entity if found.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.swap_remove(idx))
    }

    /// Get a reference to an entity by ID.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Get a mutable reference to an entity by ID.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Iterate over all entities.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Iterate over all entities mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Snapshot of the ids of every entity of one kind.
    pub fn ids_of(&self, kind: EntityKind) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|e| e.kind() == kind)
            .map(|e| e.id)
            .collect()
    }

    /// Whether any entity of the given kind exists.
    pub fn any_of(&self, kind: EntityKind) -> bool {
        self.entities.iter().any(|e| e.kind() == kind)
    }

    /// Kind of an entity, if it exists.
    pub fn kind_of(&self, id: EntityId) -> Option<EntityKind> {
        self.get(id).map(Entity::kind)
    }

    pub fn player(&self) -> SimResult<&Entity> {
        self.entities
            .iter()
            .find(|e| e.kind() == EntityKind::Player)
            .ok_or(SimError::MissingPlayer)
    }

    pub fn player_mut(&mut self) -> SimResult<&mut Entity> {
        self.entities
            .iter_mut()
            .find(|e| e.kind() == EntityKind::Player)
            .ok_or(SimError::MissingPlayer)
    }

    pub fn door_mut(&mut self) -> SimResult<&mut Entity> {
        self.entities
            .iter_mut()
            .find(|e| e.kind() == EntityKind::Door)
            .ok_or(SimError::MissingDoor)
    }

    /// Number of entities in the scene.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
