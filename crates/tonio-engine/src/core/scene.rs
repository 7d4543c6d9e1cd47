use crate::api::types::EntityId;
use crate::components::entity::Entity;

/// Active entity set using a flat Vec.
/// Designed for small-to-medium entity counts (hundreds, not millions).
/// Update and render walk entities in insertion order.
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: Vec::with_capacity(64),
        }
    }

    /// Add an entity to the scene.
    pub fn spawn(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Remove an entity by ID, fully unlinking it. Returns the removed entity if found.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(idx))
    }

    /// Remove every entity matching `pred`. Returns how many were removed.
    pub fn despawn_where(&mut self, mut pred: impl FnMut(&Entity) -> bool) -> usize {
        let before = self.entities.len();
        self.entities.retain(|e| !pred(e));
        before - self.entities.len()
    }

    /// Get a reference to an entity by ID.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Get a mutable reference to an entity by ID.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Find a player entity by its network identity.
    pub fn find_by_network_id(&self, network_id: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.network_id() == Some(network_id))
    }

    /// Find a player entity by its network identity (mutable).
    pub fn find_by_network_id_mut(&mut self, network_id: &str) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.network_id() == Some(network_id))
    }

    /// Iterate over all entities.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Iterate over all entities mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Number of entities flagged as the local player.
    pub fn local_player_count(&self) -> usize {
        self.entities.iter().filter(|e| e.is_local_player()).count()
    }

    /// Number of entities in the scene.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Clear all entities.
    pub fn clear(&mut self) {
        self.entities.clear();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
