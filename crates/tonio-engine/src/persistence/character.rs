//! Character factory and the saved-character document.

use glam::Vec2;
use log::{error, info};
use serde::{Deserialize, Serialize};

use crate::api::types::{Appearance, CharacterClass, EntityId};
use crate::components::entity::Entity;
use crate::components::player::PlayerComponent;
use crate::error::PersistenceError;
use crate::persistence::store::KeyValueStore;

/// Storage key for the single saved character.
pub const SAVE_KEY: &str = "savedCharacter";

/// Player body size in world units.
pub const CHARACTER_SIZE: Vec2 = Vec2::new(30.0, 50.0);

/// Build a player entity at the origin. An empty name becomes `"Player"`.
pub fn create_character(
    id: EntityId,
    name: &str,
    class: CharacterClass,
    appearance: Appearance,
    speed: f32,
) -> Entity {
    Entity::new(id)
        .with_tag("player")
        .with_size(CHARACTER_SIZE)
        .with_player(PlayerComponent::new(name, class, appearance).with_speed(speed))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavedPosition {
    pub x: f32,
    pub y: f32,
}

/// What gets written under [`SAVE_KEY`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedCharacter {
    pub name: String,
    pub class: CharacterClass,
    pub appearance: Appearance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<SavedPosition>,
}

impl SavedCharacter {
    /// `None` for entities without the player capability.
    pub fn from_entity(entity: &Entity) -> Option<Self> {
        let player = entity.player.as_ref()?;
        Some(Self {
            name: player.name.clone(),
            class: player.class,
            appearance: player.appearance,
            position: Some(SavedPosition { x: entity.pos.x, y: entity.pos.y }),
        })
    }

    pub fn into_entity(self, id: EntityId, speed: f32) -> Entity {
        let mut entity = create_character(id, &self.name, self.class, self.appearance, speed);
        if let Some(p) = self.position.filter(|p| p.x.is_finite() && p.y.is_finite()) {
            entity.pos = Vec2::new(p.x, p.y);
        }
        entity
    }
}

fn write(store: &mut dyn KeyValueStore, entity: &Entity) -> Result<bool, PersistenceError> {
    let Some(saved) = SavedCharacter::from_entity(entity) else {
        return Ok(false);
    };
    let json = serde_json::to_string(&saved)?;
    store.save(SAVE_KEY, &json)?;
    Ok(true)
}

fn read(store: &dyn KeyValueStore) -> Result<Option<SavedCharacter>, PersistenceError> {
    match store.load(SAVE_KEY)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Save the player's name, class, appearance and position.
/// Returns `false` on any failure, or if `entity` is not a player.
pub fn save_character(store: &mut dyn KeyValueStore, entity: &Entity) -> bool {
    match write(store, entity) {
        Ok(true) => {
            info!("Character saved successfully");
            true
        }
        Ok(false) => {
            error!("Failed to save character: entity {} is not a player", entity.id.0);
            false
        }
        Err(err) => {
            error!("Failed to save character: {}", err);
            false
        }
    }
}

/// Rebuild the saved player, or `None` if nothing is saved or the document is unreadable.
pub fn load_character(store: &dyn KeyValueStore, id: EntityId, speed: f32) -> Option<Entity> {
    match read(store) {
        Ok(Some(saved)) => {
            info!("Character loaded successfully: {}", saved.name);
            Some(saved.into_entity(id, speed))
        }
        Ok(None) => {
            info!("No saved character found");
            None
        }
        Err(err) => {
            error!("Failed to load character: {}", err);
            None
        }
    }
}

pub fn delete_character(store: &mut dyn KeyValueStore) -> bool {
    match store.delete(SAVE_KEY) {
        Ok(()) => {
            info!("Character deleted successfully");
            true
        }
        Err(err) => {
            error!("Failed to delete character: {}", err);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::store::MemoryStore;

    #[test]
    fn create_defaults() {
        let e = create_character(EntityId(1), "", CharacterClass::Ranger, Appearance::TypeC, 150.0);
        let p = e.player.as_ref().unwrap();
        assert_eq!(p.name, "Player");
        assert_eq!(p.speed, 150.0);
        assert!(!p.is_local);
        assert_eq!(e.pos, Vec2::ZERO);
        assert_eq!(e.size(), CHARACTER_SIZE);
    }

    #[test]
    fn save_then_load_restores_position() {
        let mut store = MemoryStore::new();
        let mut hero = create_character(EntityId(1), "Ada", CharacterClass::Mage, Appearance::TypeB, 200.0);
        hero.pos = Vec2::new(-40.0, 12.5);
        assert!(save_character(&mut store, &hero));

        let json = store.load(SAVE_KEY).unwrap().unwrap();
        let doc: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(doc["class"], "mage");
        assert_eq!(doc["appearance"], "type-b");
        assert_eq!(doc["position"]["x"], -40.0);

        let loaded = load_character(&store, EntityId(9), 200.0).unwrap();
        assert_eq!(loaded.id, EntityId(9));
        assert_eq!(loaded.pos, Vec2::new(-40.0, 12.5));
        assert_eq!(loaded.player.unwrap().name, "Ada");
    }

    #[test]
    fn missing_position_loads_at_origin() {
        let mut store = MemoryStore::new();
        store
            .save(SAVE_KEY, r#"{"name":"Bo","class":"rogue","appearance":"type-a"}"#)
            .unwrap();
        let loaded = load_character(&store, EntityId(1), 200.0).unwrap();
        assert_eq!(loaded.pos, Vec2::ZERO);
        assert_eq!(loaded.player.unwrap().class, CharacterClass::Rogue);
    }

    #[test]
    fn bad_documents_and_non_players() {
        let mut store = MemoryStore::new();
        assert!(load_character(&store, EntityId(1), 200.0).is_none());

        store.save(SAVE_KEY, "not json").unwrap();
        assert!(load_character(&store, EntityId(1), 200.0).is_none());

        assert!(!save_character(&mut store, &Entity::new(EntityId(3))));
        assert!(delete_character(&mut store));
        assert!(store.is_empty());
    }
}
