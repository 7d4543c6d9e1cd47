use crate::api::types::{Appearance, CharacterClass, CharacterData};
use crate::renderer::sink::Color;

/// Default movement speed in world units per second.
pub const DEFAULT_SPEED: f32 = 200.0;

/// Player capability attached to an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerComponent {
    /// Display name. Never empty.
    pub name: String,
    pub class: CharacterClass,
    pub appearance: Appearance,
    /// Movement speed in world units per second. Always positive.
    pub speed: f32,
    /// Only the local player reads input; remote players move on network events.
    pub is_local: bool,
    /// Identity assigned by the network session, if any.
    pub network_id: Option<String>,
}

impl PlayerComponent {
    /// Build a player. Empty names fall back to `"Player"`, non-positive speeds
    /// to the default.
    pub fn new(name: &str, class: CharacterClass, appearance: Appearance) -> Self {
        let name = name.trim();
        Self {
            name: if name.is_empty() { "Player".to_string() } else { name.to_string() },
            class,
            appearance,
            speed: DEFAULT_SPEED,
            is_local: false,
            network_id: None,
        }
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        if speed > 0.0 && speed.is_finite() {
            self.speed = speed;
        }
        self
    }

    pub fn character(&self) -> CharacterData {
        CharacterData {
            class: self.class,
            appearance: self.appearance,
        }
    }

    /// Body color by class.
    pub fn body_color(&self) -> Color {
        match self.class {
            CharacterClass::Warrior => Color::rgb(0xFF, 0x57, 0x22),
            CharacterClass::Mage => Color::rgb(0x21, 0x96, 0xF3),
            CharacterClass::Ranger => Color::rgb(0x4C, 0xAF, 0x50),
            CharacterClass::Rogue => Color::rgb(0x9C, 0x27, 0xB0),
        }
    }
}

impl Default for PlayerComponent {
    fn default() -> Self {
        Self::new("Player", CharacterClass::default(), Appearance::default())
    }
}
