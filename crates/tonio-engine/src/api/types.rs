use serde::{Deserialize, Serialize};

/// Unique identifier for an entity in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Player class chosen at character creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterClass {
    #[default]
    Warrior,
    Mage,
    Ranger,
    Rogue,
}

impl CharacterClass {
    pub const ALL: [CharacterClass; 4] = [
        CharacterClass::Warrior,
        CharacterClass::Mage,
        CharacterClass::Ranger,
        CharacterClass::Rogue,
    ];

    /// Parse a lowercase class name. Unknown names return `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "warrior" => Some(Self::Warrior),
            "mage" => Some(Self::Mage),
            "ranger" => Some(Self::Ranger),
            "rogue" => Some(Self::Rogue),
            _ => None,
        }
    }
}

/// Player appearance variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Appearance {
    #[default]
    #[serde(rename = "type-a")]
    TypeA,
    #[serde(rename = "type-b")]
    TypeB,
    #[serde(rename = "type-c")]
    TypeC,
}

impl Appearance {
    pub const ALL: [Appearance; 3] = [Appearance::TypeA, Appearance::TypeB, Appearance::TypeC];

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "type-a" => Some(Self::TypeA),
            "type-b" => Some(Self::TypeB),
            "type-c" => Some(Self::TypeC),
            _ => None,
        }
    }
}

/// Class and appearance, as exchanged with the network layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CharacterData {
    pub class: CharacterClass,
    pub appearance: Appearance,
}
