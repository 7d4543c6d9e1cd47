use glam::Vec2;
use crate::api::types::EntityId;
use crate::components::animation::AnimationComponent;
use crate::components::player::PlayerComponent;
use crate::components::sprite::SpriteComponent;
use crate::world::aabb::Aabb;

/// Fat Entity — a single struct with optional capabilities.
/// Update and render dispatch on which capabilities are present.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Whether this entity is active (inactive entities are skipped).
    pub active: bool,
    /// Top-left position in world space.
    pub pos: Vec2,
    /// Box size in world units. Never negative; set through `with_size`/`set_size`.
    size: Vec2,
    /// Velocity in world units per second.
    pub velocity: Vec2,
    /// Image to draw (optional — entities without sprites draw a placeholder box).
    pub sprite: Option<SpriteComponent>,
    /// Frame animation driving `sprite`.
    pub animation: Option<AnimationComponent>,
    /// Player capability.
    pub player: Option<PlayerComponent>,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            pos: Vec2::ZERO,
            size: Vec2::ZERO,
            velocity: Vec2::ZERO,
            sprite: None,
            animation: None,
            player: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size.max(Vec2::ZERO);
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_sprite(mut self, sprite: SpriteComponent) -> Self {
        self.sprite = Some(sprite);
        self
    }

    pub fn with_animation(mut self, animation: AnimationComponent) -> Self {
        self.animation = Some(animation);
        self
    }

    pub fn with_player(mut self, player: PlayerComponent) -> Self {
        self.player = Some(player);
        self
    }

    pub fn set_size(&mut self, size: Vec2) {
        self.size = size.max(Vec2::ZERO);
    }

    // -- Queries --

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    /// Strict box overlap; shared edges do not collide.
    pub fn collides_with(&self, other: &Entity) -> bool {
        self.bounds().overlaps(&other.bounds())
    }

    pub fn is_local_player(&self) -> bool {
        self.player.as_ref().is_some_and(|p| p.is_local)
    }

    /// Network identity of a player entity.
    pub fn network_id(&self) -> Option<&str> {
        self.player.as_ref().and_then(|p| p.network_id.as_deref())
    }
}
