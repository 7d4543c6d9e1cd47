pub mod api;
pub mod core;
pub mod components;
pub mod error;
pub mod input;
pub mod net;
pub mod persistence;
pub mod renderer;
pub mod systems;
pub mod world;

// Re-export key types at crate root for convenience
pub use api::config::{GameConfig, Subsystems};
pub use api::game::{FrameReport, Game, SessionMode};
pub use api::hooks::{NoopHooks, SessionHooks};
pub use api::types::{Appearance, CharacterClass, CharacterData, EntityId};
pub use components::animation::AnimationComponent;
pub use components::entity::Entity;
pub use components::player::PlayerComponent;
pub use components::sprite::SpriteComponent;
pub use crate::core::rng::Rng;
pub use crate::core::scene::Scene;
pub use crate::core::scheduler::FrameScheduler;
pub use crate::core::time::FrameClock;
pub use crate::core::timers::TimerQueue;
pub use error::{EntityError, NetError, PersistenceError, SessionError};
pub use input::queue::{InputEvent, InputProvider, InputQueue, InputState, KeyCode, NullInput};
pub use net::bus::{EventBus, Handler};
pub use net::link::{NetworkLink, OfflineLink};
pub use net::messages::{ClientMessage, NetEvent, PlayerRecord};
pub use net::sim::{ConnectionState, NetworkDelays, NetworkSim};
pub use persistence::character::{
    create_character, delete_character, load_character, save_character, SavedCharacter, SAVE_KEY,
};
pub use persistence::store::{FileStore, KeyValueStore, MemoryStore};
pub use renderer::draw_list::{DrawCommand, DrawList};
pub use renderer::sink::{Color, NullSink, RenderSink};
pub use world::aabb::Aabb;
pub use world::camera::Camera2D;
pub use world::obstacle::{generate_obstacles, Obstacle, ObstacleKind, ObstacleLayout};
pub use world::World;
