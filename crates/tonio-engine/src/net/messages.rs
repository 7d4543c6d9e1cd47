use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::types::CharacterData;

// Event names on the network bus.
pub const EVENT_CONNECT: &str = "connect";
pub const EVENT_DISCONNECT: &str = "disconnect";
pub const EVENT_ERROR: &str = "error";
pub const EVENT_PLAYER_MOVE: &str = "player_move";
pub const EVENT_PLAYER_JOIN: &str = "player_join";
pub const EVENT_PLAYER_LEAVE: &str = "player_leave";
pub const EVENT_JOIN_SUCCESS: &str = "join_success";

/// Every event name the network may fire.
pub const ALL_EVENTS: [&str; 7] = [
    EVENT_CONNECT,
    EVENT_DISCONNECT,
    EVENT_ERROR,
    EVENT_PLAYER_MOVE,
    EVENT_PLAYER_JOIN,
    EVENT_PLAYER_LEAVE,
    EVENT_JOIN_SUCCESS,
];

/// Last-known state of a player, as held in the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: String,
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub character: CharacterData,
}

impl PlayerRecord {
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Events delivered to bus subscribers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum NetEvent {
    Connect { client_id: String },
    Disconnect,
    Error { message: String },
    PlayerMove { player_id: String, x: f32, y: f32 },
    PlayerJoin(PlayerRecord),
    PlayerLeave { player_id: String },
    JoinSuccess { player_id: String, position: Vec2, character: CharacterData },
}

impl NetEvent {
    /// Bus event name this payload is published under.
    pub fn name(&self) -> &'static str {
        match self {
            NetEvent::Connect { .. } => EVENT_CONNECT,
            NetEvent::Disconnect => EVENT_DISCONNECT,
            NetEvent::Error { .. } => EVENT_ERROR,
            NetEvent::PlayerMove { .. } => EVENT_PLAYER_MOVE,
            NetEvent::PlayerJoin(_) => EVENT_PLAYER_JOIN,
            NetEvent::PlayerLeave { .. } => EVENT_PLAYER_LEAVE,
            NetEvent::JoinSuccess { .. } => EVENT_JOIN_SUCCESS,
        }
    }
}

/// Messages a client sends to the (simulated) server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ClientMessage {
    PlayerMove { x: f32, y: f32 },
    JoinGame { x: f32, y: f32, character: CharacterData },
    /// Any other named message. Accepted while connected; the simulation does not answer it.
    Other { name: String, payload: serde_json::Value },
}

impl ClientMessage {
    pub fn name(&self) -> &str {
        match self {
            ClientMessage::PlayerMove { .. } => EVENT_PLAYER_MOVE,
            ClientMessage::JoinGame { .. } => "join_game",
            ClientMessage::Other { name, .. } => name,
        }
    }
}
