use thiserror::Error;

/// Rejected network operations. Non-fatal: the caller logs and carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetError {
    #[error("already connected to server")]
    AlreadyConnected,
    #[error("connection attempt already in progress")]
    AlreadyConnecting,
    #[error("cannot send `{0}`: not connected to server")]
    NotConnected(String),
    #[error("not connected to any server")]
    NotConnectedToAny,
    #[error("invalid server URL")]
    InvalidUrl,
    #[error("network subsystem is disabled")]
    Disabled,
}

/// Rejected session lifecycle calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no active session")]
    NoActiveSession,
    #[error("session is already paused")]
    AlreadyPaused,
    #[error("session is not paused")]
    NotPaused,
}

/// A single entity failed its update; the frame continues without it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EntityError {
    #[error("entity {id} has a non-finite velocity")]
    NonFiniteVelocity { id: u32 },
    #[error("entity {id} moved to a non-finite position")]
    NonFinitePosition { id: u32 },
}

/// Persistence failures. Caught inside the store layer and surfaced as bool/Option.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to encode character: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("storage backend failed: {0}")]
    Backend(String),
}
