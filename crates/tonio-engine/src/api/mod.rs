pub mod config;
pub mod game;
pub mod hooks;
pub mod types;
