use serde::{Deserialize, Serialize};

use crate::world::obstacle::ObstacleLayout;

/// Frames a single step may cover when no explicit delta cap is set.
pub const FRAMES_PER_MAX_STEP: f32 = 6.0;

/// Which optional subsystems a session is built with.
/// Disabled subsystems get a no-op stand-in rather than being absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Subsystems {
    /// Keyboard input. Off: the local player sees no keys held.
    pub input: bool,
    /// Menu/lifecycle hooks. Off: hooks are ignored.
    pub ui: bool,
    /// Simulated multiplayer. Off: every network request is rejected.
    pub network: bool,
}

impl Default for Subsystems {
    fn default() -> Self {
        Self {
            input: true,
            ui: true,
            network: true,
        }
    }
}

/// Configuration for a session, provided by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Viewport width in pixels.
    pub viewport_width: f32,
    /// Viewport height in pixels.
    pub viewport_height: f32,
    /// Target frame interval in seconds (default: 1/60).
    pub frame_interval: f32,
    /// Largest delta a single frame may simulate, in seconds.
    /// Unset: `FRAMES_PER_MAX_STEP` frame intervals.
    pub max_frame_dt: Option<f32>,
    /// Seed for every random choice the session makes.
    pub seed: u64,
    /// Exact number of obstacles generated at startup.
    pub obstacle_count: usize,
    /// Obstacles land in `[-half, half)` on both axes.
    pub obstacle_half_extent: f32,
    /// Share of obstacles that are trees.
    pub tree_probability: f32,
    /// Movement speed given to newly created characters.
    pub player_speed: f32,
    /// Address handed to the network layer when a multiplayer session starts.
    pub server_url: String,
    /// Camera follow smoothing. 0 snaps to the tracked entity.
    pub camera_smoothing: f32,
    pub subsystems: Subsystems,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport_width: 800.0,
            viewport_height: 600.0,
            frame_interval: 1.0 / 60.0,
            max_frame_dt: None,
            seed: 42,
            obstacle_count: 50,
            obstacle_half_extent: 1000.0,
            tree_probability: 0.7,
            player_speed: 200.0,
            server_url: "sim://localhost".to_string(),
            camera_smoothing: 0.0,
            subsystems: Subsystems::default(),
        }
    }
}

impl GameConfig {
    /// Parse a config from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Delta cap handed to the frame scheduler.
    pub fn frame_dt_cap(&self) -> f32 {
        self.max_frame_dt
            .unwrap_or(self.frame_interval * FRAMES_PER_MAX_STEP)
    }

    pub fn obstacle_layout(&self) -> ObstacleLayout {
        ObstacleLayout {
            count: self.obstacle_count,
            half_extent: self.obstacle_half_extent,
            tree_probability: self.tree_probability,
        }
    }
}
