use log::{error, info, warn};
use serde_json::json;
use tonio_engine::{
    delete_character, Appearance, CharacterClass, ConnectionState, DrawList, Entity, FrameReport,
    Game, GameConfig, KeyCode, KeyValueStore, SessionHooks,
};

/// Owns the session and the draw commands recorded by the last updated frame.
///
/// The browser drives it: one `frame` per animation callback, key and resize
/// events in between, and `draw_commands_json` read back after each frame.
pub struct GameRunner {
    game: Game,
    draw_list: DrawList,
    last_report: FrameReport,
}

impl GameRunner {
    pub fn new(config: GameConfig, hooks: Box<dyn SessionHooks>) -> Self {
        Self {
            game: Game::new(config).with_hooks(hooks),
            draw_list: DrawList::new(),
            last_report: FrameReport::default(),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run one animation frame. Paused frames keep the previous draw commands.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        let mut scratch = DrawList::new();
        let report = self.game.frame(now_ms, &mut scratch);
        if report.updated {
            self.draw_list = scratch;
        }
        self.last_report = report;
        report.updated
    }

    /// Forward a `KeyboardEvent.code`. Keys outside the vocabulary are ignored.
    pub fn key_down(&mut self, code: &str) {
        if let Some(key) = KeyCode::from_code(code) {
            self.game.key_down(key);
        }
    }

    pub fn key_up(&mut self, code: &str) {
        if let Some(key) = KeyCode::from_code(code) {
            self.game.key_up(key);
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.game.resize(width, height);
    }

    pub fn start_single_player(&mut self, name: &str, class: &str, appearance: &str) {
        let player = self.character(name, class, appearance);
        self.game.start_single_player(player);
    }

    pub fn start_multiplayer(&mut self, name: &str, class: &str, appearance: &str, is_host: bool) {
        let player = self.character(name, class, appearance);
        self.game.start_multiplayer(player, is_host);
    }

    fn character(&mut self, name: &str, class: &str, appearance: &str) -> Entity {
        let class = CharacterClass::parse(class).unwrap_or_else(|| {
            warn!("Unknown class '{}', using default", class);
            CharacterClass::default()
        });
        let appearance = Appearance::parse(appearance).unwrap_or_else(|| {
            warn!("Unknown appearance '{}', using default", appearance);
            Appearance::default()
        });
        self.game.create_character(name, class, appearance)
    }

    /// Returns `false` when there is no session to pause or resume.
    pub fn toggle_pause(&mut self) -> bool {
        self.game.toggle_pause().is_ok()
    }

    pub fn end_session(&mut self) -> bool {
        let ended = self.game.end_session().is_ok();
        if ended {
            self.draw_list.clear();
        }
        ended
    }

    // -- Persistence --

    pub fn save_character(&self, store: &mut dyn KeyValueStore) -> bool {
        self.game.save_character(store)
    }

    /// Start a session with the saved character. `false` if nothing is saved.
    pub fn continue_saved(&mut self, store: &dyn KeyValueStore, multiplayer: bool, is_host: bool) -> bool {
        let Some(player) = self.game.load_character(store) else {
            return false;
        };
        info!("Continuing with saved character");
        if multiplayer {
            self.game.start_multiplayer(player, is_host);
        } else {
            self.game.start_single_player(player);
        }
        true
    }

    pub fn delete_character(&self, store: &mut dyn KeyValueStore) -> bool {
        delete_character(store)
    }

    // -- Accessors read by JavaScript --

    pub fn draw_commands_json(&self) -> String {
        self.draw_list.to_json().unwrap_or_else(|err| {
            error!("Failed to encode draw commands: {}", err);
            "[]".to_string()
        })
    }

    pub fn status_json(&self) -> String {
        let connection = match self.game.network().state() {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected => "connected",
        };
        json!({
            "session": self.game.has_session(),
            "running": self.game.is_running(),
            "paused": self.game.is_paused(),
            "multiplayer": self.game.is_multiplayer(),
            "host": self.game.is_host(),
            "connection": connection,
            "clientId": self.game.network().client_id(),
            "entities": self.game.scene().len(),
            "obstaclesDrawn": self.last_report.obstacles_drawn,
            "entitiesDrawn": self.last_report.entities_drawn,
        })
        .to_string()
    }
}
