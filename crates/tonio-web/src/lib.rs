use std::cell::RefCell;

use js_sys::Function;
use log::{error, warn};
use tonio_engine::{GameConfig, NoopHooks, SessionHooks};
use wasm_bindgen::prelude::*;

pub mod hooks;
pub mod runner;
pub mod storage;

pub use hooks::JsHooks;
pub use runner::GameRunner;
pub use storage::LocalStorageStore;

thread_local! {
    static RUNNER: RefCell<Option<GameRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the runner. Calls made before `game_init` are logged and dropped.
fn with_runner<R: Default>(f: impl FnOnce(&mut GameRunner) -> R) -> R {
    RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
        Some(runner) => f(runner),
        None => {
            warn!("Game not initialized. Call game_init() first.");
            R::default()
        }
    })
}

fn with_store<R: Default>(f: impl FnOnce(&mut LocalStorageStore) -> R) -> R {
    match LocalStorageStore::new() {
        Some(mut store) => f(&mut store),
        None => {
            error!("localStorage is unavailable");
            R::default()
        }
    }
}

/// Build the session. `config_json` may be empty for defaults; `on_event`
/// receives `(kind, detail)` lifecycle notifications.
#[wasm_bindgen]
pub fn game_init(config_json: &str, on_event: Option<Function>) -> bool {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let (config, ok) = if config_json.trim().is_empty() {
        (GameConfig::default(), true)
    } else {
        match GameConfig::from_json(config_json) {
            Ok(config) => (config, true),
            Err(err) => {
                error!("Invalid config, using defaults: {}", err);
                (GameConfig::default(), false)
            }
        }
    };
    let hooks: Box<dyn SessionHooks> = match on_event {
        Some(callback) => Box::new(JsHooks::new(callback)),
        None => Box::new(NoopHooks),
    };

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(GameRunner::new(config, hooks));
    });
    log::info!("tonio: initialized");
    ok
}

/// Call from `requestAnimationFrame` with its timestamp.
/// Returns `true` when the frame updated and new draw commands are available.
#[wasm_bindgen]
pub fn game_frame(now_ms: f64) -> bool {
    with_runner(|r| r.frame(now_ms))
}

#[wasm_bindgen]
pub fn game_key_down(code: &str) {
    with_runner(|r| r.key_down(code));
}

#[wasm_bindgen]
pub fn game_key_up(code: &str) {
    with_runner(|r| r.key_up(code));
}

#[wasm_bindgen]
pub fn game_resize(width: f32, height: f32) {
    with_runner(|r| r.resize(width, height));
}

// ---- Session lifecycle ----

#[wasm_bindgen]
pub fn game_start_single_player(name: &str, class: &str, appearance: &str) {
    with_runner(|r| r.start_single_player(name, class, appearance));
}

#[wasm_bindgen]
pub fn game_start_multiplayer(name: &str, class: &str, appearance: &str, is_host: bool) {
    with_runner(|r| r.start_multiplayer(name, class, appearance, is_host));
}

#[wasm_bindgen]
pub fn game_toggle_pause() -> bool {
    with_runner(|r| r.toggle_pause())
}

#[wasm_bindgen]
pub fn game_end_session() -> bool {
    with_runner(|r| r.end_session())
}

// ---- Saved character ----

#[wasm_bindgen]
pub fn game_save_character() -> bool {
    with_runner(|r| with_store(|store| r.save_character(store)))
}

#[wasm_bindgen]
pub fn game_continue_saved(multiplayer: bool, is_host: bool) -> bool {
    with_runner(|r| with_store(|store| r.continue_saved(store, multiplayer, is_host)))
}

#[wasm_bindgen]
pub fn game_delete_character() -> bool {
    with_runner(|r| with_store(|store| r.delete_character(store)))
}

// ---- Data accessors ----

/// JSON array of draw commands from the last updated frame.
#[wasm_bindgen]
pub fn get_draw_commands() -> String {
    with_runner(|r| r.draw_commands_json())
}

#[wasm_bindgen]
pub fn get_status() -> String {
    with_runner(|r| r.status_json())
}
