use js_sys::Function;
use log::error;
use tonio_engine::SessionHooks;
use wasm_bindgen::JsValue;

/// Forwards lifecycle notifications to a JavaScript callback as `(kind, detail)`.
pub struct JsHooks {
    callback: Function,
}

impl JsHooks {
    pub fn new(callback: Function) -> Self {
        Self { callback }
    }

    fn emit(&self, kind: &str, detail: &str) {
        let result = self.callback.call2(
            &JsValue::NULL,
            &JsValue::from_str(kind),
            &JsValue::from_str(detail),
        );
        if let Err(err) = result {
            error!("UI callback failed for {}: {:?}", kind, err);
        }
    }
}

impl SessionHooks for JsHooks {
    fn on_game_start(&mut self, multiplayer: bool) {
        self.emit("start", if multiplayer { "multiplayer" } else { "single" });
    }

    fn on_pause(&mut self) {
        self.emit("pause", "");
    }

    fn on_resume(&mut self) {
        self.emit("resume", "");
    }

    fn on_session_end(&mut self) {
        self.emit("end", "");
    }

    fn on_message(&mut self, text: &str) {
        self.emit("message", text);
    }
}
