use tonio_engine::{KeyValueStore, PersistenceError};
use wasm_bindgen::JsValue;
use web_sys::Storage;

/// `window.localStorage`-backed store.
pub struct LocalStorageStore {
    storage: Storage,
}

fn js_error(err: JsValue) -> PersistenceError {
    PersistenceError::Backend(format!("{:?}", err))
}

impl LocalStorageStore {
    /// `None` outside a browser window or when storage is blocked.
    pub fn new() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(Self { storage })
    }
}

impl KeyValueStore for LocalStorageStore {
    fn save(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.storage.set_item(key, value).map_err(js_error)
    }

    fn load(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        self.storage.get_item(key).map_err(js_error)
    }

    fn delete(&mut self, key: &str) -> Result<(), PersistenceError> {
        self.storage.remove_item(key).map_err(js_error)
    }
}
