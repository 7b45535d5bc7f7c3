use wasm_bindgen::JsValue;
use web_sys::Storage;

use tessera_core::{OptionStore, OptionsError};

/// `window.localStorage`, or nothing when the browser refuses access.
#[derive(Clone, Debug)]
pub struct LocalStorageStore {
    storage: Option<Storage>,
}

impl LocalStorageStore {
    pub fn from_window() -> Self {
        let storage = web_sys::window().and_then(|window| window.local_storage().ok().flatten());
        Self { storage }
    }

    pub fn is_available(&self) -> bool {
        self.storage.is_some()
    }

    pub fn remove_item(&self, key: &str) {
        if let Some(storage) = self.storage.as_ref() {
            let _ = storage.remove_item(key);
        }
    }
}

impl OptionStore for LocalStorageStore {
    fn get_item(&self, key: &str) -> Option<String> {
        let raw = self.storage.as_ref()?.get_item(key).ok()??;
        if raw.is_empty() {
            return None;
        }
        Some(raw)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), OptionsError> {
        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| OptionsError::Storage("local storage unavailable".to_string()))?;
        storage
            .set_item(key, value)
            .map_err(|err| OptionsError::Storage(js_err(err)))
    }
}

pub(crate) fn js_err(error: JsValue) -> String {
    if let Some(value) = error.as_string() {
        return value;
    }
    if let Ok(json) = js_sys::JSON::stringify(&error) {
        if let Some(value) = json.as_string() {
            return value;
        }
    }
    "js error".to_string()
}
