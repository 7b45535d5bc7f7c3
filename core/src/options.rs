use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::catalog::NONE_PATTERN_ID;

pub const OPTIONS_STORAGE_KEY: &str = "tessera.grid.options";

pub const SCALE_DEFAULT: f64 = 1.0;
pub const OFFSET_DEFAULT: f64 = 0.0;

const KEY_PATTERN_ID: &str = "patternId";
const KEY_SCALE: &str = "scale";
const KEY_OFFSET_X: &str = "offsetX";
const KEY_OFFSET_Y: &str = "offsetY";

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridOptions {
    pub pattern_id: String,
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            pattern_id: NONE_PATTERN_ID.to_string(),
            scale: SCALE_DEFAULT,
            offset_x: OFFSET_DEFAULT,
            offset_y: OFFSET_DEFAULT,
        }
    }
}

/// A single-field update coming from one control.
#[derive(Clone, Debug, PartialEq)]
pub enum OptionChange {
    Pattern(String),
    Scale(f64),
    OffsetX(f64),
    OffsetY(f64),
}

impl OptionChange {
    pub fn key(&self) -> &'static str {
        match self {
            OptionChange::Pattern(_) => KEY_PATTERN_ID,
            OptionChange::Scale(_) => KEY_SCALE,
            OptionChange::OffsetX(_) => KEY_OFFSET_X,
            OptionChange::OffsetY(_) => KEY_OFFSET_Y,
        }
    }
}

/// Key-value persistence the options record is written to.
pub trait OptionStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), OptionsError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    Encode(String),
    Storage(String),
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionsError::Encode(reason) => write!(f, "failed to encode options: {reason}"),
            OptionsError::Storage(reason) => write!(f, "failed to write options: {reason}"),
        }
    }
}

impl std::error::Error for OptionsError {}

impl GridOptions {
    pub fn apply(&mut self, change: OptionChange) {
        match change {
            OptionChange::Pattern(id) => self.pattern_id = id,
            OptionChange::Scale(value) => self.scale = value,
            OptionChange::OffsetX(value) => self.offset_x = value,
            OptionChange::OffsetY(value) => self.offset_y = value,
        }
    }

    /// Overlays whatever is persisted under `key` onto `self`.
    ///
    /// Only well-typed known fields are taken; anything unreadable leaves the
    /// current value in place. Returns the number of fields restored.
    pub fn load(&mut self, store: &dyn OptionStore, key: &str) -> usize {
        let Some(raw) = store.get_item(key) else {
            return 0;
        };
        self.merge_json(&raw)
    }

    pub fn merge_json(&mut self, raw: &str) -> usize {
        let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(raw) else {
            return 0;
        };
        let mut restored = 0;
        if let Some(id) = fields.get(KEY_PATTERN_ID).and_then(Value::as_str) {
            self.pattern_id = id.to_string();
            restored += 1;
        }
        for (key, slot) in [
            (KEY_SCALE, &mut self.scale),
            (KEY_OFFSET_X, &mut self.offset_x),
            (KEY_OFFSET_Y, &mut self.offset_y),
        ] {
            if let Some(value) = number_field(&fields, key) {
                *slot = value;
                restored += 1;
            }
        }
        restored
    }

    pub fn to_json(&self) -> Result<String, OptionsError> {
        serde_json::to_string(self).map_err(|err| OptionsError::Encode(err.to_string()))
    }

    pub fn store(&self, store: &dyn OptionStore, key: &str) -> Result<(), OptionsError> {
        let raw = self.to_json()?;
        store.set_item(key, &raw)
    }
}

fn number_field(fields: &Map<String, Value>, key: &str) -> Option<f64> {
    fields.get(key).and_then(Value::as_f64)
}

/// In-memory store, used off the browser and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.items.borrow_mut().insert(key.to_string(), value.to_string());
        store
    }
}

impl OptionStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), OptionsError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_keys() {
        let options = GridOptions {
            pattern_id: "hex-pointy".to_string(),
            scale: 0.5,
            offset_x: 0.25,
            offset_y: 0.75,
        };
        let raw = options.to_json().expect("encode");
        assert_eq!(
            raw,
            r#"{"patternId":"hex-pointy","scale":0.5,"offsetX":0.25,"offsetY":0.75}"#
        );
    }

    #[test]
    fn wrongly_typed_field_keeps_default() {
        let mut options = GridOptions::default();
        let restored = options.merge_json(r#"{"scale":"big","offsetX":0.5,"extra":true}"#);
        assert_eq!(restored, 1);
        assert_eq!(options.scale, SCALE_DEFAULT);
        assert_eq!(options.offset_x, 0.5);
    }

    #[test]
    fn non_object_json_is_ignored() {
        let mut options = GridOptions::default();
        assert_eq!(options.merge_json("[1, 2, 3]"), 0);
        assert_eq!(options.merge_json("null"), 0);
        assert_eq!(options, GridOptions::default());
    }

    #[test]
    fn apply_touches_one_field() {
        let mut options = GridOptions::default();
        options.apply(OptionChange::OffsetY(0.3));
        assert_eq!(
            options,
            GridOptions {
                offset_y: 0.3,
                ..GridOptions::default()
            }
        );
        assert_eq!(OptionChange::OffsetY(0.3).key(), "offsetY");
    }
}
