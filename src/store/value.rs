use serde::{Deserialize, Serialize};

/// Opaque value held by a [`ScopedStore`](super::ScopedStore)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum StoreValue {
    Text(String),
    List(Vec<String>),
    Bytes(Vec<u8>),
    Json(serde_json::Value),
}

impl StoreValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            StoreValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            StoreValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            StoreValue::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            StoreValue::Json(value) => Some(value),
            _ => None,
        }
    }

    /// JSON view of any variant (bytes become an array of numbers)
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            StoreValue::Text(s) => serde_json::Value::String(s.clone()),
            StoreValue::List(items) => serde_json::Value::from(items.clone()),
            StoreValue::Bytes(bytes) => serde_json::Value::from(bytes.clone()),
            StoreValue::Json(value) => value.clone(),
        }
    }
}

impl From<String> for StoreValue {
    fn from(value: String) -> Self {
        StoreValue::Text(value)
    }
}

impl From<&str> for StoreValue {
    fn from(value: &str) -> Self {
        StoreValue::Text(value.to_string())
    }
}

impl From<Vec<String>> for StoreValue {
    fn from(value: Vec<String>) -> Self {
        StoreValue::List(value)
    }
}

impl From<Vec<u8>> for StoreValue {
    fn from(value: Vec<u8>) -> Self {
        StoreValue::Bytes(value)
    }
}

impl From<serde_json::Value> for StoreValue {
    fn from(value: serde_json::Value) -> Self {
        StoreValue::Json(value)
    }
}
