//! Decoding of the backend's `{ "data": ... }` response envelope.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    #[serde(default)]
    pub data: Option<Value>,
}

/// Decodes `data` as a list.
///
/// A missing or null `data` is an empty list, a single object becomes a
/// one-element list, and entries that do not decode are skipped.
pub(crate) fn decode_list<T: DeserializeOwned>(data: Option<Value>, entity: &str) -> Vec<T> {
    let items = match data {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::Array(items)) => items,
        Some(other) => vec![other],
    };

    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<T>(item) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::warn!("Skipping malformed {} entry: {}", entity, e);
                None
            }
        })
        .collect()
}

/// Decodes `data` as a single object; `None` when absent or undecodable.
pub(crate) fn decode_one<T: DeserializeOwned>(data: Option<Value>, entity: &str) -> Option<T> {
    match data {
        None | Some(Value::Null) => None,
        Some(value) => match serde_json::from_value::<T>(value) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::warn!("Malformed {} payload: {}", entity, e);
                None
            }
        },
    }
}
