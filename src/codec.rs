//! Plain keyed-map codec
//!
//! Converts any game entity to and from a `serde_json::Map`. Enums travel
//! by their SCREAMING_SNAKE_CASE names and nested entities are encoded
//! recursively. Decoding a die rebuilds its balance from the faces and
//! rejects more faces than the die's size.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Codec errors
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a keyed map, got {0}")]
    NotAMap(&'static str),
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "map",
    }
}

/// Encode an entity as a keyed map
pub fn encode<T: Serialize>(entity: &T) -> Result<Map<String, Value>, CodecError> {
    match serde_json::to_value(entity)? {
        Value::Object(map) => Ok(map),
        other => Err(CodecError::NotAMap(kind(&other))),
    }
}

/// Decode an entity from a keyed map
pub fn decode<T: DeserializeOwned>(map: Map<String, Value>) -> Result<T, CodecError> {
    Ok(serde_json::from_value(Value::Object(map))?)
}

/// Encode to a JSON string
pub fn to_json<T: Serialize>(entity: &T) -> Result<String, CodecError> {
    Ok(serde_json::to_string_pretty(entity)?)
}

/// Decode from a JSON string holding a keyed map
pub fn from_json<T: DeserializeOwned>(text: &str) -> Result<T, CodecError> {
    match serde_json::from_str::<Value>(text)? {
        Value::Object(map) => decode(map),
        other => Err(CodecError::NotAMap(kind(&other))),
    }
}
