//! MessagePack codec for values crossing the wrapper boundary

use rmpv::Value;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// Encode a value into MessagePack bytes
pub fn encode(value: &Value) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    rmpv::encode::write_value(&mut buf, value)
        .map_err(|e| Error::EncodingFailed(format!("failed to encode value: {e}")))?;
    Ok(buf)
}

/// Decode MessagePack bytes into a value
pub fn decode(bytes: &[u8]) -> Result<Value> {
    let mut reader = bytes;
    let value = rmpv::decode::read_value(&mut reader)
        .map_err(|e| Error::EncodingFailed(format!("failed to decode value: {e}")))?;

    if !reader.is_empty() {
        return Err(Error::EncodingFailed(format!(
            "{} trailing byte(s) after decoded value",
            reader.len()
        )));
    }

    Ok(value)
}

/// Convert any serializable type into a native value
pub fn to_value<T: Serialize>(value: T) -> Result<Value> {
    rmpv::ext::to_value(value).map_err(|e| Error::EncodingFailed(e.to_string()))
}

/// Convert a native value into a deserializable type
pub fn from_value<T: DeserializeOwned>(value: Value) -> Result<T> {
    rmpv::ext::from_value(value).map_err(|e| Error::EncodingFailed(e.to_string()))
}

/// Look up a string key in a map value
pub fn map_get<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value
        .as_map()?
        .iter()
        .find(|(k, _)| k.as_str() == Some(key))
        .map(|(_, v)| v)
}
