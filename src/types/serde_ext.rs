//! Lenient deserializers for the marketing API, which is loose about the
//! JSON types it sends back.

use crate::types::Timestamp;
use chrono::{DateTime, Offset, TimeZone, Utc};
use serde::de::{DeserializeOwned, Deserializer, IntoDeserializer};
use serde::Deserialize;
use serde_json::Value;

/// `""` and `null` both become `None`, like a falsy value in the page scripts.
/// Numbers and booleans are read as their text, arrays and objects as `None`.
pub fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let value = match Value::deserialize(deserializer)? {
        Value::String(value) => value,
        Value::Number(value) => value.to_string(),
        Value::Bool(value) => value.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return Ok(None),
    };
    if value.is_empty() {
        return Ok(None);
    }
    T::deserialize(value.into_deserializer()).map(Some)
}

/// Lists where a malformed record is dropped instead of failing the whole
/// document.
pub fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(Vec::<Value>::deserialize(deserializer)?
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(item) => Some(item),
            Err(error) => {
                tracing::debug!(index, %error, "malformed record dropped");
                None
            }
        })
        .collect())
}

/// Identifiers come back either as numbers or as strings.
pub fn number_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(value) => value,
        Value::Number(value) => value.to_string(),
        Value::Null => String::new(),
        value => value.to_string(),
    })
}

/// Integer regions, numeric strings included. Anything else is `None`.
pub fn lenient_region<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = match Value::deserialize(deserializer)? {
        Value::Number(value) => value.as_f64(),
        Value::String(value) => value.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(number
        .filter(|number| number.fract() == 0.0 && (0.0..=f64::from(u8::MAX)).contains(number))
        .map(|number| number as u8))
}

/// See [`Timestamp::parse`], or epoch milliseconds. Unparsable values
/// become `None` instead of failing the surrounding document.
pub fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(value) => Timestamp::parse(&value),
        Value::Number(value) => value
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
            .map(Timestamp::Absolute),
        _ => None,
    })
}

/// Like [`lenient_timestamp`], with wall clock times read as UTC.
pub fn lenient_utc_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_timestamp(deserializer)?.and_then(|timestamp| timestamp.resolve(&Utc.fix())))
}
