//! Normalization of XML-derived JSON.
//!
//! Converting the SOAP XML to JSON loses two things: a repeated element that
//! occurs once becomes a bare object instead of a one-element list, and every
//! leaf value becomes a string. The serde helpers here undo both, so every
//! repeated field and every leaf of the response schema is read the same way.

use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;

/// A value that may be a single item or a sequence of items.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        match value {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

/// Coerce an optional single-or-many value into a sequence.
///
/// # Examples
///
/// ```
/// use skt_client::skt::{OneOrMany, force_array};
///
/// assert_eq!(force_array::<u32>(None), Vec::<u32>::new());
/// assert_eq!(force_array(Some(OneOrMany::One(1))), vec![1]);
/// assert_eq!(force_array(Some(OneOrMany::Many(vec![1, 2]))), vec![1, 2]);
/// ```
pub fn force_array<T>(value: Option<OneOrMany<T>>) -> Vec<T> {
    value.map(Vec::from).unwrap_or_default()
}

/// `deserialize_with` helper for repeated elements.
///
/// Use with `#[serde(default)]` so a missing element gives an empty list.
pub fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<OneOrMany<T>>::deserialize(deserializer).map(force_array)
}

/// `deserialize_with` helper for container elements.
///
/// Anything that is not an object (missing, null, an empty-element string)
/// reads as `None`.
pub fn object_or_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => T::deserialize(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

/// Text of a leaf value, accepting strings, numbers and booleans.
///
/// An element that also carried attributes has its text under `__text`.
pub(crate) fn leaf_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Object(mut map) => match map.remove("__text") {
            Some(Value::String(s)) => Some(s),
            _ => None,
        },
        Value::Null | Value::Array(_) => None,
    }
}

/// `deserialize_with` helper for string leaves.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(leaf_text)
}

/// `deserialize_with` helper for numeric leaves; non-numeric text reads as `None`.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let number = match value {
        Value::Number(n) => n.as_f64(),
        other => leaf_text(other).and_then(|s| s.trim().parse::<f64>().ok()),
    };
    Ok(number.filter(|n| n.is_finite()))
}

/// `deserialize_with` helper for integer leaves; non-numeric text reads as `None`.
pub fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_i64(),
        other => leaf_text(other).and_then(|s| s.trim().parse::<i64>().ok()),
    })
}

/// `deserialize_with` helper for `"true"`/`"false"` flags.
///
/// Only the text `true` (or a JSON `true`) is true; anything else is false.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_string(deserializer).map(|s| s.as_deref() == Some("true"))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn one_or_many() -> impl Strategy<Value = Option<OneOrMany<i32>>> {
        prop_oneof![
            Just(None),
            any::<i32>().prop_map(|v| Some(OneOrMany::One(v))),
            prop::collection::vec(any::<i32>(), 0..8).prop_map(|v| Some(OneOrMany::Many(v))),
        ]
    }

    proptest! {
        /// Normalizing an already-normalized sequence changes nothing
        #[test]
        fn force_array_idempotent(value in one_or_many()) {
            let once = force_array(value);
            let twice = force_array(Some(OneOrMany::Many(once.clone())));
            prop_assert_eq!(once, twice);
        }

        /// A sequence passes through unchanged
        #[test]
        fn sequence_is_identity(items in prop::collection::vec(any::<i32>(), 0..8)) {
            prop_assert_eq!(force_array(Some(OneOrMany::Many(items.clone()))), items);
        }

        /// JSON arrays and single values decode the same way as force_array
        #[test]
        fn decode_matches_force_array(value in one_or_many()) {
            let json = match &value {
                None => serde_json::Value::Null,
                Some(OneOrMany::One(v)) => serde_json::json!(v),
                Some(OneOrMany::Many(v)) => serde_json::json!(v),
            };
            let decoded: Option<OneOrMany<i32>> = serde_json::from_value(json).unwrap();
            prop_assert_eq!(force_array(decoded), force_array(value));
        }
    }
}
