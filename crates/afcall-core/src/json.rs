//! JSON encoding and big-integer-safe decoding.
//!
//! Big integers travel in two forms: bare JSON numbers wider than 64 bits,
//! and strings tagged with a trailing `n` (`"123n"`). [`JsonDecoding::BigInt`]
//! keeps both exact: the body is parsed once with arbitrary-precision numbers
//! and tagged strings are revived into integers before the target type is
//! deserialized. Integer fields that must round-trip through the tagged form
//! use [`bigint`] via `#[serde(with = "afcall_core::json::bigint")]`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Number, Value};

use crate::error::CoreError;

/// How a response body is decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonDecoding {
    /// Exact integers; `"<digits>n"` strings become integers.
    #[default]
    BigInt,
    /// Plain `serde_json` decoding. Tagged strings stay strings.
    Standard,
}

pub fn decode<T: DeserializeOwned>(text: &str, decoding: JsonDecoding) -> Result<T, CoreError> {
    match decoding {
        JsonDecoding::Standard => serde_json::from_str(text).map_err(CoreError::Decode),
        JsonDecoding::BigInt => {
            let mut value: Value = serde_json::from_str(text).map_err(CoreError::Decode)?;
            revive_tagged_bigints(&mut value);
            serde_json::from_value(value).map_err(CoreError::Decode)
        }
    }
}

pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, CoreError> {
    serde_json::to_vec(value).map_err(CoreError::Encode)
}

fn revive_tagged_bigints(value: &mut Value) {
    let revived = match value {
        Value::String(s) => parse_tagged_bigint(s),
        Value::Array(items) => {
            items.iter_mut().for_each(revive_tagged_bigints);
            None
        }
        Value::Object(map) => {
            map.values_mut().for_each(revive_tagged_bigints);
            None
        }
        _ => None,
    };
    if let Some(number) = revived {
        *value = Value::Number(number);
    }
}

/// `"-?<digits>n"` -> exact integer. Anything else is left alone.
fn parse_tagged_bigint(s: &str) -> Option<Number> {
    let digits = s.strip_suffix('n')?;
    let unsigned = digits.strip_prefix('-').unwrap_or(digits);
    if unsigned.is_empty() || !unsigned.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Rejects leading zeros, same as the JSON number grammar.
    serde_json::from_str::<Number>(digits).ok()
}

/// Serde adapter for integers carried as tagged big-integer strings.
///
/// Serializes as `"<digits>n"`. Deserializes from JSON numbers, plain digit
/// strings and tagged strings, so it accepts both server encodings.
pub mod bigint {
    use std::fmt::Display;
    use std::str::FromStr;

    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        serializer.collect_str(&format_args!("{value}n"))
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        let digits = match &raw {
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.strip_suffix('n').unwrap_or(s).to_owned(),
            other => {
                return Err(D::Error::custom(format!(
                    "expected an integer or big integer string, found {other}"
                )))
            }
        };
        digits
            .parse()
            .map_err(|e| D::Error::custom(format!("invalid big integer `{digits}`: {e}")))
    }
}
