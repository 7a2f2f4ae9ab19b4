use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

/// Reads `attribute` from a JSON object, converting strings, numbers and
/// booleans through `FromStr`. Anything else, or a failed conversion, is `None`.
pub fn get_attribute<T>(value: &Value, attribute: &str) -> Option<T>
where
    T: FromStr,
{
    value.get(attribute).and_then(|v| match v {
        Value::String(s) => T::from_str(s).ok(),
        Value::Number(n) => T::from_str(&n.to_string()).ok(),
        Value::Bool(b) => T::from_str(&b.to_string()).ok(),
        _ => None,
    })
}

/// Numeric attribute, accepting both `1` and `"1"`.
pub fn get_number(value: &Value, attribute: &str) -> Option<f64> {
    get_attribute::<f64>(value, attribute)
}

/// Non-empty string attribute.
pub fn get_text(value: &Value, attribute: &str) -> Option<String> {
    get_attribute::<String>(value, attribute).filter(|s| !s.is_empty())
}

/// Canvas ids show up as both `"123"` and `123` depending on the export.
pub fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, found {}",
            other
        ))),
    }
}

/// Treats an explicit `null` the same as a missing field.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A list of ids, each a string or a number. `null` reads as empty.
pub fn id_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    values
        .unwrap_or_default()
        .into_iter()
        .map(|v| match v {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(serde::de::Error::custom(format!(
                "expected string or number id, found {}",
                other
            ))),
        })
        .collect()
}
