//! Decoding of submitted HTML forms.
//!
//! Fields arrive as text. They are decoded into the typed records here
//! rather than by the extractor, so that a rejected submission can be
//! shown again with what the user typed.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Number, Value};
use std::collections::HashMap;

pub type FormFields = HashMap<String, String>;

fn coerce(text: &str) -> Value {
    let trimmed = text.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        return Value::from(n);
    }
    if let Some(n) = trimmed.parse::<f64>().ok().and_then(Number::from_f64) {
        return Value::Number(n);
    }
    Value::String(text.to_string())
}

fn object(fields: &FormFields) -> Map<String, Value> {
    fields.iter().map(|(k, v)| (k.clone(), coerce(v))).collect()
}

/// Decodes every field at once. Unknown fields are ignored.
pub fn decode<T: DeserializeOwned>(fields: &FormFields) -> Result<T, String> {
    serde_json::from_value(Value::Object(object(fields))).map_err(|e| e.to_string())
}

/// The default record with each submitted field that decodes on its own
/// laid over it. Used to refill a form after `decode` failed.
pub fn salvage<T>(fields: &FormFields) -> T
where
    T: Serialize + DeserializeOwned + Default,
{
    let fallback = T::default();
    let mut record = match serde_json::to_value(&fallback) {
        Ok(Value::Object(record)) => record,
        _ => return fallback,
    };

    let mut keys: Vec<&String> = fields.keys().collect();
    keys.sort();

    for key in keys {
        if !record.contains_key(key.as_str()) {
            continue;
        }
        let mut candidate = record.clone();
        candidate.insert(key.clone(), coerce(&fields[key]));
        if serde_json::from_value::<T>(Value::Object(candidate.clone())).is_ok() {
            record = candidate;
        }
    }

    serde_json::from_value(Value::Object(record)).unwrap_or(fallback)
}
