//! # Decrypt Response Normalization
//!
//! Relayer backends disagree on the response shape: an object keyed by
//! handle (canonical hex, the raw string, or some other rendering of the
//! same number), a list in request order, or a bare value for a single
//! handle. Each shape has its own normalizer; all of them key the output by
//! the caller's original strings.

use serde_json::{Map, Value};
use shared_types::Handle;

use super::values::{ClearValue, DecryptedValues, RequestedHandle};

/// Shape of a decrypt response.
#[derive(Clone, Debug, PartialEq)]
pub enum DecryptResponse {
    /// Object keyed by some rendering of each handle.
    Keyed(Map<String, Value>),
    /// List aligned with the request order.
    Positional(Vec<Value>),
    /// Single bare value.
    Scalar(Value),
}

impl DecryptResponse {
    /// Tags a raw response.
    pub fn classify(value: Value) -> Self {
        match value {
            Value::Object(map) => DecryptResponse::Keyed(map),
            Value::Array(list) => DecryptResponse::Positional(list),
            other => DecryptResponse::Scalar(other),
        }
    }

    /// Maps the response onto `requested`. Handles the backend did not
    /// answer are absent from the result.
    pub fn normalize(&self, requested: &[RequestedHandle]) -> DecryptedValues {
        match self {
            DecryptResponse::Keyed(map) => normalize_keyed(map, requested),
            DecryptResponse::Positional(list) => normalize_positional(list, requested),
            DecryptResponse::Scalar(value) => normalize_scalar(value, requested),
        }
    }
}

fn normalize_keyed(map: &Map<String, Value>, requested: &[RequestedHandle]) -> DecryptedValues {
    let mut out = DecryptedValues::new();
    for entry in requested {
        let value = map
            .get(&entry.handle.canonical_hex())
            .or_else(|| map.get(&entry.original))
            .or_else(|| find_numeric_key(map, &entry.handle));
        if let Some(clear) = value.and_then(ClearValue::from_json) {
            out.insert(entry.original.clone(), clear);
        }
    }
    out
}

fn find_numeric_key<'a>(map: &'a Map<String, Value>, handle: &Handle) -> Option<&'a Value> {
    map.iter()
        .find(|(key, _)| Handle::parse(key).is_ok_and(|parsed| parsed == *handle))
        .map(|(_, value)| value)
}

fn normalize_positional(list: &[Value], requested: &[RequestedHandle]) -> DecryptedValues {
    requested
        .iter()
        .zip(list)
        .filter_map(|(entry, value)| {
            ClearValue::from_json(value).map(|clear| (entry.original.clone(), clear))
        })
        .collect()
}

fn normalize_scalar(value: &Value, requested: &[RequestedHandle]) -> DecryptedValues {
    let mut out = DecryptedValues::new();
    if let [only] = requested {
        if let Some(clear) = ClearValue::from_json(value) {
            out.insert(only.original.clone(), clear);
        }
    }
    out
}
