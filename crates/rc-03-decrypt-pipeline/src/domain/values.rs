//! Cleartext values and the handles they answer.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_types::{parse_big_uint, Handle, U256};
use std::collections::BTreeMap;

/// Decrypt results keyed by the caller's original handle strings.
pub type DecryptedValues = BTreeMap<String, ClearValue>;

/// A decrypted value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClearValue {
    /// Encrypted boolean.
    Bool(bool),
    /// Encrypted unsigned integer.
    Uint(U256),
    /// Anything else the backend returned.
    Raw(Value),
}

impl ClearValue {
    /// Interprets a backend value. `None` for JSON `null`.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(ClearValue::Bool(*b)),
            Value::Number(n) => Some(match n.as_u64() {
                Some(n) => ClearValue::Uint(U256::from(n)),
                None => ClearValue::Raw(value.clone()),
            }),
            Value::String(s) => Some(match s.as_str() {
                "true" => ClearValue::Bool(true),
                "false" => ClearValue::Bool(false),
                _ => match parse_big_uint(s) {
                    Ok(n) => ClearValue::Uint(n),
                    Err(_) => ClearValue::Raw(value.clone()),
                },
            }),
            _ => Some(ClearValue::Raw(value.clone())),
        }
    }

    /// Truthiness: booleans as is, integers non-zero.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ClearValue::Bool(b) => Some(*b),
            ClearValue::Uint(n) => Some(!n.is_zero()),
            ClearValue::Raw(_) => None,
        }
    }

    /// Integer value, if any. Booleans map to 0 and 1.
    pub fn as_u256(&self) -> Option<U256> {
        match self {
            ClearValue::Bool(b) => Some(U256::from(u8::from(*b))),
            ClearValue::Uint(n) => Some(*n),
            ClearValue::Raw(_) => None,
        }
    }
}

/// A handle that survived filtering, with the string the caller used.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestedHandle {
    /// Caller's string, used as the result key.
    pub original: String,
    /// Parsed handle.
    pub handle: Handle,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json() {
        assert_eq!(ClearValue::from_json(&json!(true)), Some(ClearValue::Bool(true)));
        assert_eq!(ClearValue::from_json(&json!(3)), Some(ClearValue::Uint(U256::from(3))));
        assert_eq!(ClearValue::from_json(&json!("0x0a")), Some(ClearValue::Uint(U256::from(10))));
        assert_eq!(ClearValue::from_json(&json!("false")), Some(ClearValue::Bool(false)));
        assert_eq!(ClearValue::from_json(&json!(null)), None);
        assert!(matches!(ClearValue::from_json(&json!("n/a")), Some(ClearValue::Raw(_))));
    }

    #[test]
    fn test_truthiness() {
        assert_eq!(ClearValue::Uint(U256::zero()).as_bool(), Some(false));
        assert_eq!(ClearValue::Uint(U256::from(2)).as_bool(), Some(true));
        assert_eq!(ClearValue::Raw(json!({})).as_bool(), None);
        assert_eq!(ClearValue::Bool(true).as_u256(), Some(U256::one()));
    }
}
