//! # Stable JSON Digest
//!
//! The content digest written to the ledger is keccak256 over a JSON
//! serialization whose property allow-list is the document's top-level keys
//! in sorted order. The allow-list applies at every depth: nested objects
//! keep only the properties whose names also appear at the top level, in
//! allow-list order. Arrays are always serialized in full.
//!
//! Numbers are written the way a browser's JSON serializer writes them:
//! integral floats lose their fractional part (`1.0` → `1`), and magnitudes
//! below `1e-6` or from `1e21` up switch to exponent form (`1e-7`, `1e+21`).

use serde_json::{Map, Number, Value};
use shared_types::{keccak256, Bytes32};

/// keccak256 of [`stable_json`].
pub fn hash_json_stable(value: &Value) -> Bytes32 {
    keccak256(stable_json(value).as_bytes())
}

/// The canonical serialization hashed by [`hash_json_stable`].
pub fn stable_json(value: &Value) -> String {
    let mut allow: Vec<String> = match value {
        Value::Object(map) => map.keys().cloned().collect(),
        Value::Array(items) => (0..items.len()).map(|i| i.to_string()).collect(),
        _ => Vec::new(),
    };
    allow.sort();
    allow.dedup();

    let mut out = String::new();
    write_value(&mut out, value, &allow);
    out
}

fn write_value(out: &mut String, value: &Value, allow: &[String]) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&js_number(n)),
        Value::String(s) => write_string(out, s),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, item, allow);
            }
            out.push(']');
        }
        Value::Object(map) => write_object(out, map, allow),
    }
}

fn write_object(out: &mut String, map: &Map<String, Value>, allow: &[String]) {
    out.push('{');
    let mut first = true;
    for key in allow {
        let Some(child) = map.get(key) else {
            continue;
        };
        if !first {
            out.push(',');
        }
        first = false;
        write_string(out, key);
        out.push(':');
        write_value(out, child, allow);
    }
    out.push('}');
}

fn write_string(out: &mut String, s: &str) {
    // serde_json escapes exactly the characters a browser does.
    match serde_json::to_string(s) {
        Ok(quoted) => out.push_str(&quoted),
        Err(_) => out.push_str("\"\""),
    }
}

fn js_number(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) if f.is_finite() => js_float(f),
        _ => "null".to_string(),
    }
}

/// ECMAScript `Number::toString` applied to the shortest round-trip digits.
fn js_float(f: f64) -> String {
    // `{:e}` yields the shortest digits as `d.ddde<exp>`.
    let sci = format!("{:e}", f.abs());
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    let n = exp.parse::<i32>().unwrap_or(0) + 1;

    let mut out = String::new();
    if f < 0.0 {
        out.push('-');
    }
    if k <= n && n <= 21 {
        out.push_str(&digits);
        out.extend(std::iter::repeat('0').take((n - k) as usize));
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        out.push_str(int);
        out.push('.');
        out.push_str(frac);
    } else if -6 < n && n <= 0 {
        out.push_str("0.");
        out.extend(std::iter::repeat('0').take((-n) as usize));
        out.push_str(&digits);
    } else {
        let (lead, rest) = digits.split_at(1);
        out.push_str(lead);
        if !rest.is_empty() {
            out.push('.');
            out.push_str(rest);
        }
        out.push('e');
        out.push(if n > 0 { '+' } else { '-' });
        out.push_str(&(n - 1).abs().to_string());
    }
    out
}
