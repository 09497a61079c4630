//! Explicit coercions for loosely typed action input.
//!
//! Views hand the store whatever their widgets produced (strings from text
//! fields, numbers, booleans, sometimes nothing at all). These functions turn
//! that into the typed values the state holds, following JavaScript's
//! `String()` and `parseInt()` rules so stored values match what the API
//! and older clients expect. `None` stands for a missing value (`undefined`).
//!
//! Integers beyond 2^53 are rounded to the nearest `f64` first, as a JS
//! `Number` would hold them. Leading whitespace for `parse_int` is Unicode
//! whitespace plus U+FEFF.

use serde_json::{Number, Value};

use crate::model::StatusCode;

/// String form of a value, as JavaScript's `String(v)` would produce it.
pub fn js_string(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(Value::Null) => "null".to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => number_string(n),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => js_string(Some(other)),
            })
            .collect::<Vec<_>>()
            .join(","),
        Some(Value::Object(_)) => "[object Object]".to_string(),
    }
}

/// Base-10 `parseInt` over the string form of `value`.
///
/// Leading whitespace (including U+FEFF) is skipped, one sign is accepted, then the longest run of
/// ASCII digits is read; anything after it is ignored. No digits at all gives
/// `StatusCode::NotANumber`. Values outside `i64` saturate.
pub fn parse_int(value: Option<&Value>) -> StatusCode {
    let text = js_string(value);
    let rest = text.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}');
    let (negative, rest) = match rest.as_bytes().first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };

    let digits = rest.bytes().take_while(|b| b.is_ascii_digit()).collect::<Vec<_>>();
    if digits.is_empty() {
        return StatusCode::NotANumber;
    }

    let mut n: i64 = 0;
    for d in digits {
        let d = i64::from(d - b'0');
        n = n
            .saturating_mul(10)
            .saturating_add(if negative { -d } else { d });
    }
    StatusCode::Code(n)
}

/// `true` iff the string form of `value` equals `"true"`, ignoring case.
pub fn string_flag(value: Option<&Value>) -> bool {
    js_string(value).to_lowercase() == "true"
}

/// Largest integer a JS `Number` holds exactly.
const MAX_SAFE_INTEGER: u64 = 1 << 53;

fn number_string(n: &Number) -> String {
    let exact = match (n.as_i64(), n.as_u64()) {
        (Some(i), _) => i.unsigned_abs() <= MAX_SAFE_INTEGER,
        (None, Some(u)) => u <= MAX_SAFE_INTEGER,
        _ => false,
    };
    if exact {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) => float_string(f),
        None => n.to_string(),
    }
}

fn float_string(f: f64) -> String {
    if f.is_nan() {
        return "NaN".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if f == 0.0 {
        return "0".to_string();
    }
    let abs = f.abs();
    if abs >= 1e21 || abs < 1e-6 {
        // JS writes an explicit `+` on positive exponents.
        let s = format!("{f:e}");
        return match s.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => s,
        };
    }
    format!("{f}")
}
