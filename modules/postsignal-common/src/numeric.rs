//! Lenient parsing for platform-reported counts.
//!
//! Every normalizer reads counts through these two helpers. Garbage never errors:
//! it becomes a zero count that remembers the original text.

use postsignal_world::Count;
use serde_json::Value;

/// Parse a count that the platform sends as a string (YouTube statistics).
///
/// `"1234"` → 1234, `"abc"` or an overflowing number → 0 (malformed, raw kept),
/// `None` → 0 (missing).
pub fn parse_count(raw: Option<&str>) -> Count {
    let Some(text) = raw else {
        return Count::missing();
    };
    match text.trim().parse::<i64>() {
        Ok(value) => Count::reported(value),
        Err(_) => Count::malformed(text),
    }
}

/// Read a count from an arbitrary JSON value. Numbers pass through, strings go through
/// [`parse_count`], null is missing, anything else is malformed.
pub fn count_from_json(value: Option<&Value>) -> Count {
    match value {
        None | Some(Value::Null) => Count::missing(),
        Some(Value::String(s)) => parse_count(Some(s)),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(v) => Count::reported(v),
            // Whole floats ("12.0") are fine; fractions and out-of-range are not.
            None => match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                    Count::reported(f as i64)
                }
                _ => Count::malformed(n.to_string()),
            },
        },
        Some(other) => Count::malformed(other.to_string()),
    }
}
