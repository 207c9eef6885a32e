//! Lenient scalar coercion.
//!
//! Every chart field goes through one of these helpers. A value is accepted
//! when it already has the target type or when it is a string that parses as
//! that type after trimming. Anything else, including a missing field, yields
//! the caller's default. XML text content is passed in as a string value.

use serde_json::Value;

/// Coerce to `f64`. NaN and infinities are treated as unparseable.
pub fn float_or(raw: Option<&Value>, default: f64) -> f64 {
    let parsed = match raw {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).unwrap_or(default)
}

/// Coerce to `i64`. Numbers with a fractional part are rejected.
pub fn int_or(raw: Option<&Value>, default: i64) -> i64 {
    try_int(raw).unwrap_or(default)
}

/// Coerce to `i64`, `None` when the value is missing or unusable.
pub fn try_int(raw: Option<&Value>) -> Option<i64> {
    match raw {
        Some(Value::Number(n)) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|v| v.fract() == 0.0 && v.abs() < i64::MAX as f64)
                .map(|v| v as i64)
        }),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Coerce to `String`. Numbers and booleans use their textual form.
pub fn string_or(raw: Option<&Value>, default: &str) -> String {
    match raw {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_float_accepts_numbers_and_strings() {
        assert_eq!(float_or(Some(&json!(2.5)), 0.0), 2.5);
        assert_eq!(float_or(Some(&json!(3)), 0.0), 3.0);
        assert_eq!(float_or(Some(&json!(" 1.25 ")), 0.0), 1.25);
    }

    #[test]
    fn test_float_falls_back_to_default() {
        assert_eq!(float_or(None, 1.0), 1.0);
        assert_eq!(float_or(Some(&json!("fast")), 1.0), 1.0);
        assert_eq!(float_or(Some(&json!("NaN")), 1.0), 1.0);
        assert_eq!(float_or(Some(&json!("inf")), 1.0), 1.0);
        assert_eq!(float_or(Some(&json!("-infinity")), 1.0), 1.0);
        assert_eq!(float_or(Some(&json!(" Infinity ")), 1.0), 1.0);
        assert_eq!(float_or(Some(&json!(true)), 1.0), 1.0);
        assert_eq!(float_or(Some(&json!([1.0])), 1.0), 1.0);
        assert_eq!(float_or(Some(&Value::Null), 1.0), 1.0);
    }

    #[test]
    fn test_int_coercion() {
        assert_eq!(int_or(Some(&json!(2)), 0), 2);
        assert_eq!(int_or(Some(&json!(2.0)), 0), 2);
        assert_eq!(int_or(Some(&json!("-1")), 0), -1);
        assert_eq!(int_or(Some(&json!(2.5)), 7), 7);
        assert_eq!(int_or(Some(&json!("2.5")), 7), 7);
        assert_eq!(int_or(Some(&json!({})), 7), 7);
        assert_eq!(try_int(None), None);
    }

    #[test]
    fn test_string_coercion() {
        assert_eq!(string_or(Some(&json!("song")), ""), "song");
        assert_eq!(string_or(Some(&json!(42)), ""), "42");
        assert_eq!(string_or(Some(&Value::Null), "x"), "x");
        assert_eq!(string_or(None, "multi"), "multi");
    }
}
