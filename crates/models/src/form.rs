//! Coercion of loosely-typed form fields into structured values.
//!
//! Multipart/form payloads arrive as strings; coercion happens exactly once
//! here, so the service layer only ever sees typed drafts.

use std::collections::HashMap;

use crate::errors::ModelError;

pub type Fields = HashMap<String, String>;

pub fn required_str(fields: &Fields, name: &str) -> Result<String, ModelError> {
    match fields.get(name).map(|v| v.trim()) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ModelError::required(name)),
    }
}

pub fn optional_str(fields: &Fields, name: &str) -> Option<String> {
    fields
        .get(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Numeric form fields may arrive as "25" or "25.0"; both coerce to integer.
pub fn parse_u32(name: &str, raw: &str) -> Result<u32, ModelError> {
    let v: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ModelError::Validation(format!("{name} must be a number")))?;
    if !v.is_finite() || !(0.0..=f64::from(u32::MAX)).contains(&v) {
        return Err(ModelError::Validation(format!("{name} is out of range")));
    }
    Ok(v as u32)
}

pub fn parse_i64(name: &str, raw: &str) -> Result<i64, ModelError> {
    let v: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ModelError::Validation(format!("{name} must be a number")))?;
    // i64::MAX is not exactly representable as f64; stay inside the exact range.
    if !v.is_finite() || v.abs() >= 9_007_199_254_740_992.0 {
        return Err(ModelError::Validation(format!("{name} is out of range")));
    }
    Ok(v as i64)
}

/// Only the literal "true" (any case) is true, everything else is false.
pub fn parse_bool(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("true")
}

/// Flatten a JSON object into string fields so JSON and multipart payloads
/// share one coercion path. Non-string scalars keep their literal rendering.
pub fn fields_from_json(value: &serde_json::Value) -> Fields {
    let mut fields = Fields::new();
    if let Some(map) = value.as_object() {
        for (key, val) in map {
            let raw = match val {
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Null => continue,
                other => other.to_string(),
            };
            fields.insert(key.clone(), raw);
        }
    }
    fields
}
