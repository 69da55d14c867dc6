#![forbid(unsafe_code)]

use super::ai::ai_error;
use bb_core::dates::parse_date;
use serde_json::Value;
use time::Date;

pub(crate) type Args = serde_json::Map<String, Value>;

pub(crate) fn require_string(args: &Args, key: &str) -> Result<String, Value> {
    let Some(v) = args.get(key).and_then(|v| v.as_str()) else {
        return Err(ai_error("INVALID_INPUT", &format!("{key} is required")));
    };
    if v.trim().is_empty() {
        return Err(ai_error(
            "INVALID_INPUT",
            &format!("{key} must not be empty"),
        ));
    }
    Ok(v.trim().to_string())
}

pub(crate) fn optional_string(args: &Args, key: &str) -> Result<Option<String>, Value> {
    let Some(value) = args.get(key) else {
        return Ok(None);
    };
    match value {
        Value::Null => Ok(None),
        Value::String(v) => Ok(Some(v.to_string())),
        _ => Err(ai_error(
            "INVALID_INPUT",
            &format!("{key} must be a string"),
        )),
    }
}

pub(crate) fn optional_bool(args: &Args, key: &str) -> Result<Option<bool>, Value> {
    let Some(value) = args.get(key) else {
        return Ok(None);
    };
    match value {
        Value::Null => Ok(None),
        Value::Bool(v) => Ok(Some(*v)),
        _ => Err(ai_error(
            "INVALID_INPUT",
            &format!("{key} must be a boolean"),
        )),
    }
}

pub(crate) fn require_bool(args: &Args, key: &str) -> Result<bool, Value> {
    optional_bool(args, key)?
        .ok_or_else(|| ai_error("INVALID_INPUT", &format!("{key} is required")))
}

pub(crate) fn optional_i64(args: &Args, key: &str) -> Result<Option<i64>, Value> {
    let Some(value) = args.get(key) else {
        return Ok(None);
    };
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_i64()
            .map(Some)
            .ok_or_else(|| ai_error("INVALID_INPUT", &format!("{key} must be an integer"))),
        _ => Err(ai_error(
            "INVALID_INPUT",
            &format!("{key} must be an integer"),
        )),
    }
}

pub(crate) fn require_i64(args: &Args, key: &str) -> Result<i64, Value> {
    optional_i64(args, key)?
        .ok_or_else(|| ai_error("INVALID_INPUT", &format!("{key} is required")))
}

pub(crate) fn optional_usize(args: &Args, key: &str) -> Result<Option<usize>, Value> {
    let Some(value) = args.get(key) else {
        return Ok(None);
    };
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_u64()
            .and_then(|v| usize::try_from(v).ok())
            .map(Some)
            .ok_or_else(|| {
                ai_error(
                    "INVALID_INPUT",
                    &format!("{key} must be a positive integer"),
                )
            }),
        _ => Err(ai_error(
            "INVALID_INPUT",
            &format!("{key} must be a positive integer"),
        )),
    }
}

/// Integer within `min..=max`, as `u8`.
pub(crate) fn optional_u8_in(
    args: &Args,
    key: &str,
    min: u8,
    max: u8,
) -> Result<Option<u8>, Value> {
    let Some(value) = optional_i64(args, key)? else {
        return Ok(None);
    };
    match u8::try_from(value) {
        Ok(value) if (min..=max).contains(&value) => Ok(Some(value)),
        _ => Err(ai_error(
            "INVALID_INPUT",
            &format!("{key} must be within {min}..={max}"),
        )),
    }
}

pub(crate) fn optional_date(args: &Args, key: &str) -> Result<Option<Date>, Value> {
    let Some(raw) = optional_string(args, key)? else {
        return Ok(None);
    };
    parse_date(&raw)
        .map(Some)
        .map_err(|err| ai_error("INVALID_INPUT", &format!("{key}: {}", err.message())))
}

/// `None` when absent, `Some(None)` when explicitly null.
pub(crate) fn optional_nullable_date(
    args: &Args,
    key: &str,
) -> Result<Option<Option<Date>>, Value> {
    if !args.contains_key(key) {
        return Ok(None);
    }
    optional_date(args, key).map(Some)
}
