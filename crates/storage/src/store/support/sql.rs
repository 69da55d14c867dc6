#![forbid(unsafe_code)]

use super::super::StoreError;
use rusqlite::ErrorCode;

pub(in crate::store) fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(code, message) => {
            code.code == ErrorCode::ConstraintViolation
                || message.as_deref().is_some_and(|value| {
                    value.contains("UNIQUE constraint failed")
                        || value.contains("PRIMARY KEY constraint failed")
                })
        }
        _ => false,
    }
}

pub(in crate::store) fn to_sqlite_i64(value: usize) -> Result<i64, StoreError> {
    i64::try_from(value).map_err(|_| StoreError::InvalidInput("numeric overflow"))
}

/// Unicode-lowercased id and display name; SQLite `lower()` only folds ASCII.
pub(in crate::store) fn search_key(id: &str, display_name: Option<&str>) -> String {
    format!(
        "{}\n{}",
        id.to_lowercase(),
        display_name.unwrap_or_default().to_lowercase()
    )
}

/// `%needle%` for a `LIKE ... ESCAPE '\'` clause against `search_key`.
pub(in crate::store) fn like_contains(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len() + 2);
    out.push('%');
    for ch in needle.trim().to_lowercase().chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('%');
    out
}
