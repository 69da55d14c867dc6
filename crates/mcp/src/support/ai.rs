#![forbid(unsafe_code)]

use bb_core::birthdays::BirthdayError;
use bb_core::friends::ResolveError;
use bb_storage::StoreError;
use serde_json::{Value, json};

pub(crate) fn ai_ok(intent: &str, result: Value) -> Value {
    json!({
        "success": true,
        "intent": intent,
        "result": result,
        "warnings": [],
        "error": null
    })
}

pub(crate) fn ai_error(code: &str, message: &str) -> Value {
    ai_error_with(code, message, None)
}

pub(crate) fn ai_error_with(code: &str, message: &str, recovery: Option<&str>) -> Value {
    let mut error_obj = serde_json::Map::new();
    error_obj.insert("code".to_string(), Value::String(code.to_string()));
    error_obj.insert(
        "message".to_string(),
        Value::String(message.trim().to_string()),
    );
    if let Some(recovery) = recovery {
        error_obj.insert(
            "recovery".to_string(),
            Value::String(recovery.trim().to_string()),
        );
    }

    json!({
        "success": false,
        "intent": "error",
        "result": {},
        "warnings": [],
        "error": Value::Object(error_obj)
    })
}

fn store_recovery(err: &StoreError) -> Option<&'static str> {
    match err {
        StoreError::UnknownId => Some("Create the person first with people op=upsert."),
        StoreError::UnknownFriendship => {
            Some("List current edges with friends op=list and retry with a listed edge_id.")
        }
        StoreError::FriendshipExists { .. } => Some(
            "A request already connects these people; answer it with friends op=respond or remove it first.",
        ),
        StoreError::NotAddressee => {
            Some("Only the person who received the request can accept or decline it.")
        }
        StoreError::NotPending { .. } => {
            Some("The request was already answered; re-read with friends op=list.")
        }
        StoreError::NotOwner => Some("Only the wishlist owner can remove items."),
        _ => None,
    }
}

pub(crate) fn store_error(err: StoreError) -> Value {
    ai_error_with(err.code(), &err.to_string(), store_recovery(&err))
}

pub(crate) fn resolve_error(err: ResolveError) -> Value {
    // The store only hands out edges touching the viewer, so this is a data fault.
    ai_error_with(
        "STORE_ERROR",
        &err.to_string(),
        Some("Stored friendship rows are inconsistent; inspect the friendships table."),
    )
}

pub(crate) fn birthday_error(err: BirthdayError) -> Value {
    ai_error(err.code(), &err.to_string())
}
