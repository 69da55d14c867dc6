#![forbid(unsafe_code)]

use crate::{Args, McpServer};
use serde_json::Value;

/// `None` when the tool name is unknown.
pub(crate) fn dispatch_tool(server: &mut McpServer, name: &str, args: Value) -> Option<Value> {
    let handler: fn(&mut McpServer, &str, &Args) -> Result<Value, Value> = match name {
        "people" => super::people::handle,
        "friends" => super::friends::handle,
        "birthdays" => super::birthdays::handle,
        "wishlist" => super::wishlist::handle,
        _ => return None,
    };

    let resp = match split_op(args) {
        Ok((op, inner)) => handler(server, &op, &inner).unwrap_or_else(|err| err),
        Err(err) => err,
    };
    Some(resp)
}

/// Accepts `{op, args: {...}}` and the flat `{op, ...}` shape.
fn split_op(args: Value) -> Result<(String, Args), Value> {
    let Value::Object(mut obj) = args else {
        return Err(crate::ai_error("INVALID_INPUT", "arguments must be an object"));
    };
    let op = crate::require_string(&obj, "op")?;
    obj.remove("op");

    match obj.remove("args") {
        None | Some(Value::Null) => Ok((op, obj)),
        Some(Value::Object(inner)) => Ok((op, inner)),
        Some(_) => Err(crate::ai_error("INVALID_INPUT", "args must be an object")),
    }
}

pub(super) fn unknown_op(tool: &str, op: &str, ops: &[&str]) -> Value {
    crate::ai_error_with(
        "INVALID_INPUT",
        &format!("Unknown {tool} op: {op}"),
        Some(&format!("Use one of: {}.", ops.join(", "))),
    )
}
