#![forbid(unsafe_code)]

use super::render::wishlist_item_json;
use crate::{Args, McpServer};
use bb_storage::WishlistAddRequest;
use serde_json::{Value, json};

pub(super) const OPS: &[&str] = &["add", "list", "remove"];

pub(super) fn handle(server: &mut McpServer, op: &str, args: &Args) -> Result<Value, Value> {
    match op {
        "add" => add(server, args),
        "list" => list(server, args),
        "remove" => remove(server, args),
        _ => Err(super::dispatch::unknown_op("wishlist", op, OPS)),
    }
}

fn add(server: &mut McpServer, args: &Args) -> Result<Value, Value> {
    let owner = crate::require_string(args, "owner")?;
    let title = crate::require_string(args, "title")?;
    let url = crate::optional_string(args, "url")?;
    let note = crate::optional_string(args, "note")?;

    let item = server
        .store
        .add_wishlist_item(WishlistAddRequest {
            owner,
            title,
            url,
            note,
            now_ms: crate::now_ms_i64(),
        })
        .map_err(crate::store_error)?;
    Ok(crate::ai_ok("wishlist.add", json!({ "item": wishlist_item_json(&item) })))
}

fn list(server: &mut McpServer, args: &Args) -> Result<Value, Value> {
    let owner = crate::require_string(args, "owner")?;
    let person = super::friends::require_person(server, &owner)?;
    let items = server
        .store
        .list_wishlist(&person.id)
        .map_err(crate::store_error)?;
    Ok(crate::ai_ok(
        "wishlist.list",
        json!({
            "owner": person.id,
            "items": items.iter().map(wishlist_item_json).collect::<Vec<_>>(),
        }),
    ))
}

fn remove(server: &mut McpServer, args: &Args) -> Result<Value, Value> {
    let id = crate::require_i64(args, "id")?;
    let owner = crate::require_string(args, "owner")?;
    server
        .store
        .remove_wishlist_item(id, &owner)
        .map_err(crate::store_error)?;
    Ok(crate::ai_ok("wishlist.remove", json!({ "removed": id })))
}
