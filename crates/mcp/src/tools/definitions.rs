#![forbid(unsafe_code)]

use serde_json::{Value, json};

fn ops_schema(ops: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": {
            "op": { "type": "string", "enum": ops },
            "args": { "type": "object" }
        },
        "required": ["op"]
    })
}

pub(crate) fn tool_definitions() -> Vec<Value> {
    vec![
        json!({
            "name": "people",
            "description": "People directory. upsert {id, name?, birth_date?}, get {id}, \
set_birthday {id, birth_date|null}, search {viewer, query, limit?} (hides the viewer and anyone already connected).",
            "inputSchema": ops_schema(super::people::OPS)
        }),
        json!({
            "name": "friends",
            "description": "Friendships seen from one viewer. list {viewer}, request {requester, addressee}, \
respond {edge_id, responder, accept}, remove {edge_id, actor}.",
            "inputSchema": ops_schema(super::friends::OPS)
        }),
        json!({
            "name": "birthdays",
            "description": "Birthdays of confirmed friends. upcoming {viewer, limit?}, today {viewer}, \
on_day {viewer, month, day}, month {viewer, year?, month?, include_grid?}. \
All accept include_self and today (YYYY-MM-DD).",
            "inputSchema": ops_schema(super::birthdays::OPS)
        }),
        json!({
            "name": "wishlist",
            "description": "Gift wishlists. add {owner, title, url?, note?}, list {owner}, remove {id, owner}.",
            "inputSchema": ops_schema(super::wishlist::OPS)
        }),
    ]
}
