#![forbid(unsafe_code)]

use super::render::person_json;
use crate::{Args, McpServer};
use bb_core::friends::exclude_connected;
use bb_storage::PersonUpsertRequest;
use serde_json::{Value, json};

pub(super) const OPS: &[&str] = &["upsert", "get", "set_birthday", "search"];

const DEFAULT_SEARCH_LIMIT: usize = 20;
const MAX_SEARCH_LIMIT: usize = 200;

pub(super) fn handle(server: &mut McpServer, op: &str, args: &Args) -> Result<Value, Value> {
    match op {
        "upsert" => upsert(server, args),
        "get" => get(server, args),
        "set_birthday" => set_birthday(server, args),
        "search" => search(server, args),
        _ => Err(super::dispatch::unknown_op("people", op, OPS)),
    }
}

fn upsert(server: &mut McpServer, args: &Args) -> Result<Value, Value> {
    let id = crate::require_string(args, "id")?;
    let display_name = crate::optional_string(args, "name")?;
    let birth_date = crate::optional_date(args, "birth_date")?;

    let person = server
        .store
        .upsert_person(PersonUpsertRequest {
            id,
            display_name,
            birth_date,
            now_ms: crate::now_ms_i64(),
        })
        .map_err(crate::store_error)?;
    Ok(crate::ai_ok("people.upsert", json!({ "person": person_json(&person) })))
}

fn get(server: &mut McpServer, args: &Args) -> Result<Value, Value> {
    let id = crate::require_string(args, "id")?;
    let person = super::friends::require_person(server, &id)?;
    Ok(crate::ai_ok("people.get", json!({ "person": person_json(&person) })))
}

fn set_birthday(server: &mut McpServer, args: &Args) -> Result<Value, Value> {
    let id = crate::require_string(args, "id")?;
    let Some(birth_date) = crate::optional_nullable_date(args, "birth_date")? else {
        return Err(crate::ai_error_with(
            "INVALID_INPUT",
            "birth_date is required",
            Some("Pass YYYY-MM-DD, or null to clear the birthday."),
        ));
    };

    let person = server
        .store
        .set_birth_date(&id, birth_date, crate::now_ms_i64())
        .map_err(crate::store_error)?;
    Ok(crate::ai_ok(
        "people.set_birthday",
        json!({ "person": person_json(&person) }),
    ))
}

/// People the viewer could still befriend.
fn search(server: &mut McpServer, args: &Args) -> Result<Value, Value> {
    let viewer = crate::require_string(args, "viewer")?;
    let query = crate::optional_string(args, "query")?.unwrap_or_default();
    let limit = crate::optional_usize(args, "limit")?
        .unwrap_or(DEFAULT_SEARCH_LIMIT)
        .clamp(1, MAX_SEARCH_LIMIT);

    let resolution = super::friends::resolve_viewer(server, &viewer)?;
    // Over-fetch by the number of hidden people so the page still fills.
    let fetch = limit + resolution.total() + 1;
    let candidates = server
        .store
        .search_people(query.trim(), fetch)
        .map_err(crate::store_error)?;

    let mut visible = exclude_connected(&candidates, &resolution);
    visible.truncate(limit);

    Ok(crate::ai_ok(
        "people.search",
        json!({
            "viewer": resolution.viewer_id,
            "query": query.trim(),
            "people": visible.iter().map(person_json).collect::<Vec<_>>(),
            "hidden_connected": resolution.total(),
        }),
    ))
}
