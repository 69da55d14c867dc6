#![forbid(unsafe_code)]

use super::render::{connection_json, friendship_json};
use crate::{Args, McpServer};
use bb_core::friends::{Resolution, ResolvedConnection, resolve};
use bb_core::model::Person;
use bb_storage::{FriendRequest, FriendResponse};
use serde_json::{Value, json};

pub(super) const OPS: &[&str] = &["list", "request", "respond", "remove"];

pub(super) fn handle(server: &mut McpServer, op: &str, args: &Args) -> Result<Value, Value> {
    match op {
        "list" => list(server, args),
        "request" => request(server, args),
        "respond" => respond(server, args),
        "remove" => remove(server, args),
        _ => Err(super::dispatch::unknown_op("friends", op, OPS)),
    }
}

pub(super) fn require_person(server: &McpServer, id: &str) -> Result<Person, Value> {
    server
        .store
        .get_person(id)
        .map_err(crate::store_error)?
        .ok_or_else(|| crate::store_error(bb_storage::StoreError::UnknownId))
}

/// Fresh resolution of every edge touching `viewer`; the viewer must exist.
pub(super) fn resolve_viewer(server: &McpServer, viewer: &str) -> Result<Resolution, Value> {
    let person = require_person(server, viewer)?;
    let rows = server
        .store
        .edges_for(&person.id)
        .map_err(crate::store_error)?;
    let edges = rows.iter().map(|row| row.to_edge()).collect::<Vec<_>>();
    resolve(&person.id, &edges).map_err(crate::resolve_error)
}

fn list(server: &mut McpServer, args: &Args) -> Result<Value, Value> {
    let viewer = crate::require_string(args, "viewer")?;
    let resolution = resolve_viewer(server, &viewer)?;

    let ids = resolution
        .connections()
        .map(|conn| conn.counterpart_id.clone())
        .collect::<Vec<_>>();
    let people = server.store.list_people(&ids).map_err(crate::store_error)?;
    let render = |conns: &[ResolvedConnection]| {
        conns
            .iter()
            .map(|conn| {
                let person = people.iter().find(|p| p.id == conn.counterpart_id);
                connection_json(conn, person)
            })
            .collect::<Vec<_>>()
    };

    Ok(crate::ai_ok(
        "friends.list",
        json!({
            "viewer": resolution.viewer_id,
            "confirmed": render(resolution.confirmed.as_slice()),
            "incoming_pending": render(resolution.incoming_pending.as_slice()),
            "outgoing_pending": render(resolution.outgoing_pending.as_slice()),
            "declined": resolution.declined,
        }),
    ))
}

fn request(server: &mut McpServer, args: &Args) -> Result<Value, Value> {
    let requester = crate::require_string(args, "requester")?;
    let addressee = crate::require_string(args, "addressee")?;

    let row = server
        .store
        .send_friend_request(FriendRequest {
            requester,
            addressee,
            now_ms: crate::now_ms_i64(),
        })
        .map_err(crate::store_error)?;
    Ok(crate::ai_ok(
        "friends.request",
        json!({ "friendship": friendship_json(&row) }),
    ))
}

fn respond(server: &mut McpServer, args: &Args) -> Result<Value, Value> {
    let edge_id = crate::require_string(args, "edge_id")?;
    let responder = crate::require_string(args, "responder")?;
    let accept = crate::require_bool(args, "accept")?;

    let row = server
        .store
        .respond_to_request(FriendResponse {
            edge_id,
            responder,
            accept,
            now_ms: crate::now_ms_i64(),
        })
        .map_err(crate::store_error)?;
    Ok(crate::ai_ok(
        "friends.respond",
        json!({ "friendship": friendship_json(&row) }),
    ))
}

fn remove(server: &mut McpServer, args: &Args) -> Result<Value, Value> {
    let edge_id = crate::require_string(args, "edge_id")?;
    let actor = crate::require_string(args, "actor")?;

    let row = server
        .store
        .remove_friendship(&edge_id, &actor)
        .map_err(crate::store_error)?;
    Ok(crate::ai_ok(
        "friends.remove",
        json!({ "removed": friendship_json(&row) }),
    ))
}
