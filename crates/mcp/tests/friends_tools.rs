#![forbid(unsafe_code)]

mod support;
use support::*;

use serde_json::{Value, json};

fn ids(list: &Value) -> Vec<String> {
    list.as_array()
        .expect("array")
        .iter()
        .filter_map(|entry| {
            entry
                .get("person_id")
                .or_else(|| entry.get("id"))
                .and_then(|v| v.as_str())
                .map(str::to_string)
        })
        .collect()
}

#[test]
fn list_partitions_from_the_viewer_side() {
    let mut server = Server::start_initialized("friends_partition");
    for id in ["ana", "ben", "cy", "dee"] {
        server.add_person(id, None);
    }

    server.befriend("ana", "ben");
    server.call_ok("friends", "request", json!({ "requester": "cy", "addressee": "ana" }));
    server.call_ok("friends", "request", json!({ "requester": "ana", "addressee": "dee" }));

    let list = server.call_ok("friends", "list", json!({ "viewer": "ana" }));
    assert_eq!(ids(&list["confirmed"]), vec!["ben"]);
    assert_eq!(ids(&list["incoming_pending"]), vec!["cy"]);
    assert_eq!(ids(&list["outgoing_pending"]), vec!["dee"]);
    assert_eq!(list["confirmed"][0]["direction"], "outgoing");
    assert_eq!(list["confirmed"][0]["label"], "BEN");
    assert_eq!(list["incoming_pending"][0]["direction"], "incoming");

    let from_cy = server.call_ok("friends", "list", json!({ "viewer": "cy" }));
    assert_eq!(ids(&from_cy["outgoing_pending"]), vec!["ana"]);
    assert!(ids(&from_cy["confirmed"]).is_empty());
}

#[test]
fn one_edge_per_pair_and_addressee_only_responses() {
    let mut server = Server::start_initialized("friends_rules");
    server.add_person("ana", None);
    server.add_person("ben", None);
    server.add_person("cy", None);

    let sent = server.call_ok("friends", "request", json!({ "requester": "ana", "addressee": "ben" }));
    let edge_id = sent["friendship"]["edge_id"].as_str().expect("edge_id").to_string();
    assert!(edge_id.starts_with("FR-"));

    let reverse = server.call("friends", "request", json!({ "requester": "ben", "addressee": "ana" }));
    assert_eq!(error_code(&reverse), Some("CONFLICT"));

    let by_requester = server.call(
        "friends",
        "respond",
        json!({ "edge_id": edge_id, "responder": "ana", "accept": true }),
    );
    assert_eq!(error_code(&by_requester), Some("FORBIDDEN"));

    let by_stranger = server.call(
        "friends",
        "respond",
        json!({ "edge_id": edge_id, "responder": "cy", "accept": true }),
    );
    assert_eq!(error_code(&by_stranger), Some("FORBIDDEN"));

    server.call_ok(
        "friends",
        "respond",
        json!({ "edge_id": edge_id, "responder": "ben", "accept": false }),
    );
    let again = server.call(
        "friends",
        "respond",
        json!({ "edge_id": edge_id, "responder": "ben", "accept": true }),
    );
    assert_eq!(error_code(&again), Some("CONFLICT"));

    let declined = server.call_ok("friends", "list", json!({ "viewer": "ana" }));
    assert_eq!(declined["declined"], 1);
    assert!(ids(&declined["outgoing_pending"]).is_empty());

    // A declined pair may be asked again, from either side.
    let reopened = server.call_ok("friends", "request", json!({ "requester": "ben", "addressee": "ana" }));
    assert_eq!(reopened["friendship"]["edge_id"], edge_id);
    assert_eq!(reopened["friendship"]["requester"], "ben");
    assert_eq!(reopened["friendship"]["status"], "pending");
}

#[test]
fn remove_by_either_party() {
    let mut server = Server::start_initialized("friends_remove");
    server.add_person("ana", None);
    server.add_person("ben", None);
    server.add_person("cy", None);
    let edge_id = server.befriend("ana", "ben");

    let stranger = server.call("friends", "remove", json!({ "edge_id": edge_id, "actor": "cy" }));
    assert_eq!(error_code(&stranger), Some("FORBIDDEN"));

    let removed = server.call_ok("friends", "remove", json!({ "edge_id": edge_id, "actor": "ben" }));
    assert_eq!(removed["removed"]["status"], "accepted");

    let list = server.call_ok("friends", "list", json!({ "viewer": "ana" }));
    assert!(ids(&list["confirmed"]).is_empty());

    let gone = server.call("friends", "remove", json!({ "edge_id": edge_id, "actor": "ana" }));
    assert_eq!(error_code(&gone), Some("UNKNOWN_ID"));
}

#[test]
fn request_validation() {
    let mut server = Server::start_initialized("friends_validation");
    server.add_person("ana", None);

    let to_self = server.call("friends", "request", json!({ "requester": "ana", "addressee": "ana" }));
    assert_eq!(error_code(&to_self), Some("INVALID_INPUT"));

    let unknown = server.call("friends", "request", json!({ "requester": "ana", "addressee": "zed" }));
    assert_eq!(error_code(&unknown), Some("UNKNOWN_ID"));

    let missing = server.call("friends", "request", json!({ "requester": "ana" }));
    assert_eq!(error_code(&missing), Some("INVALID_INPUT"));

    let bad_edge = server.call(
        "friends",
        "respond",
        json!({ "edge_id": "not-an-edge", "responder": "ana", "accept": true }),
    );
    assert_eq!(error_code(&bad_edge), Some("INVALID_INPUT"));

    let no_viewer = server.call("friends", "list", json!({ "viewer": "  " }));
    assert_eq!(error_code(&no_viewer), Some("INVALID_INPUT"));

    let unknown_viewer = server.call("friends", "list", json!({ "viewer": "zed" }));
    assert_eq!(error_code(&unknown_viewer), Some("UNKNOWN_ID"));
}

#[test]
fn search_hides_viewer_and_connections() {
    let mut server = Server::start_initialized("people_search");
    for id in ["ana", "anabel", "anders", "annika", "ben"] {
        server.add_person(id, None);
    }
    server.befriend("ana", "anabel");
    server.call_ok("friends", "request", json!({ "requester": "annika", "addressee": "ana" }));

    let found = server.call_ok("people", "search", json!({ "viewer": "ana", "query": "AN" }));
    assert_eq!(ids(&found["people"]), vec!["anders"]);
    assert_eq!(found["hidden_connected"], 2);

    let limited = server.call_ok("people", "search", json!({ "viewer": "ben", "query": "an", "limit": 2 }));
    assert_eq!(ids(&limited["people"]), vec!["ana", "anabel"]);

    let empty = server.call_ok("people", "search", json!({ "viewer": "ana", "query": "zzz" }));
    assert!(ids(&empty["people"]).is_empty());

    let no_viewer = server.call("people", "search", json!({ "query": "an" }));
    assert_eq!(error_code(&no_viewer), Some("INVALID_INPUT"));
}
