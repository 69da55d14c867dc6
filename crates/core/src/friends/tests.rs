use super::*;
use crate::ids::{FriendshipId, FriendshipIdError, PersonId, PersonIdError};
use crate::model::{FriendshipEdge, FriendshipStatus, Person};
use std::collections::BTreeSet;

fn edge(id: &str, requester: &str, addressee: &str, status: FriendshipStatus) -> FriendshipEdge {
    FriendshipEdge {
        id: id.to_string(),
        requester: requester.to_string(),
        addressee: addressee.to_string(),
        status,
    }
}

fn person(id: &str) -> Person {
    Person {
        id: id.to_string(),
        display_name: None,
        birth_date: None,
    }
}

fn counterparts(list: &[ResolvedConnection]) -> Vec<&str> {
    list.iter().map(|c| c.counterpart_id.as_str()).collect()
}

#[test]
fn resolve_splits_confirmed_and_incoming() {
    let edges = vec![
        edge("e1", "A", "B", FriendshipStatus::Accepted),
        edge("e2", "C", "A", FriendshipStatus::Pending),
    ];
    let out = resolve("A", &edges).unwrap();

    assert_eq!(counterparts(&out.confirmed), vec!["B"]);
    assert_eq!(counterparts(&out.incoming_pending), vec!["C"]);
    assert!(out.outgoing_pending.is_empty());
    assert_eq!(out.declined, 0);
}

#[test]
fn resolve_normalizes_counterpart_for_both_directions() {
    let edges = vec![
        edge("e1", "A", "B", FriendshipStatus::Pending),
        edge("e2", "C", "A", FriendshipStatus::Accepted),
    ];
    let out = resolve("A", &edges).unwrap();

    let outgoing = &out.outgoing_pending[0];
    assert_eq!(outgoing.counterpart_id, "B");
    assert!(outgoing.viewer_is_requester);
    assert_eq!(outgoing.edge_id, "e1");

    let confirmed = &out.confirmed[0];
    assert_eq!(confirmed.counterpart_id, "C");
    assert!(!confirmed.viewer_is_requester);
    assert_eq!(confirmed.status, FriendshipStatus::Accepted);
}

#[test]
fn resolve_partitions_every_edge_exactly_once() {
    let edges = vec![
        edge("e1", "A", "B", FriendshipStatus::Accepted),
        edge("e2", "C", "A", FriendshipStatus::Accepted),
        edge("e3", "A", "D", FriendshipStatus::Pending),
        edge("e4", "E", "A", FriendshipStatus::Pending),
        edge("e5", "A", "F", FriendshipStatus::Declined),
        edge("e6", "G", "A", FriendshipStatus::Declined),
    ];
    let out = resolve("A", &edges).unwrap();

    assert_eq!(out.total() + out.declined, edges.len());

    let mut seen = BTreeSet::new();
    for connection in out.connections() {
        assert!(
            seen.insert(connection.edge_id.clone()),
            "edge {} surfaced twice",
            connection.edge_id
        );
    }
    assert_eq!(seen.len(), 4);
    assert_eq!(out.declined, 2);
    assert_eq!(counterparts(&out.outgoing_pending), vec!["D"]);
    assert_eq!(counterparts(&out.incoming_pending), vec!["E"]);
}

#[test]
fn resolve_rejects_edges_not_touching_the_viewer() {
    let edges = vec![
        edge("e1", "A", "B", FriendshipStatus::Accepted),
        edge("e2", "X", "Y", FriendshipStatus::Accepted),
    ];
    assert_eq!(
        resolve("A", &edges).unwrap_err(),
        ResolveError::UnrelatedEdge {
            edge_id: "e2".to_string()
        }
    );
}

#[test]
fn resolve_rejects_malformed_edges() {
    let missing_requester = vec![edge("e1", " ", "A", FriendshipStatus::Pending)];
    let err = resolve("A", &missing_requester).unwrap_err();
    assert!(matches!(
        &err,
        ResolveError::MalformedEdge { edge_id, reason } if edge_id == "e1" && *reason == "missing requester"
    ));
    assert_eq!(err.code(), "MALFORMED_EDGE");
    assert!(err.to_string().contains("edge_id=e1"));

    let missing_addressee = vec![edge("e2", "A", "", FriendshipStatus::Pending)];
    assert!(matches!(
        resolve("A", &missing_addressee).unwrap_err(),
        ResolveError::MalformedEdge { edge_id, .. } if edge_id == "e2"
    ));

    let self_edge = vec![edge("e3", "A", "A", FriendshipStatus::Accepted)];
    assert!(matches!(
        resolve("A", &self_edge).unwrap_err(),
        ResolveError::MalformedEdge { edge_id, .. } if edge_id == "e3"
    ));
}

#[test]
fn resolve_rejects_blank_viewer_and_accepts_empty_input() {
    assert_eq!(resolve("  ", &[]).unwrap_err(), ResolveError::BlankViewer);

    let out = resolve("A", &[]).unwrap();
    assert_eq!(out.total(), 0);
    assert_eq!(out.viewer_id, "A");
}

#[test]
fn resolve_trims_the_viewer_before_matching_edges() {
    let edges = vec![
        edge("e1", "A", "B", FriendshipStatus::Accepted),
        edge("e2", "C", "A", FriendshipStatus::Pending),
    ];
    let out = resolve(" A\t", &edges).unwrap();
    assert_eq!(out.viewer_id, "A");
    assert_eq!(counterparts(&out.confirmed), vec!["B"]);
    assert_eq!(counterparts(&out.incoming_pending), vec!["C"]);
}

#[test]
fn edge_involves_only_its_two_endpoints() {
    let e = edge("e1", "A", "B", FriendshipStatus::Pending);
    assert!(e.involves("A"));
    assert!(e.involves("B"));
    assert!(!e.involves("C"));
    assert!(!e.involves(" A"));
}

#[test]
fn exclude_connected_drops_friends_pending_and_viewer() {
    let edges = vec![
        edge("e1", "A", "B", FriendshipStatus::Accepted),
        edge("e2", "C", "A", FriendshipStatus::Pending),
        edge("e3", "A", "D", FriendshipStatus::Pending),
        edge("e4", "A", "E", FriendshipStatus::Declined),
    ];
    let resolution = resolve("A", &edges).unwrap();
    let candidates = ["A", "B", "C", "D", "E", "F"]
        .iter()
        .map(|id| person(id))
        .collect::<Vec<_>>();

    let out = exclude_connected(&candidates, &resolution);
    let ids = out.iter().map(|p| p.id.as_str()).collect::<Vec<_>>();
    assert_eq!(ids, vec!["E", "F"]);

    for candidate in &out {
        assert!(!resolution.is_connected(&candidate.id));
    }
}

#[test]
fn exclude_connected_on_empty_candidates_is_empty() {
    let edges = vec![edge("e1", "A", "B", FriendshipStatus::Accepted)];
    let resolution = resolve("A", &edges).unwrap();
    assert!(exclude_connected(&[], &resolution).is_empty());
}

#[test]
fn confirmed_people_follows_confirmed_order() {
    let edges = vec![
        edge("e1", "A", "C", FriendshipStatus::Accepted),
        edge("e2", "B", "A", FriendshipStatus::Accepted),
        edge("e3", "A", "D", FriendshipStatus::Pending),
    ];
    let resolution = resolve("A", &edges).unwrap();
    let people = vec![person("B"), person("C"), person("D")];

    let friends = resolution.confirmed_people(&people);
    let ids = friends.iter().map(|p| p.id.as_str()).collect::<Vec<_>>();
    assert_eq!(ids, vec!["C", "B"]);
    assert_eq!(resolution.confirmed_ids(), vec!["C", "B"]);

    let pending = resolution.connection_with("D").unwrap();
    assert_eq!(pending.status, FriendshipStatus::Pending);
    assert!(resolution.connection_with("Z").is_none());
}

#[test]
fn person_and_friendship_id_validation() {
    assert_eq!(PersonId::try_new("").unwrap_err(), PersonIdError::Empty);
    assert_eq!(PersonId::try_new("   ").unwrap_err(), PersonIdError::Empty);
    assert_eq!(
        PersonId::try_new("bad\u{0007}id").unwrap_err(),
        PersonIdError::ContainsControl
    );
    assert_eq!(
        PersonId::try_new("x".repeat(129)).unwrap_err(),
        PersonIdError::TooLong
    );
    assert_eq!(PersonId::try_new(" alice ").unwrap().as_str(), "alice");

    assert_eq!(
        FriendshipId::try_new("").unwrap_err(),
        FriendshipIdError::Empty
    );
    assert_eq!(
        FriendshipId::try_new("FR-xyz").unwrap_err(),
        FriendshipIdError::InvalidFormat
    );
    assert!(FriendshipId::try_new("FR-0123456789abcdef0123456789abcdef").is_ok());
}

#[test]
fn friendship_status_round_trips_through_text() {
    for status in [
        FriendshipStatus::Pending,
        FriendshipStatus::Accepted,
        FriendshipStatus::Declined,
    ] {
        assert_eq!(FriendshipStatus::parse(status.as_str()), Some(status));
    }
    assert_eq!(FriendshipStatus::parse("blocked"), None);
}
