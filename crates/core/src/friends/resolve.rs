#![forbid(unsafe_code)]

use super::types::{Resolution, ResolveError, ResolvedConnection};
use crate::model::{FriendshipEdge, FriendshipStatus, Person};
use std::collections::BTreeSet;

/// Splits the viewer's edges into confirmed, incoming and outgoing lists.
///
/// Every edge must involve the viewer; the whole call fails on the first edge
/// that does not, so a wrong snapshot never renders as a partial friend list.
pub fn resolve(viewer_id: &str, edges: &[FriendshipEdge]) -> Result<Resolution, ResolveError> {
    let viewer_id = viewer_id.trim();
    if viewer_id.is_empty() {
        return Err(ResolveError::BlankViewer);
    }

    let mut out = Resolution {
        viewer_id: viewer_id.to_string(),
        ..Resolution::default()
    };

    for edge in edges {
        validate_edge(edge)?;

        if !edge.involves(viewer_id) {
            return Err(ResolveError::UnrelatedEdge {
                edge_id: edge.id.clone(),
            });
        }
        let viewer_is_requester = edge.requester == viewer_id;

        let counterpart_id = if viewer_is_requester {
            edge.addressee.clone()
        } else {
            edge.requester.clone()
        };
        let connection = ResolvedConnection {
            counterpart_id,
            edge_id: edge.id.clone(),
            status: edge.status,
            viewer_is_requester,
        };

        match edge.status {
            FriendshipStatus::Accepted => out.confirmed.push(connection),
            FriendshipStatus::Pending if viewer_is_requester => {
                out.outgoing_pending.push(connection)
            }
            FriendshipStatus::Pending => out.incoming_pending.push(connection),
            FriendshipStatus::Declined => out.declined += 1,
        }
    }

    Ok(out)
}

fn validate_edge(edge: &FriendshipEdge) -> Result<(), ResolveError> {
    let malformed = |reason: &'static str| ResolveError::MalformedEdge {
        edge_id: edge.id.clone(),
        reason,
    };
    if edge.requester.trim().is_empty() {
        return Err(malformed("missing requester"));
    }
    if edge.addressee.trim().is_empty() {
        return Err(malformed("missing addressee"));
    }
    if edge.requester == edge.addressee {
        return Err(malformed("requester and addressee are the same person"));
    }
    Ok(())
}

/// Candidates the viewer could still send a request to.
///
/// Drops the viewer and anyone already confirmed or pending in either
/// direction. Input order is preserved.
pub fn exclude_connected(candidates: &[Person], resolution: &Resolution) -> Vec<Person> {
    let connected = resolution
        .connections()
        .map(|connection| connection.counterpart_id.as_str())
        .collect::<BTreeSet<_>>();

    candidates
        .iter()
        .filter(|person| person.id != resolution.viewer_id)
        .filter(|person| !connected.contains(person.id.as_str()))
        .cloned()
        .collect()
}
