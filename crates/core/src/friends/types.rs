#![forbid(unsafe_code)]

use crate::model::{FriendshipStatus, Person};

/// One edge seen from the viewer's side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedConnection {
    pub counterpart_id: String,
    pub edge_id: String,
    pub status: FriendshipStatus,
    pub viewer_is_requester: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    pub viewer_id: String,
    pub confirmed: Vec<ResolvedConnection>,
    pub incoming_pending: Vec<ResolvedConnection>,
    pub outgoing_pending: Vec<ResolvedConnection>,
    /// Declined edges are dropped from every list but still counted.
    pub declined: usize,
}

impl Resolution {
    pub fn connections(&self) -> impl Iterator<Item = &ResolvedConnection> {
        self.confirmed
            .iter()
            .chain(self.incoming_pending.iter())
            .chain(self.outgoing_pending.iter())
    }

    pub fn connection_with(&self, person_id: &str) -> Option<&ResolvedConnection> {
        self.connections()
            .find(|connection| connection.counterpart_id == person_id)
    }

    pub fn is_connected(&self, person_id: &str) -> bool {
        self.connection_with(person_id).is_some()
    }

    pub fn confirmed_ids(&self) -> Vec<&str> {
        self.confirmed
            .iter()
            .map(|connection| connection.counterpart_id.as_str())
            .collect()
    }

    /// Snapshots of confirmed friends, in the order of `confirmed`.
    ///
    /// Friends missing from `people` are skipped.
    pub fn confirmed_people<'a>(&self, people: &'a [Person]) -> Vec<&'a Person> {
        self.confirmed
            .iter()
            .filter_map(|connection| {
                people
                    .iter()
                    .find(|person| person.id == connection.counterpart_id)
            })
            .collect()
    }

    pub fn total(&self) -> usize {
        self.confirmed.len() + self.incoming_pending.len() + self.outgoing_pending.len()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveError {
    BlankViewer,
    MalformedEdge {
        edge_id: String,
        reason: &'static str,
    },
    UnrelatedEdge {
        edge_id: String,
    },
}

impl ResolveError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::BlankViewer => "BLANK_VIEWER",
            Self::MalformedEdge { .. } => "MALFORMED_EDGE",
            Self::UnrelatedEdge { .. } => "UNRELATED_EDGE",
        }
    }
}

impl std::fmt::Display for ResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankViewer => write!(f, "viewer id must not be empty"),
            Self::MalformedEdge { edge_id, reason } => {
                write!(f, "malformed friendship edge (edge_id={edge_id}): {reason}")
            }
            Self::UnrelatedEdge { edge_id } => write!(
                f,
                "friendship edge does not involve the viewer (edge_id={edge_id})"
            ),
        }
    }
}

impl std::error::Error for ResolveError {}
