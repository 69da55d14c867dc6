#![forbid(unsafe_code)]

use bb_core::dates::parse_date;
use bb_core::model::FriendshipStatus;
use bb_storage::{
    FriendRequest, FriendResponse, PersonUpsertRequest, SqliteStore, StoreError,
    WishlistAddRequest,
};
use serde::Deserialize;
use std::path::Path;

/// Startup fixture: people, friendships and wishlist items in YAML.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Seed {
    #[serde(default)]
    people: Vec<SeedPerson>,
    #[serde(default)]
    friendships: Vec<SeedFriendship>,
    #[serde(default)]
    wishlist: Vec<SeedWishlistItem>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SeedPerson {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    birth_date: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SeedFriendship {
    requester: String,
    addressee: String,
    #[serde(default = "default_seed_status")]
    status: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SeedWishlistItem {
    owner: String,
    title: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    note: Option<String>,
}

fn default_seed_status() -> String {
    "accepted".to_string()
}

#[derive(Debug)]
pub(crate) enum SeedError {
    Io(std::io::Error),
    Yaml(serde_yaml::Error),
    Invalid(String),
    Store(StoreError),
}

impl std::fmt::Display for SeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "seed io: {err}"),
            Self::Yaml(err) => write!(f, "seed yaml: {err}"),
            Self::Invalid(message) => write!(f, "seed: {message}"),
            Self::Store(err) => write!(f, "seed store: {err}"),
        }
    }
}

impl std::error::Error for SeedError {}

impl From<StoreError> for SeedError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct SeedReport {
    pub(crate) people: usize,
    pub(crate) friendships: usize,
    pub(crate) wishlist_items: usize,
}

impl Seed {
    pub(crate) fn load(path: &Path) -> Result<Self, SeedError> {
        let raw = std::fs::read_to_string(path).map_err(SeedError::Io)?;
        Self::parse(&raw)
    }

    pub(crate) fn parse(raw: &str) -> Result<Self, SeedError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw).map_err(SeedError::Yaml)
    }

    /// Applies the fixture; re-applying the same file changes nothing.
    ///
    /// A pair that already has an edge is left alone whatever its status, so
    /// answers given after seeding survive a restart.
    pub(crate) fn apply(
        &self,
        store: &mut SqliteStore,
        now_ms: i64,
    ) -> Result<SeedReport, SeedError> {
        let mut report = SeedReport::default();

        for person in &self.people {
            let birth_date = match person.birth_date.as_deref() {
                None => None,
                Some(raw) => Some(parse_date(raw).map_err(|err| {
                    SeedError::Invalid(format!("{}: birth_date: {}", person.id, err.message()))
                })?),
            };
            store.upsert_person(PersonUpsertRequest {
                id: person.id.clone(),
                display_name: person.name.clone(),
                birth_date,
                now_ms,
            })?;
            report.people += 1;
        }

        for friendship in &self.friendships {
            let Some(status) = FriendshipStatus::parse(friendship.status.trim()) else {
                return Err(SeedError::Invalid(format!(
                    "{} -> {}: unknown status {:?}",
                    friendship.requester, friendship.addressee, friendship.status
                )));
            };
            if store
                .friendship_between(&friendship.requester, &friendship.addressee)?
                .is_some()
            {
                continue;
            }
            let row = store.send_friend_request(FriendRequest {
                requester: friendship.requester.clone(),
                addressee: friendship.addressee.clone(),
                now_ms,
            })?;
            if status != FriendshipStatus::Pending {
                store.respond_to_request(FriendResponse {
                    edge_id: row.id,
                    responder: row.addressee,
                    accept: status == FriendshipStatus::Accepted,
                    now_ms,
                })?;
            }
            report.friendships += 1;
        }

        for item in &self.wishlist {
            let existing = store.list_wishlist(&item.owner)?;
            if existing
                .iter()
                .any(|known| known.title == item.title.trim())
            {
                continue;
            }
            store.add_wishlist_item(WishlistAddRequest {
                owner: item.owner.clone(),
                title: item.title.clone(),
                url: item.url.clone(),
                note: item.note.clone(),
                now_ms,
            })?;
            report.wishlist_items += 1;
        }

        Ok(report)
    }
}
