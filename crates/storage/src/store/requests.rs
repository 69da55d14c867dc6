#![forbid(unsafe_code)]

use time::Date;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersonUpsertRequest {
    pub id: String,
    pub display_name: Option<String>,
    pub birth_date: Option<Date>,
    pub now_ms: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FriendRequest {
    pub requester: String,
    pub addressee: String,
    pub now_ms: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FriendResponse {
    pub edge_id: String,
    pub responder: String,
    pub accept: bool,
    pub now_ms: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WishlistAddRequest {
    pub owner: String,
    pub title: String,
    pub url: Option<String>,
    pub note: Option<String>,
    pub now_ms: i64,
}
