#![forbid(unsafe_code)]

use bb_core::model::FriendshipStatus;

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Sql(rusqlite::Error),
    InvalidInput(&'static str),
    UnknownId,
    UnknownFriendship,
    UnknownWishlistItem,
    FriendshipExists { status: FriendshipStatus },
    NotAddressee,
    NotParticipant,
    NotPending { status: FriendshipStatus },
    NotOwner,
}

impl StoreError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io(_) | Self::Sql(_) => "STORE_ERROR",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::UnknownId | Self::UnknownFriendship | Self::UnknownWishlistItem => "UNKNOWN_ID",
            Self::FriendshipExists { .. } | Self::NotPending { .. } => "CONFLICT",
            Self::NotAddressee | Self::NotParticipant | Self::NotOwner => "FORBIDDEN",
        }
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io: {err}"),
            Self::Sql(err) => write!(f, "sqlite: {err}"),
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
            Self::UnknownId => write!(f, "unknown person id"),
            Self::UnknownFriendship => write!(f, "unknown friendship"),
            Self::UnknownWishlistItem => write!(f, "unknown wishlist item"),
            Self::FriendshipExists { status } => {
                write!(f, "friendship already exists (status={})", status.as_str())
            }
            Self::NotAddressee => write!(f, "only the addressee may respond to a request"),
            Self::NotParticipant => write!(f, "person is not part of this friendship"),
            Self::NotPending { status } => {
                write!(f, "friendship is not pending (status={})", status.as_str())
            }
            Self::NotOwner => write!(f, "only the owner may change this wishlist item"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sql(value)
    }
}
