#![forbid(unsafe_code)]

mod error;
mod friendships;
mod people;
mod requests;
mod support;
mod wishlist;

pub use error::StoreError;
pub use requests::*;

use bb_core::model::{FriendshipEdge, FriendshipStatus};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;
use support::install_schema;

const DB_FILE_NAME: &str = "birthdaybook.db";

#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
    storage_dir: PathBuf,
}

impl SqliteStore {
    pub fn open(storage_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let storage_dir = storage_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&storage_dir)?;

        let db_path = storage_dir.join(DB_FILE_NAME);
        let conn = Connection::open(db_path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        install_schema(&conn)?;

        Ok(Self { conn, storage_dir })
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FriendshipRow {
    pub id: String,
    pub requester: String,
    pub addressee: String,
    pub status: FriendshipStatus,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

impl FriendshipRow {
    pub fn to_edge(&self) -> FriendshipEdge {
        FriendshipEdge {
            id: self.id.clone(),
            requester: self.requester.clone(),
            addressee: self.addressee.clone(),
            status: self.status,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WishlistItem {
    pub id: i64,
    pub owner: String,
    pub title: String,
    pub url: Option<String>,
    pub note: Option<String>,
    pub created_at_ms: i64,
}
