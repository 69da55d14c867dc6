#![forbid(unsafe_code)]

use super::support::*;
use super::{SqliteStore, StoreError, WishlistAddRequest, WishlistItem};
use rusqlite::{OptionalExtension, params};

const MAX_TITLE_CHARS: usize = 200;
const MAX_URL_CHARS: usize = 2048;
const MAX_NOTE_CHARS: usize = 1000;

impl SqliteStore {
    pub fn add_wishlist_item(
        &mut self,
        request: WishlistAddRequest,
    ) -> Result<WishlistItem, StoreError> {
        let owner = canonical_person_id(&request.owner)?;
        let Some(title) = optional_text(Some(request.title), MAX_TITLE_CHARS, "title is too long")?
        else {
            return Err(StoreError::InvalidInput("title must not be empty"));
        };
        let url = optional_text(request.url, MAX_URL_CHARS, "url is too long")?;
        let note = optional_text(request.note, MAX_NOTE_CHARS, "note is too long")?;

        let tx = self.conn.transaction()?;
        let owner_exists = tx
            .query_row("SELECT 1 FROM people WHERE id=?1", params![owner], |_| Ok(()))
            .optional()?;
        if owner_exists.is_none() {
            return Err(StoreError::UnknownId);
        }

        tx.execute(
            "INSERT INTO wishlist_items(owner, title, url, note, created_at_ms) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![owner, title, url, note, request.now_ms],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(WishlistItem {
            id,
            owner,
            title,
            url,
            note,
            created_at_ms: request.now_ms,
        })
    }

    pub fn list_wishlist(&self, owner: &str) -> Result<Vec<WishlistItem>, StoreError> {
        let owner = canonical_person_id(owner)?;
        let mut stmt = self.conn.prepare(
            "SELECT id, owner, title, url, note, created_at_ms FROM wishlist_items \
             WHERE owner=?1 \
             ORDER BY created_at_ms ASC, id ASC",
        )?;

        let mut rows = stmt.query(params![owner])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(WishlistItem {
                id: row.get(0)?,
                owner: row.get(1)?,
                title: row.get(2)?,
                url: row.get(3)?,
                note: row.get(4)?,
                created_at_ms: row.get(5)?,
            });
        }
        Ok(out)
    }

    pub fn remove_wishlist_item(&mut self, id: i64, owner: &str) -> Result<(), StoreError> {
        let owner = canonical_person_id(owner)?;
        let tx = self.conn.transaction()?;

        let stored_owner = tx
            .query_row(
                "SELECT owner FROM wishlist_items WHERE id=?1",
                params![id],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        let Some(stored_owner) = stored_owner else {
            return Err(StoreError::UnknownWishlistItem);
        };
        if stored_owner != owner {
            return Err(StoreError::NotOwner);
        }

        tx.execute("DELETE FROM wishlist_items WHERE id=?1", params![id])?;
        tx.commit()?;
        Ok(())
    }
}
