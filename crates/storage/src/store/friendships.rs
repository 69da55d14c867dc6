#![forbid(unsafe_code)]

use super::support::*;
use super::{FriendRequest, FriendResponse, FriendshipRow, SqliteStore, StoreError};
use bb_core::model::FriendshipStatus;
use rusqlite::{OptionalExtension, Transaction, params};

impl SqliteStore {
    /// Creates a pending edge from `requester` to `addressee`.
    ///
    /// A declined pair is reopened as pending with the new direction; a
    /// pending or accepted pair is a conflict whichever side asks.
    pub fn send_friend_request(
        &mut self,
        request: FriendRequest,
    ) -> Result<FriendshipRow, StoreError> {
        let requester = canonical_person_id(&request.requester)?;
        let addressee = canonical_person_id(&request.addressee)?;
        if requester == addressee {
            return Err(StoreError::InvalidInput("cannot send a friend request to yourself"));
        }

        let tx = self.conn.transaction()?;
        ensure_person_exists_tx(&tx, &requester)?;
        ensure_person_exists_tx(&tx, &addressee)?;

        let id = friendship_id(&requester, &addressee);
        match friendship_tx(&tx, &id)? {
            None => {
                let insert = tx.execute(
                    "INSERT INTO friendships(id, requester, addressee, status, created_at_ms, updated_at_ms) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
                    params![
                        id,
                        requester,
                        addressee,
                        FriendshipStatus::Pending.as_str(),
                        request.now_ms
                    ],
                );
                if let Err(err) = insert {
                    if is_constraint_violation(&err) {
                        return Err(StoreError::FriendshipExists {
                            status: FriendshipStatus::Pending,
                        });
                    }
                    return Err(StoreError::Sql(err));
                }
            }
            Some(existing) if existing.status == FriendshipStatus::Declined => {
                tx.execute(
                    "UPDATE friendships SET requester=?2, addressee=?3, status=?4, updated_at_ms=?5 \
                     WHERE id=?1",
                    params![
                        id,
                        requester,
                        addressee,
                        FriendshipStatus::Pending.as_str(),
                        request.now_ms
                    ],
                )?;
            }
            Some(existing) => {
                return Err(StoreError::FriendshipExists {
                    status: existing.status,
                });
            }
        }

        let row = friendship_tx(&tx, &id)?.ok_or(StoreError::UnknownFriendship)?;
        tx.commit()?;
        Ok(row)
    }

    /// Accepts or declines a pending request; only its addressee may answer.
    pub fn respond_to_request(
        &mut self,
        response: FriendResponse,
    ) -> Result<FriendshipRow, StoreError> {
        let edge_id = canonical_friendship_id(&response.edge_id)?;
        let responder = canonical_person_id(&response.responder)?;

        let tx = self.conn.transaction()?;
        let Some(existing) = friendship_tx(&tx, &edge_id)? else {
            return Err(StoreError::UnknownFriendship);
        };
        if existing.addressee != responder {
            if existing.requester == responder {
                return Err(StoreError::NotAddressee);
            }
            return Err(StoreError::NotParticipant);
        }
        if existing.status != FriendshipStatus::Pending {
            return Err(StoreError::NotPending {
                status: existing.status,
            });
        }

        let status = if response.accept {
            FriendshipStatus::Accepted
        } else {
            FriendshipStatus::Declined
        };
        tx.execute(
            "UPDATE friendships SET status=?2, updated_at_ms=?3 WHERE id=?1",
            params![edge_id, status.as_str(), response.now_ms],
        )?;

        let row = friendship_tx(&tx, &edge_id)?.ok_or(StoreError::UnknownFriendship)?;
        tx.commit()?;
        Ok(row)
    }

    /// Deletes the edge (unfriend, cancel or dismiss); either side may do it.
    pub fn remove_friendship(
        &mut self,
        edge_id: &str,
        actor: &str,
    ) -> Result<FriendshipRow, StoreError> {
        let edge_id = canonical_friendship_id(edge_id)?;
        let actor = canonical_person_id(actor)?;

        let tx = self.conn.transaction()?;
        let Some(existing) = friendship_tx(&tx, &edge_id)? else {
            return Err(StoreError::UnknownFriendship);
        };
        if existing.requester != actor && existing.addressee != actor {
            return Err(StoreError::NotParticipant);
        }

        tx.execute("DELETE FROM friendships WHERE id=?1", params![edge_id])?;
        tx.commit()?;
        Ok(existing)
    }

    pub fn get_friendship(&self, edge_id: &str) -> Result<Option<FriendshipRow>, StoreError> {
        let edge_id = canonical_friendship_id(edge_id)?;
        let parts = self
            .conn
            .query_row(
                &format!("SELECT {FRIENDSHIP_COLUMNS} FROM friendships WHERE id=?1"),
                params![edge_id],
                friendship_parts,
            )
            .optional()?;
        parts.map(friendship_from_parts).transpose()
    }

    /// The single edge between `a` and `b`, whichever of them sent it.
    pub fn friendship_between(
        &self,
        a: &str,
        b: &str,
    ) -> Result<Option<FriendshipRow>, StoreError> {
        let a = canonical_person_id(a)?;
        let b = canonical_person_id(b)?;
        if a == b {
            return Ok(None);
        }
        self.get_friendship(&friendship_id(&a, &b))
    }

    /// Every edge touching `viewer`, oldest first.
    pub fn edges_for(&self, viewer: &str) -> Result<Vec<FriendshipRow>, StoreError> {
        let viewer = canonical_person_id(viewer)?;
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {FRIENDSHIP_COLUMNS} FROM friendships \
             WHERE requester=?1 OR addressee=?1 \
             ORDER BY created_at_ms ASC, id ASC"
        ))?;

        let mut rows = stmt.query(params![viewer])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(friendship_from_parts(friendship_parts(row)?)?);
        }
        Ok(out)
    }
}

fn friendship_tx(tx: &Transaction<'_>, id: &str) -> Result<Option<FriendshipRow>, StoreError> {
    let parts = tx
        .query_row(
            &format!("SELECT {FRIENDSHIP_COLUMNS} FROM friendships WHERE id=?1"),
            params![id],
            friendship_parts,
        )
        .optional()?;
    parts.map(friendship_from_parts).transpose()
}

fn ensure_person_exists_tx(tx: &Transaction<'_>, id: &str) -> Result<(), StoreError> {
    let exists = tx
        .query_row("SELECT 1 FROM people WHERE id=?1", params![id], |_| Ok(()))
        .optional()?;
    if exists.is_none() {
        return Err(StoreError::UnknownId);
    }
    Ok(())
}
