#![forbid(unsafe_code)]

use super::support::*;
use super::{PersonUpsertRequest, SqliteStore, StoreError};
use bb_core::dates::format_date;
use bb_core::model::Person;
use rusqlite::{OptionalExtension, params};
use time::Date;

const MAX_DISPLAY_NAME_CHARS: usize = 120;

impl SqliteStore {
    pub fn upsert_person(&mut self, request: PersonUpsertRequest) -> Result<Person, StoreError> {
        let PersonUpsertRequest {
            id,
            display_name,
            birth_date,
            now_ms,
        } = request;

        let id = canonical_person_id(&id)?;
        let display_name = optional_text(
            display_name,
            MAX_DISPLAY_NAME_CHARS,
            "display_name is too long",
        )?;

        let key = search_key(&id, display_name.as_deref());
        self.conn.execute(
            "INSERT INTO people(id, display_name, birth_date, search_key, created_at_ms, updated_at_ms) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?5) \
             ON CONFLICT(id) DO UPDATE SET \
               display_name=excluded.display_name, \
               birth_date=excluded.birth_date, \
               search_key=excluded.search_key, \
               updated_at_ms=excluded.updated_at_ms",
            params![id, display_name, birth_date.map(format_date), key, now_ms],
        )?;

        Ok(Person {
            id,
            display_name,
            birth_date,
        })
    }

    pub fn get_person(&self, id: &str) -> Result<Option<Person>, StoreError> {
        let id = canonical_person_id(id)?;
        let parts = self
            .conn
            .query_row(
                &format!("SELECT {PERSON_COLUMNS} FROM people WHERE id=?1"),
                params![id],
                person_parts,
            )
            .optional()?;
        parts.map(person_from_parts).transpose()
    }

    /// People for `ids`, in request order; unknown ids are skipped.
    pub fn list_people(&self, ids: &[String]) -> Result<Vec<Person>, StoreError> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {PERSON_COLUMNS} FROM people WHERE id=?1"))?;

        let mut out = Vec::with_capacity(ids.len());
        for id in ids {
            let parts = stmt.query_row(params![id], person_parts).optional()?;
            if let Some(parts) = parts {
                out.push(person_from_parts(parts)?);
            }
        }
        Ok(out)
    }

    /// Case-insensitive substring match on display name or id.
    pub fn search_people(&self, query: &str, limit: usize) -> Result<Vec<Person>, StoreError> {
        let limit = to_sqlite_i64(limit)?;
        let pattern = like_contains(query);

        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PERSON_COLUMNS} FROM people \
             WHERE search_key LIKE ?1 ESCAPE '\\' \
             ORDER BY lower(coalesce(display_name, id)) ASC, id ASC \
             LIMIT ?2"
        ))?;

        let mut rows = stmt.query(params![pattern, limit])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(person_from_parts(person_parts(row)?)?);
        }
        Ok(out)
    }

    pub fn set_birth_date(
        &mut self,
        id: &str,
        birth_date: Option<Date>,
        now_ms: i64,
    ) -> Result<Person, StoreError> {
        let id = canonical_person_id(id)?;
        let tx = self.conn.transaction()?;

        let updated = tx.execute(
            "UPDATE people SET birth_date=?2, updated_at_ms=?3 WHERE id=?1",
            params![id, birth_date.map(format_date), now_ms],
        )?;
        if updated == 0 {
            return Err(StoreError::UnknownId);
        }

        let parts = tx.query_row(
            &format!("SELECT {PERSON_COLUMNS} FROM people WHERE id=?1"),
            params![id],
            person_parts,
        )?;
        tx.commit()?;
        person_from_parts(parts)
    }
}
