#![forbid(unsafe_code)]

use super::super::StoreError;
use super::sql::search_key;
use rusqlite::{Connection, params};

const SCHEMA_VERSION: i64 = 2;

pub(in crate::store) fn install_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS meta (
          key TEXT PRIMARY KEY,
          value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS people (
          id TEXT PRIMARY KEY,
          display_name TEXT,
          birth_date TEXT,
          search_key TEXT NOT NULL DEFAULT '',
          created_at_ms INTEGER NOT NULL,
          updated_at_ms INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS friendships (
          id TEXT PRIMARY KEY,
          requester TEXT NOT NULL,
          addressee TEXT NOT NULL,
          status TEXT NOT NULL CHECK(status IN ('pending', 'accepted', 'declined')),
          created_at_ms INTEGER NOT NULL,
          updated_at_ms INTEGER NOT NULL,
          FOREIGN KEY(requester) REFERENCES people(id) ON DELETE CASCADE,
          FOREIGN KEY(addressee) REFERENCES people(id) ON DELETE CASCADE,
          CHECK(requester <> addressee)
        );

        CREATE INDEX IF NOT EXISTS idx_friendships_requester
          ON friendships(requester, created_at_ms);
        CREATE INDEX IF NOT EXISTS idx_friendships_addressee
          ON friendships(addressee, created_at_ms);

        CREATE TABLE IF NOT EXISTS wishlist_items (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          owner TEXT NOT NULL,
          title TEXT NOT NULL,
          url TEXT,
          note TEXT,
          created_at_ms INTEGER NOT NULL,
          FOREIGN KEY(owner) REFERENCES people(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_wishlist_owner_created
          ON wishlist_items(owner, created_at_ms, id);
        "#,
    )?;
    backfill_search_key(conn)?;

    conn.execute(
        "INSERT INTO meta(key, value) VALUES ('schema_version', ?1) \
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![SCHEMA_VERSION.to_string()],
    )?;

    Ok(())
}

/// Version 1 databases have no `search_key`; add it and fill it from Rust.
fn backfill_search_key(conn: &Connection) -> Result<(), StoreError> {
    let present: i64 = conn.query_row(
        "SELECT count(*) FROM pragma_table_info('people') WHERE name='search_key'",
        [],
        |row| row.get(0),
    )?;
    if present > 0 {
        return Ok(());
    }
    conn.execute(
        "ALTER TABLE people ADD COLUMN search_key TEXT NOT NULL DEFAULT ''",
        [],
    )?;

    let mut stmt = conn.prepare("SELECT id, display_name FROM people")?;
    let rows = stmt
        .query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, Option<String>>(1)?))
        })?
        .collect::<Result<Vec<_>, _>>()?;
    for (id, display_name) in rows {
        conn.execute(
            "UPDATE people SET search_key=?2 WHERE id=?1",
            params![id, search_key(&id, display_name.as_deref())],
        )?;
    }
    Ok(())
}
