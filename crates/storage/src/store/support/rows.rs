#![forbid(unsafe_code)]

use super::super::{FriendshipRow, StoreError};
use bb_core::dates::parse_date;
use bb_core::model::{FriendshipStatus, Person};

pub(in crate::store) const PERSON_COLUMNS: &str = "id, display_name, birth_date";
pub(in crate::store) const FRIENDSHIP_COLUMNS: &str =
    "id, requester, addressee, status, created_at_ms, updated_at_ms";

pub(in crate::store) type PersonParts = (String, Option<String>, Option<String>);
pub(in crate::store) type FriendshipParts = (String, String, String, String, i64, i64);

pub(in crate::store) fn person_parts(row: &rusqlite::Row<'_>) -> rusqlite::Result<PersonParts> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?))
}

pub(in crate::store) fn person_from_parts(parts: PersonParts) -> Result<Person, StoreError> {
    let (id, display_name, birth_date) = parts;
    let birth_date = birth_date
        .as_deref()
        .map(parse_date)
        .transpose()
        .map_err(|_| StoreError::InvalidInput("invalid birth_date row"))?;
    Ok(Person {
        id,
        display_name,
        birth_date,
    })
}

pub(in crate::store) fn friendship_parts(
    row: &rusqlite::Row<'_>,
) -> rusqlite::Result<FriendshipParts> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
    ))
}

pub(in crate::store) fn friendship_from_parts(
    parts: FriendshipParts,
) -> Result<FriendshipRow, StoreError> {
    let (id, requester, addressee, status, created_at_ms, updated_at_ms) = parts;
    let status = FriendshipStatus::parse(&status)
        .ok_or(StoreError::InvalidInput("invalid friendship status row"))?;
    Ok(FriendshipRow {
        id,
        requester,
        addressee,
        status,
        created_at_ms,
        updated_at_ms,
    })
}
