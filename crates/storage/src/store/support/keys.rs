#![forbid(unsafe_code)]

use super::super::StoreError;
use bb_core::ids::{FRIENDSHIP_ID_PREFIX, FriendshipId, PersonId};
use sha2::Digest as _;
use std::fmt::Write as _;

/// Edge id for the unordered pair: the same for either request direction.
pub(in crate::store) fn friendship_id(a: &str, b: &str) -> String {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };

    let mut hasher = sha2::Sha256::new();
    hasher.update(low.as_bytes());
    hasher.update([0x1fu8]);
    hasher.update(high.as_bytes());
    let digest = hasher.finalize();

    let mut out = String::with_capacity(FRIENDSHIP_ID_PREFIX.len() + 32);
    out.push_str(FRIENDSHIP_ID_PREFIX);
    for b in &digest[..16] {
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

pub(in crate::store) fn canonical_person_id(value: &str) -> Result<String, StoreError> {
    PersonId::try_new(value)
        .map(PersonId::into_string)
        .map_err(|err| StoreError::InvalidInput(err.message()))
}

pub(in crate::store) fn canonical_friendship_id(value: &str) -> Result<String, StoreError> {
    FriendshipId::try_new(value)
        .map(FriendshipId::into_string)
        .map_err(|err| StoreError::InvalidInput(err.message()))
}

/// Trims optional free text; blank becomes `None`.
pub(in crate::store) fn optional_text(
    value: Option<String>,
    max_chars: usize,
    too_long: &'static str,
) -> Result<Option<String>, StoreError> {
    let Some(value) = value else {
        return Ok(None);
    };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > max_chars {
        return Err(StoreError::InvalidInput(too_long));
    }
    Ok(Some(trimmed.to_string()))
}
