#![forbid(unsafe_code)]

use bb_core::dates::parse_date;
use std::path::PathBuf;
use time::Date;

const DEFAULT_STORAGE_DIR: &str = ".birthdaybook";
pub(crate) const DEFAULT_UPCOMING_LIMIT: usize = 10;
const MAX_UPCOMING_LIMIT: usize = 500;

/// Flag value first, then the environment.
fn flag_or_env(flag: &str, env_key: &str) -> Option<String> {
    let mut args = std::env::args().skip(1);
    let mut found: Option<String> = None;
    while let Some(arg) = args.next() {
        if arg.as_str() == flag
            && let Some(value) = args.next()
        {
            found = Some(value);
        }
    }
    found
        .or_else(|| std::env::var(env_key).ok())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub(crate) fn parse_storage_dir() -> PathBuf {
    flag_or_env("--storage-dir", "BIRTHDAYBOOK_STORAGE_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR))
}

/// Pinned reference date; a malformed value is a startup error.
pub(crate) fn parse_today() -> Result<Option<Date>, String> {
    let Some(raw) = flag_or_env("--today", "BIRTHDAYBOOK_TODAY") else {
        return Ok(None);
    };
    parse_date(&raw)
        .map(Some)
        .map_err(|err| format!("invalid --today value {raw:?}: {}", err.message()))
}

pub(crate) fn parse_seed_path() -> Option<PathBuf> {
    flag_or_env("--seed", "BIRTHDAYBOOK_SEED").map(PathBuf::from)
}

pub(crate) fn parse_upcoming_limit() -> usize {
    flag_or_env("--upcoming-limit", "BIRTHDAYBOOK_UPCOMING_LIMIT")
        .and_then(|raw| raw.parse::<usize>().ok())
        .filter(|limit| *limit > 0)
        .map(|limit| limit.min(MAX_UPCOMING_LIMIT))
        .unwrap_or(DEFAULT_UPCOMING_LIMIT)
}
