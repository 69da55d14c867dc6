#![forbid(unsafe_code)]

mod entry;
mod server;
mod support;
mod tools;

pub(crate) use support::*;

use bb_storage::SqliteStore;
use std::fmt::Write as _;
use time::Date;

const MCP_VERSION: &str = "2024-11-05";
const SERVER_NAME: &str = "birthdaybook-mcp";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

fn write_last_crash(storage_dir: &std::path::Path, kind: &str, detail: &str) {
    // Best-effort; stdout carries the protocol so nothing is printed there.
    let _ = std::fs::create_dir_all(storage_dir);
    let path = storage_dir.join("birthdaybook_last_crash.txt");

    let mut out = String::new();
    let _ = writeln!(out, "ts={}", crate::ts_ms_to_rfc3339(crate::now_ms_i64()));
    let _ = writeln!(out, "pid={}", std::process::id());
    let _ = writeln!(out, "kind={kind}");
    let _ = writeln!(out, "version={SERVER_VERSION}");
    let _ = writeln!(out, "args={:?}", std::env::args().collect::<Vec<_>>());
    let _ = writeln!(out, "detail={detail}");

    let _ = std::fs::write(path, out);
}

fn install_crash_reporter(storage_dir: std::path::PathBuf) {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let mut detail = info.to_string();
        let backtrace = std::backtrace::Backtrace::force_capture();
        let _ = write!(&mut detail, "\nbacktrace:\n{backtrace}");
        write_last_crash(&storage_dir, "panic", &detail);
        default_hook(info);
    }));
}

pub(crate) struct McpServer {
    initialized: bool,
    store: SqliteStore,
    pinned_today: Option<Date>,
    upcoming_limit: usize,
    session_log: SessionLog,
}

pub(crate) struct McpServerConfig {
    pinned_today: Option<Date>,
    upcoming_limit: usize,
}

fn usage() -> &'static str {
    "bb_mcp: birthdaybook MCP server (friends, birthdays, wishlists over stdio)\n\n\
USAGE:\n\
  bb_mcp [--storage-dir DIR] [--today YYYY-MM-DD] [--seed FILE] [--upcoming-limit N]\n\
\n\
FLAGS:\n\
  -h, --help       Print this help and exit\n\
  -V, --version    Print version and exit\n\
\n\
ENV:\n\
  BIRTHDAYBOOK_STORAGE_DIR, BIRTHDAYBOOK_TODAY, BIRTHDAYBOOK_SEED,\n\
  BIRTHDAYBOOK_UPCOMING_LIMIT (flags win over env)\n"
}

fn version_line() -> String {
    format!("bb_mcp {SERVER_VERSION}")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = std::env::args().collect::<Vec<_>>();
    if args
        .iter()
        .any(|arg| matches!(arg.as_str(), "-h" | "--help"))
    {
        print!("{}", usage());
        return Ok(());
    }
    if args
        .iter()
        .any(|arg| matches!(arg.as_str(), "-V" | "--version"))
    {
        println!("{}", version_line());
        return Ok(());
    }

    let storage_dir = parse_storage_dir();
    install_crash_reporter(storage_dir.clone());
    let mut session_log = SessionLog::new(&storage_dir);

    let pinned_today = parse_today()?;
    let upcoming_limit = parse_upcoming_limit();
    let seed_path = parse_seed_path();

    let mut store = SqliteStore::open(&storage_dir)?;
    if let Some(path) = seed_path {
        let seed = Seed::load(&path)?;
        let report = seed.apply(&mut store, now_ms_i64())?;
        session_log.note_seed(&report);
    }

    let mut server = McpServer::new(
        store,
        session_log,
        McpServerConfig {
            pinned_today,
            upcoming_limit,
        },
    );
    let result = entry::run_stdio(&mut server);
    match &result {
        Ok(()) => server.session_log.note_exit("eof"),
        Err(err) => {
            server.session_log.note_exit(&format!("error: {err}"));
            write_last_crash(&storage_dir, "error", &format!("{err:?}"));
        }
    }
    result
}
