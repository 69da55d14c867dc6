#![forbid(unsafe_code)]
#![allow(dead_code)]

use serde_json::Value;
use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

pub(crate) const PINNED_TODAY: &str = "2024-03-01";

pub(crate) struct Server {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    storage_dir: PathBuf,
    next_id: i64,
}

impl Server {
    pub(crate) fn start(test_name: &str) -> Self {
        Self::start_with_args(test_name, &[])
    }

    /// Spawns the server pinned to `PINNED_TODAY` unless `--today` is passed.
    pub(crate) fn start_with_args(test_name: &str, extra_args: &[&str]) -> Self {
        let storage_dir = temp_dir(test_name);
        let has_today = extra_args.iter().any(|arg| arg.trim() == "--today");
        let default_today: &[&str] = if has_today {
            &[]
        } else {
            &["--today", PINNED_TODAY]
        };

        let mut child = Command::new(env!("CARGO_BIN_EXE_bb_mcp"))
            .arg("--storage-dir")
            .arg(&storage_dir)
            .args(default_today)
            .args(extra_args)
            .env_remove("BIRTHDAYBOOK_TODAY")
            .env_remove("BIRTHDAYBOOK_SEED")
            .env_remove("BIRTHDAYBOOK_UPCOMING_LIMIT")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .expect("spawn bb_mcp");

        let stdin = child.stdin.take().expect("stdin");
        let stdout = BufReader::new(child.stdout.take().expect("stdout"));

        Self {
            child,
            stdin,
            stdout,
            storage_dir,
            next_id: 100,
        }
    }

    pub(crate) fn start_initialized(test_name: &str) -> Self {
        let mut server = Self::start(test_name);
        server.initialize_default();
        server
    }

    pub(crate) fn start_initialized_with_args(test_name: &str, extra_args: &[&str]) -> Self {
        let mut server = Self::start_with_args(test_name, extra_args);
        server.initialize_default();
        server
    }

    pub(crate) fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    pub(crate) fn send(&mut self, req: Value) {
        writeln!(self.stdin, "{req}").expect("write request");
        self.stdin.flush().expect("flush request");
    }

    pub(crate) fn send_raw(&mut self, line: &str) {
        writeln!(self.stdin, "{line}").expect("write raw line");
        self.stdin.flush().expect("flush raw line");
    }

    pub(crate) fn recv(&mut self) -> Value {
        let mut line = String::new();
        self.stdout.read_line(&mut line).expect("read response");
        assert!(!line.trim().is_empty(), "empty response line");
        serde_json::from_str(&line).expect("parse response json")
    }

    pub(crate) fn request(&mut self, req: Value) -> Value {
        self.send(req);
        self.recv()
    }

    pub(crate) fn initialize_default(&mut self) {
        let _ = self.request(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "initialize",
            "params": { "protocolVersion": "2024-11-05", "capabilities": {}, "clientInfo": { "name": "test", "version": "0" } }
        }));
        self.send(json!({
            "jsonrpc": "2.0",
            "method": "notifications/initialized",
            "params": {}
        }));
    }

    /// Calls `tool` with `{op, args}` and returns the decoded envelope.
    pub(crate) fn call(&mut self, tool: &str, op: &str, args: Value) -> Value {
        self.next_id += 1;
        let resp = self.request(json!({
            "jsonrpc": "2.0",
            "id": self.next_id,
            "method": "tools/call",
            "params": { "name": tool, "arguments": { "op": op, "args": args } }
        }));
        extract_tool_text(&resp)
    }

    /// Like `call`, but fails the test unless the envelope reports success.
    pub(crate) fn call_ok(&mut self, tool: &str, op: &str, args: Value) -> Value {
        let body = self.call(tool, op, args);
        assert_eq!(
            body.get("success").and_then(|v| v.as_bool()),
            Some(true),
            "{tool} op={op} failed: {body}"
        );
        body.get("result").cloned().unwrap_or(Value::Null)
    }

    pub(crate) fn add_person(&mut self, id: &str, birth_date: Option<&str>) {
        self.call_ok(
            "people",
            "upsert",
            json!({ "id": id, "name": id.to_uppercase(), "birth_date": birth_date }),
        );
    }

    /// Sends a request from `a` to `b` and has `b` accept it; returns the edge id.
    pub(crate) fn befriend(&mut self, a: &str, b: &str) -> String {
        let sent = self.call_ok("friends", "request", json!({ "requester": a, "addressee": b }));
        let edge_id = sent["friendship"]["edge_id"]
            .as_str()
            .expect("edge_id")
            .to_string();
        self.call_ok(
            "friends",
            "respond",
            json!({ "edge_id": edge_id, "responder": b, "accept": true }),
        );
        edge_id
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
        let _ = std::fs::remove_dir_all(&self.storage_dir);
    }
}

pub(crate) fn temp_dir(test_name: &str) -> PathBuf {
    let base = std::env::temp_dir();
    let pid = std::process::id();
    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let dir = base.join(format!("bb_mcp_{test_name}_{pid}_{nonce}"));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

pub(crate) fn extract_tool_text(resp: &Value) -> Value {
    let text = resp
        .get("result")
        .and_then(|v| v.get("content"))
        .and_then(|v| v.get(0))
        .and_then(|v| v.get("text"))
        .and_then(|v| v.as_str())
        .expect("result.content[0].text");
    if let Ok(parsed) = serde_json::from_str(text) {
        return parsed;
    }
    Value::String(text.to_string())
}

pub(crate) fn assert_json_rpc_error(resp: &Value, expected_code: i64) {
    let code = resp
        .get("error")
        .and_then(|v| v.get("code"))
        .and_then(|v| v.as_i64())
        .expect("error.code");
    assert_eq!(code, expected_code);
}

pub(crate) fn error_code(body: &Value) -> Option<&str> {
    body.get("error")
        .and_then(|err| err.get("code"))
        .and_then(|code| code.as_str())
}
