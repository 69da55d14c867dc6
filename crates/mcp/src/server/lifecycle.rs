#![forbid(unsafe_code)]

use crate::{Args, McpServer, McpServerConfig, SessionLog};
use bb_storage::SqliteStore;
use serde_json::{Value, json};
use time::Date;

impl McpServer {
    pub(crate) fn new(store: SqliteStore, session_log: SessionLog, cfg: McpServerConfig) -> Self {
        Self {
            initialized: false,
            store,
            pinned_today: cfg.pinned_today,
            upcoming_limit: cfg.upcoming_limit,
            session_log,
        }
    }

    pub(crate) fn handle(&mut self, request: crate::JsonRpcRequest) -> Option<Value> {
        let method = request.method.as_str();
        let expects_response = !matches!(request.id.as_ref(), None | Some(Value::Null));
        self.session_log.note_method(method);

        if method == "initialize" {
            // Echo the client's protocol version when it sends one.
            let protocol_version = request
                .params
                .as_ref()
                .and_then(|v| v.get("protocolVersion"))
                .and_then(|v| v.as_str())
                .unwrap_or(crate::MCP_VERSION);

            return Some(crate::json_rpc_response(
                request.id,
                json!({
                    "protocolVersion": protocol_version,
                    "serverInfo": {
                        "name": crate::SERVER_NAME,
                        "version": crate::SERVER_VERSION
                    },
                    "capabilities": { "tools": {} }
                }),
            ));
        }

        // Both spellings are notifications; never answered.
        if method == "notifications/initialized" || method == "initialized" {
            self.initialized = true;
            return None;
        }

        if !self.initialized {
            if matches!(method, "tools/call" | "tools/list" | "ping") {
                self.initialized = true;
            } else if expects_response {
                return Some(crate::json_rpc_error(
                    request.id,
                    -32002,
                    "Server not initialized",
                ));
            } else {
                return None;
            }
        }

        if method == "ping" {
            return Some(crate::json_rpc_response(request.id, json!({})));
        }

        if method == "tools/list" {
            return Some(crate::json_rpc_response(
                request.id,
                json!({ "tools": crate::tools::tool_definitions() }),
            ));
        }

        if method == "tools/call" {
            let Some(params_obj) = request.params.as_ref().and_then(|v| v.as_object()) else {
                return Some(crate::json_rpc_error(
                    request.id,
                    -32602,
                    "params must be an object",
                ));
            };

            let tool_name = params_obj
                .get("name")
                .and_then(|v| v.as_str())
                .unwrap_or("");
            let args = match params_obj.get("arguments") {
                None | Some(Value::Null) => json!({}),
                Some(v) => v.clone(),
            };
            let response_body = self.call_tool(tool_name, args);
            let success = response_body
                .get("success")
                .and_then(|v| v.as_bool())
                .unwrap_or(false);
            if !success
                && let Some(message) = response_body
                    .get("error")
                    .and_then(|err| err.get("message"))
                    .and_then(|v| v.as_str())
            {
                self.session_log.note_error(&format!("{tool_name}: {message}"));
            }

            return Some(crate::json_rpc_response(
                request.id,
                json!({
                    "content": [crate::tool_text_content(&response_body)],
                    "isError": !success
                }),
            ));
        }

        if !expects_response {
            return None;
        }

        Some(crate::json_rpc_error(
            request.id,
            -32601,
            &format!("Method not found: {method}"),
        ))
    }

    pub(crate) fn call_tool(&mut self, name: &str, args: Value) -> Value {
        let name = normalize_tool_name(name);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            crate::tools::dispatch_tool(self, name, args)
        }));

        match result {
            Ok(Some(resp)) => resp,
            Ok(None) => crate::ai_error_with(
                "INVALID_INPUT",
                &format!("Unknown tool: {name}"),
                Some("Call tools/list; available tools are people, friends, birthdays, wishlist."),
            ),
            Err(_) => crate::ai_error(
                "STORE_ERROR",
                &format!("Internal panic while handling {name}"),
            ),
        }
    }

    /// Reference date for a call: `today` argument, then the pinned date, then UTC.
    pub(crate) fn reference_date(&self, args: &Args) -> Result<Date, Value> {
        if let Some(date) = crate::optional_date(args, "today")? {
            return Ok(date);
        }
        Ok(self.pinned_today.unwrap_or_else(crate::today_utc))
    }

    pub(crate) fn default_upcoming_limit(&self) -> usize {
        self.upcoming_limit
    }
}

/// Accepts `birthdaybook/people` and `birthdaybook.people` as `people`.
fn normalize_tool_name(name: &str) -> &str {
    let name = name.trim();
    if let Some((_, suffix)) = name.rsplit_once('/') {
        return suffix;
    }
    if let Some((prefix, suffix)) = name.split_once('.')
        && prefix == "birthdaybook"
    {
        return suffix;
    }
    name
}
