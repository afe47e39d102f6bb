//! Fighter Arena MCP Server
//!
//! A Model Context Protocol server that exposes the fighter arena over
//! line-delimited JSON-RPC on stdio. Logs go to stderr so stdout carries
//! protocol messages only.

use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use fighter_arena::config::{ArenaConfig, DEFAULT_CONFIG_PATH};
use fighter_arena::mcp_interface::{jsonrpc_response, ArenaSession};
use fighter_arena::BattleResult;
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

struct McpServer {
    session: ArenaSession,
}

fn text_content(text: String) -> Value {
    json!({
        "content": [{"type": "text", "text": text}]
    })
}

fn string_arg<'a>(args: &'a Value, key: &str) -> &'a str {
    args[key].as_str().unwrap_or("")
}

fn count_arg(args: &Value, key: &str) -> Option<u32> {
    args[key].as_u64().and_then(|n| u32::try_from(n).ok())
}

impl McpServer {
    fn new(session: ArenaSession) -> Self {
        Self { session }
    }

    fn handle_request(&mut self, method: &str, params: &Value) -> Result<Value, Value> {
        match method {
            "initialize" => Ok(json!({
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": "fighter-arena",
                    "version": env!("CARGO_PKG_VERSION")
                }
            })),
            "tools/list" => Ok(json!({
                "tools": [
                    {
                        "name": "list_fighters",
                        "description": "List every fighter in the roster with class-adjusted stats",
                        "inputSchema": {
                            "type": "object",
                            "properties": {}
                        }
                    },
                    {
                        "name": "simulate_battle",
                        "description": "Run one battle between two fighters and narrate every move",
                        "inputSchema": {
                            "type": "object",
                            "properties": {
                                "first": {"type": "string", "description": "Fighter who acts first on ties"},
                                "second": {"type": "string", "description": "Opposing fighter"}
                            },
                            "required": ["first", "second"]
                        }
                    },
                    {
                        "name": "run_series",
                        "description": "Run repeated battles between two fighters and tally the wins",
                        "inputSchema": {
                            "type": "object",
                            "properties": {
                                "first": {"type": "string"},
                                "second": {"type": "string"},
                                "count": {"type": "number", "description": "Number of battles"}
                            },
                            "required": ["first", "second"]
                        }
                    },
                    {
                        "name": "run_bracket",
                        "description": "Run a single-elimination bracket in the given order",
                        "inputSchema": {
                            "type": "object",
                            "properties": {
                                "fighters": {"type": "array", "items": {"type": "string"}},
                                "fights_per_match": {"type": "number"}
                            },
                            "required": ["fighters"]
                        }
                    },
                    {
                        "name": "balance_report",
                        "description": "Participation, win/loss table and balance verdicts from recorded battles",
                        "inputSchema": {
                            "type": "object",
                            "properties": {}
                        }
                    }
                ]
            })),
            "tools/call" => {
                let tool_name = params["name"].as_str().unwrap_or("");
                let args = &params["arguments"];
                Ok(self.handle_tool_call(tool_name, args))
            }
            _ => Err(json!({
                "code": -32601,
                "message": "Method not found"
            })),
        }
    }

    fn handle_tool_call(&mut self, tool_name: &str, args: &Value) -> Value {
        let result: BattleResult<String> = match tool_name {
            "list_fighters" => Ok(self.session.list_fighters_display()),
            "simulate_battle" => self
                .session
                .simulate_battle_display(string_arg(args, "first"), string_arg(args, "second")),
            "run_series" => self.session.run_series_display(
                string_arg(args, "first"),
                string_arg(args, "second"),
                count_arg(args, "count"),
            ),
            "run_bracket" => {
                let names: Vec<&str> = args["fighters"]
                    .as_array()
                    .map(|items| items.iter().filter_map(Value::as_str).collect())
                    .unwrap_or_default();
                self.session
                    .run_bracket_display(&names, count_arg(args, "fights_per_match"))
            }
            "balance_report" => self.session.stats_display(),
            _ => return text_content(format!("Unknown tool: {}", tool_name)),
        };

        match result {
            Ok(text) => text_content(text),
            Err(e) => {
                tracing::warn!(tool = tool_name, error = %e, "tool call failed");
                text_content(format!("Error: {}", e))
            }
        }
    }

    fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        let reader = BufReader::new(stdin.lock());

        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            // Parse the JSON-RPC request
            let request: Value = match serde_json::from_str(&line) {
                Ok(req) => req,
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring malformed request");
                    continue;
                }
            };

            let id = request["id"].clone();
            let method = request["method"].as_str().unwrap_or("");
            let params = &request["params"];
            tracing::debug!(method, "request");

            let outcome = self.handle_request(method, params);
            let Some(response) = jsonrpc_response(&id, outcome) else {
                tracing::debug!(method, "notification, no reply");
                continue;
            };

            writeln!(stdout, "{}", response)?;
            stdout.flush()?;
        }

        Ok(())
    }
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fighter_arena=info")),
        )
        .with_writer(io::stderr)
        .init();

    let config = match ArenaConfig::load(Path::new(DEFAULT_CONFIG_PATH)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "falling back to default config");
            ArenaConfig::default()
        }
    };
    let session = ArenaSession::open(config, true)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    let mut server = McpServer::new(session);
    server.run()
}
