//! Arith MCP Server
//!
//! MCP Server for protocol revision 2025-11-25 over line-delimited stdio.
//!
//! Tools:
//! - generate_terms: Explained terms of an arithmetic sequence
//! - closed_form: The general rule
//! - worked_example: Derivation ladder and check by hand
//! - frames: Growing prefixes with fixed bounds for animation
//! - help: Get documentation for functions
//! - list_functions: List available functions
//!
//! Logs go to stderr; stdout carries protocol messages only.

mod config;
mod protocol;
mod tools;

use config::ServerConfig;
use protocol::{McpRequest, McpResponse, Server, PROTOCOL_VERSION, SERVER_VERSION};
use serde::Serialize;
use std::env;
use std::io::{self, BufRead, Write};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_logging() {
    let filter = EnvFilter::new(env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).with_ansi(false))
        .init();
}

/// Write one message as a single line. Returns false once stdout is gone.
fn send<T: Serialize>(message: &T) -> bool {
    let json = match serde_json::to_string(message) {
        Ok(j) => j,
        Err(e) => {
            error!(error = %e, "failed to serialize response");
            return true;
        }
    };

    let mut stdout = io::stdout().lock();
    if let Err(e) = writeln!(stdout, "{}", json) {
        error!(error = %e, "error writing response");
        return false;
    }
    if let Err(e) = stdout.flush() {
        error!(error = %e, "error flushing stdout");
        return false;
    }
    true
}

fn main() {
    init_logging();

    let config = ServerConfig::from_env();
    info!(
        version = SERVER_VERSION,
        protocol = PROTOCOL_VERSION,
        max_terms = config.max_terms,
        "Arith MCP server started"
    );
    let server = Server::new(config);

    let stdin = io::stdin();
    let mut reader = io::BufReader::new(stdin.lock());

    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => {
                info!("client disconnected (EOF)");
                break;
            }
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                debug!(bytes = line.len(), "received");

                let request: McpRequest = match serde_json::from_str(line) {
                    Ok(r) => r,
                    Err(e) => {
                        warn!(error = %e, "error parsing request");
                        if !send(&McpResponse::parse_error(e)) {
                            break;
                        }
                        continue;
                    }
                };

                debug!(method = %request.method, "processing");
                let response = server.handle_request(&request);

                // Notifications (no id) should NOT receive a response
                if request.id.is_none() {
                    debug!(method = %request.method, "notification processed");
                    continue;
                }

                if let Some(err) = &response.error {
                    warn!(method = %request.method, code = err.code, message = %err.message, "request failed");
                }
                if !send(&response) {
                    break;
                }
            }
            Err(e) => {
                error!(error = %e, "error reading input");
                break;
            }
        }
    }

    info!("server shutting down");
}
