// ABOUTME: Structured logging setup for the stdio MCP servers
// ABOUTME: Routes all log output to stderr because stdout carries protocol frames
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 whoop-ynab-mcp contributors

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing from the `RUST_LOG` environment variable.
///
/// Defaults to `info` when unset. Output goes to stderr only: stdout is the
/// MCP transport and must carry nothing but JSON-RPC frames.
pub fn init_from_env() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .compact()
        .with_target(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
