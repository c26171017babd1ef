// ABOUTME: WHOOP MCP server binary serving fitness tools over stdio
// ABOUTME: Loads OAuth credentials from the environment and fails fast when incomplete
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 whoop-ynab-mcp contributors

use anyhow::Context;
use tracing::info;

use whoop_ynab_mcp::config::WhoopEnvConfig;
use whoop_ynab_mcp::logging;
use whoop_ynab_mcp::mcp::McpServer;
use whoop_ynab_mcp::providers::whoop::WhoopClient;
use whoop_ynab_mcp::tools::WhoopToolSet;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_from_env()?;

    let config = WhoopEnvConfig::from_env().context("failed to load configuration")?;
    let client = WhoopClient::new(config.into_credentials());

    info!("starting WHOOP MCP server on stdio");
    let server = McpServer::new(WhoopToolSet::new(client));
    server.run_stdio().await?;
    Ok(())
}
