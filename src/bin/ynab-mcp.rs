// ABOUTME: YNAB MCP server binary serving budgeting tools over stdio
// ABOUTME: Loads the personal access token and budget ID from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 whoop-ynab-mcp contributors

use anyhow::Context;
use tracing::info;

use whoop_ynab_mcp::config::YnabEnvConfig;
use whoop_ynab_mcp::logging;
use whoop_ynab_mcp::mcp::McpServer;
use whoop_ynab_mcp::providers::ynab::YnabClient;
use whoop_ynab_mcp::tools::YnabToolSet;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_from_env()?;

    let config = YnabEnvConfig::from_env().context("failed to load configuration")?;
    let client = YnabClient::new(config.access_token, config.budget_id);

    info!("starting YNAB MCP server on stdio");
    let server = McpServer::new(YnabToolSet::new(client));
    server.run_stdio().await?;
    Ok(())
}
