// ABOUTME: WHOOP tool set exposing daily fitness analyses over MCP
// ABOUTME: Overview, sleep, recovery, strain, and healthspan tools keyed on a YYYY-MM-DD date
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 whoop-ynab-mcp contributors

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::constants::tools;
use crate::errors::{AppError, AppResult};
use crate::mcp::schema::ToolSchema;
use crate::mcp::ToolSet;
use crate::providers::whoop::WhoopClient;

mod healthspan;
mod overview;
mod recovery;
mod sleep;
mod strain;

/// The five WHOOP tools behind the `whoop-mcp` binary
pub struct WhoopToolSet {
    client: WhoopClient,
}

impl WhoopToolSet {
    /// Wrap a client for serving
    #[must_use]
    pub fn new(client: WhoopClient) -> Self {
        Self { client }
    }
}

/// Input schema shared by all WHOOP tools: one optional date
fn date_input_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "date": {
                "type": "string",
                "description": "Date in YYYY-MM-DD format (optional, defaults to today)",
                "pattern": "^\\d{4}-\\d{2}-\\d{2}$",
            },
        },
    })
}

#[async_trait]
impl ToolSet for WhoopToolSet {
    fn server_name(&self) -> &str {
        "whoop-mcp"
    }

    fn tools(&self) -> Vec<ToolSchema> {
        vec![
            ToolSchema {
                name: tools::WHOOP_GET_OVERVIEW.to_owned(),
                description: "Get comprehensive WHOOP overview data for a specific date including recovery, strain, sleep, activities, and key statistics".to_owned(),
                input_schema: date_input_schema(),
            },
            ToolSchema {
                name: tools::WHOOP_GET_SLEEP.to_owned(),
                description: "Get detailed sleep analysis including performance, duration, efficiency, stages, and sleep needed".to_owned(),
                input_schema: date_input_schema(),
            },
            ToolSchema {
                name: tools::WHOOP_GET_RECOVERY.to_owned(),
                description: "Get comprehensive recovery analysis including score, HRV, RHR, respiratory rate, and trends vs 30-day baseline".to_owned(),
                input_schema: date_input_schema(),
            },
            ToolSchema {
                name: tools::WHOOP_GET_STRAIN.to_owned(),
                description: "Get comprehensive strain analysis including score, heart rate zones, activities, and trends vs 30-day baseline".to_owned(),
                input_schema: date_input_schema(),
            },
            ToolSchema {
                name: tools::WHOOP_GET_HEALTHSPAN.to_owned(),
                description: "Get healthspan/biological age data (Note: May not be available in current WHOOP API version)".to_owned(),
                input_schema: date_input_schema(),
            },
        ]
    }

    async fn call_tool(&self, name: &str, args: &Value) -> AppResult<String> {
        let date = super::parse_date_arg(args, "date")?;
        match name {
            tools::WHOOP_GET_OVERVIEW => overview::run(&self.client, date).await,
            tools::WHOOP_GET_SLEEP => sleep::run(&self.client, date).await,
            tools::WHOOP_GET_RECOVERY => recovery::run(&self.client, date).await,
            tools::WHOOP_GET_STRAIN => strain::run(&self.client, date).await,
            tools::WHOOP_GET_HEALTHSPAN => Ok(healthspan::run(date)),
            other => Err(AppError::UnknownTool(other.to_owned())),
        }
    }
}

/// Milliseconds to whole minutes
fn milli_to_minutes(milli: i64) -> i64 {
    let minutes = milli as f64 / 60_000.0;
    minutes.round() as i64
}

/// Round to two decimal places
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to one decimal place
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Percentage difference of `value` against `baseline`, rounded to whole
/// percent. Zero baseline yields zero rather than a NaN in the output.
fn percent_difference(value: f64, baseline: f64) -> i64 {
    if baseline == 0.0 {
        return 0;
    }
    (((value - baseline) / baseline) * 100.0).round() as i64
}
