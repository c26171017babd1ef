// ABOUTME: Configuration module for environment-driven server settings
// ABOUTME: Re-exports the environment loaders used by both binaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 whoop-ynab-mcp contributors

/// Environment-variable loading with fail-fast validation
pub mod environment;

pub use environment::{WhoopEnvConfig, YnabEnvConfig};
