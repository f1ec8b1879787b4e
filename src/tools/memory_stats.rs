//! MCP `memory_stats` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the `memory_stats` MCP tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct MemoryStatsParams {
    /// Include the per-type breakdown (default: true).
    #[schemars(description = "Include entity counts per type (default: true)")]
    pub include_types: Option<bool>,
}
