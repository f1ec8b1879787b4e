//! MCP `search_memory` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the `search_memory` MCP tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SearchMemoryParams {
    /// Free-text query. Words shorter than 3 characters are ignored.
    #[schemars(description = "Free-text keyword query. Words shorter than 3 characters are ignored.")]
    pub query: String,

    /// Restrict results to one entity type (e.g. `"issue"`, `"solution"`).
    #[schemars(description = "Only return entities of this type (e.g. 'issue', 'solution')")]
    pub r#type: Option<String>,

    /// Maximum number of results to return (1–50). Defaults to the configured value.
    #[schemars(description = "Maximum number of results to return (1-50). Defaults to 10.")]
    pub max_results: Option<usize>,
}
