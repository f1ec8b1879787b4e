//! MCP `find_related` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the `find_related` MCP tool.
///
/// Walks relations breadth-first from one entity; cycles are visited once.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct FindRelatedParams {
    /// ID of the entity to start from.
    #[schemars(description = "ID of the entity to start from")]
    pub entity_id: String,

    /// Maximum number of hops. Defaults to 2.
    #[schemars(description = "Maximum number of relation hops to follow. Defaults to 2.")]
    pub max_depth: Option<usize>,
}
