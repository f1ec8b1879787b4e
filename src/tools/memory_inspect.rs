use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct MemoryInspectParams {
    #[schemars(description = "ID of the entity to inspect")]
    pub id: String,

    #[schemars(description = "If true, include entities that point at this one (default: true)")]
    pub include_incoming: Option<bool>,
}
