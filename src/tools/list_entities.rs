use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ListEntitiesParams {
    #[schemars(
        description = "Entity type to list. Omit to get every type with its entity count."
    )]
    pub r#type: Option<String>,
}
