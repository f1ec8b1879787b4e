use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SuggestKeywordsParams {
    #[schemars(description = "Partial word; keywords starting with it come first, then keywords containing it")]
    pub partial: String,

    #[schemars(description = "Maximum number of keywords to return. Defaults to 10.")]
    pub limit: Option<usize>,
}
