pub mod find_related;
pub mod list_entities;
pub mod memory_inspect;
pub mod memory_stats;
pub mod search_memory;
pub mod suggest_keywords;

use find_related::FindRelatedParams;
use list_entities::ListEntitiesParams;
use memory_inspect::MemoryInspectParams;
use memory_stats::MemoryStatsParams;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::{tool, tool_handler, tool_router, ServerHandler};
use search_memory::SearchMemoryParams;
use serde::Serialize;
use std::sync::Arc;
use suggest_keywords::SuggestKeywordsParams;

use crate::config::QuickmemConfig;
use crate::memory::search::SearchOptions;
use crate::memory::MemorySession;

const MAX_TOOL_RESULTS: usize = 50;

/// The quickmem MCP tool handler. Holds the loaded session (read-only, shared
/// without locking) and config, and exposes every lookup via `#[tool_router]`.
#[derive(Clone)]
pub struct MemoryTools {
    tool_router: ToolRouter<Self>,
    session: Arc<MemorySession>,
    config: Arc<QuickmemConfig>,
}

#[tool_router]
impl MemoryTools {
    pub fn new(session: Arc<MemorySession>, config: Arc<QuickmemConfig>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            session,
            config,
        }
    }

    /// Keyword relevance search over the memory snapshot.
    #[tool(description = "Search memory entities by keywords. Scores are the fraction of query words each entity contains (0-1). Optionally filter by entity type.")]
    async fn search_memory(
        &self,
        Parameters(params): Parameters<SearchMemoryParams>,
    ) -> Result<String, String> {
        let max_results = params
            .max_results
            .unwrap_or(self.config.retrieval.default_max_results)
            .clamp(1, MAX_TOOL_RESULTS);

        tracing::info!(
            query = %params.query,
            entity_type = ?params.r#type,
            max_results,
            "search_memory called"
        );

        let options = SearchOptions {
            max_results,
            entity_type: params.r#type,
        };
        let response = self.session.engine().search(&params.query, &options);

        tracing::info!(
            total_matches = response.total_matches,
            returned = response.results.len(),
            "search_memory done"
        );
        to_json(&response)
    }

    /// Breadth-first relation traversal from one entity.
    #[tool(description = "Find entities related to a given entity by following relations breadth-first, up to max_depth hops. Each result includes its depth and the path taken.")]
    async fn find_related(
        &self,
        Parameters(params): Parameters<FindRelatedParams>,
    ) -> Result<String, String> {
        let max_depth = params
            .max_depth
            .unwrap_or(self.config.retrieval.default_depth);

        tracing::info!(entity_id = %params.entity_id, max_depth, "find_related called");

        let traverser = self.session.traverser();
        let (related, hint) = match traverser.try_find_related(&params.entity_id, max_depth) {
            Ok(related) if related.is_empty() => (
                related,
                Some("no relations within the depth limit; try a larger max_depth or memory_inspect".to_string()),
            ),
            Ok(related) => (related, None),
            Err(e) => (Vec::new(), Some(format!("{e}; use search_memory to find entity ids"))),
        };

        to_json(&serde_json::json!({
            "entity_id": params.entity_id,
            "max_depth": max_depth,
            "related": related,
            "hint": hint,
        }))
    }

    /// List entities of one type, or all types with counts.
    #[tool(description = "List all entities of a type. Without a type, list every entity type with its count.")]
    async fn list_entities(
        &self,
        Parameters(params): Parameters<ListEntitiesParams>,
    ) -> Result<String, String> {
        tracing::info!(entity_type = ?params.r#type, "list_entities called");

        let engine = self.session.engine();
        match params.r#type {
            Some(entity_type) => {
                let entities = engine.entities_of_type(&entity_type);
                let hint = entities
                    .is_empty()
                    .then_some("unknown type; call list_entities without a type to see all types");
                to_json(&serde_json::json!({
                    "type": entity_type,
                    "entities": entities,
                    "hint": hint,
                }))
            }
            None => {
                let types: Vec<serde_json::Value> = engine
                    .type_counts()
                    .into_iter()
                    .map(|(t, count)| serde_json::json!({"type": t, "count": count}))
                    .collect();
                to_json(&serde_json::json!({ "types": types }))
            }
        }
    }

    /// Prefix/substring keyword suggestions from the index.
    #[tool(description = "Suggest indexed keywords matching a partial word, with how many entities contain each. Useful when search_memory returns nothing.")]
    async fn suggest_keywords(
        &self,
        Parameters(params): Parameters<SuggestKeywordsParams>,
    ) -> Result<String, String> {
        let limit = params
            .limit
            .unwrap_or(self.config.retrieval.suggest_limit)
            .clamp(1, MAX_TOOL_RESULTS);

        tracing::info!(partial = %params.partial, limit, "suggest_keywords called");

        let suggestions = self.session.engine().suggest(&params.partial, limit);
        to_json(&serde_json::json!({ "suggestions": suggestions }))
    }

    /// Get statistics about the loaded snapshot and index.
    #[tool(description = "Get memory index statistics: entity, keyword, and relationship counts, types, build time.")]
    async fn memory_stats(
        &self,
        Parameters(params): Parameters<MemoryStatsParams>,
    ) -> Result<String, String> {
        tracing::info!("memory_stats called");

        let mut stats = self.session.stats();
        if !params.include_types.unwrap_or(true) {
            stats.by_type.clear();
        }
        to_json(&stats)
    }

    /// Inspect a specific entity by ID.
    #[tool(description = "Inspect an entity by ID. Returns all fields, outgoing relations, and optionally the entities that reference it.")]
    async fn memory_inspect(
        &self,
        Parameters(params): Parameters<MemoryInspectParams>,
    ) -> Result<String, String> {
        tracing::info!(id = %params.id, "memory_inspect called");

        match self.session.inspect(&params.id) {
            Some(mut response) => {
                if !params.include_incoming.unwrap_or(true) {
                    response.incoming.clear();
                }
                to_json(&response)
            }
            None => to_json(&serde_json::json!({
                "entity": null,
                "hint": format!("entity not found: {}; use search_memory to find entity ids", params.id),
            })),
        }
    }
}

#[tool_handler]
impl ServerHandler for MemoryTools {
    fn get_info(&self) -> rmcp::model::ServerInfo {
        rmcp::model::ServerInfo {
            instructions: Some(
                "quickmem is a read-only memory index. Use search_memory to find entities, \
                 find_related to follow relations, and suggest_keywords when a search is empty."
                    .into(),
            ),
            capabilities: rmcp::model::ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("serialization failed: {e}"))
}
