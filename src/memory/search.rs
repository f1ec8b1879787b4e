use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

use crate::memory::index::MemoryIndex;
use crate::memory::store::EntityStore;
use crate::memory::tokenizer::{distinct_tokens, MIN_TOKEN_LEN};
use crate::memory::types::Entity;

/// Default cap on returned results.
pub const DEFAULT_MAX_RESULTS: usize = 10;

const SUGGEST_HINT: &str = "try `quickmem suggest <partial>` to see indexed keywords";
const TYPES_HINT: &str = "try `quickmem types` to list entity types";

// ── Public types ──────────────────────────────────────────────────────────────

/// Search knobs.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub max_results: usize,
    /// Restrict candidates to a single entity type.
    pub entity_type: Option<String>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            entity_type: None,
        }
    }
}

/// Coarse label derived from a relevance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Relevance {
    High,
    Medium,
    Low,
}

impl Relevance {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.75 {
            Self::High
        } else if score >= 0.4 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl std::fmt::Display for Relevance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single ranked result.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit<'a> {
    pub entity: &'a Entity,
    /// Fraction of distinct query tokens found in the entity, in `[0.0, 1.0]`.
    pub score: f64,
    pub relevance: Relevance,
}

/// Response from [`QueryEngine::search`].
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse<'a> {
    pub results: Vec<SearchHit<'a>>,
    /// Candidate count before truncation.
    pub total_matches: usize,
    /// Distinct normalized tokens the query was reduced to.
    pub query_tokens: Vec<String>,
    /// What to try next when nothing was found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl SearchResponse<'_> {
    fn empty(query_tokens: Vec<String>, hint: String) -> Self {
        Self {
            results: Vec::new(),
            total_matches: 0,
            query_tokens,
            hint: Some(hint),
        }
    }
}

/// Query problems. Never fatal: [`QueryEngine::search`] turns them into an
/// empty response carrying [`QueryError::hint`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("empty query")]
    EmptyQuery,

    #[error("query {query:?} has no words of {MIN_TOKEN_LEN} or more characters")]
    NoSearchableTokens { query: String },

    #[error("no entities of type {entity_type:?}")]
    UnknownType { entity_type: String },
}

impl QueryError {
    pub fn hint(&self) -> String {
        match self {
            Self::EmptyQuery | Self::NoSearchableTokens { .. } => {
                format!("{self}; use longer words, or {SUGGEST_HINT}")
            }
            Self::UnknownType { .. } => format!("{self}; {TYPES_HINT}"),
        }
    }
}

/// An index keyword matching a partial input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordSuggestion {
    pub keyword: String,
    /// Number of entities containing the keyword.
    pub entity_count: usize,
}

/// Read-only query front end over a store and its index.
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'a> {
    store: &'a EntityStore,
    index: &'a MemoryIndex,
}

// ── Public API ────────────────────────────────────────────────────────────────

impl<'a> QueryEngine<'a> {
    pub fn new(store: &'a EntityStore, index: &'a MemoryIndex) -> Self {
        Self { store, index }
    }

    /// Term-overlap search: tokenize → candidate union → type filter → score → rank → truncate.
    ///
    /// Never fails; query problems come back as an empty response with a hint.
    pub fn search(&self, query: &str, options: &SearchOptions) -> SearchResponse<'a> {
        match self.try_search(query, options) {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(error = %e, "query recovered as empty result");
                SearchResponse::empty(distinct_tokens(query), e.hint())
            }
        }
    }

    /// Like [`search`](Self::search), but reports query problems as errors.
    pub fn try_search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<SearchResponse<'a>, QueryError> {
        if query.trim().is_empty() {
            return Err(QueryError::EmptyQuery);
        }
        let tokens = distinct_tokens(query);
        if tokens.is_empty() {
            return Err(QueryError::NoSearchableTokens {
                query: query.to_string(),
            });
        }

        let type_ids = match options.entity_type.as_deref() {
            Some(entity_type) => Some(self.index.of_type(entity_type).ok_or_else(|| {
                QueryError::UnknownType {
                    entity_type: entity_type.to_string(),
                }
            })?),
            None => None,
        };

        // 1. Candidate union, counting distinct query tokens per entity
        let mut overlap: HashMap<&str, usize> = HashMap::new();
        for token in &tokens {
            if let Some(ids) = self.index.lookup(token) {
                for id in ids {
                    *overlap.entry(id.as_str()).or_insert(0) += 1;
                }
            }
        }

        // 2. Type filter, then score
        let denominator = tokens.len() as f64;
        let mut scored: Vec<(usize, &'a Entity, f64)> = overlap
            .into_iter()
            .filter(|(id, _)| type_ids.map_or(true, |ids| ids.contains(*id)))
            .filter_map(|(id, hits)| {
                let position = self.store.position(id)?;
                let entity = self.store.get(id)?;
                Some((position, entity, hits as f64 / denominator))
            })
            .collect();

        // 3. Rank: score descending, insertion order for ties
        scored.sort_by(|a, b| {
            b.2.partial_cmp(&a.2)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });

        let total_matches = scored.len();
        let results: Vec<SearchHit<'a>> = scored
            .into_iter()
            .take(options.max_results)
            .map(|(_, entity, score)| SearchHit {
                entity,
                score,
                relevance: Relevance::from_score(score),
            })
            .collect();

        let hint = if total_matches == 0 {
            Some(match options.entity_type.as_deref() {
                Some(t) => format!("no {t} entities matched; drop the type filter, or {SUGGEST_HINT}"),
                None => format!("no entities matched; {SUGGEST_HINT}"),
            })
        } else {
            None
        };

        tracing::debug!(
            tokens = tokens.len(),
            total_matches,
            returned = results.len(),
            "search complete"
        );

        Ok(SearchResponse {
            results,
            total_matches,
            query_tokens: tokens,
            hint,
        })
    }

    /// All entities of a type, in insertion order. Empty if the type is unknown.
    pub fn entities_of_type(&self, entity_type: &str) -> Vec<&'a Entity> {
        let Some(ids) = self.index.of_type(entity_type) else {
            return Vec::new();
        };
        let mut entities: Vec<(usize, &'a Entity)> = ids
            .iter()
            .filter_map(|id| Some((self.store.position(id)?, self.store.get(id)?)))
            .collect();
        entities.sort_by_key(|(position, _)| *position);
        entities.into_iter().map(|(_, e)| e).collect()
    }

    /// Every type with its entity count, largest first, then by name.
    pub fn type_counts(&self) -> Vec<(&'a str, usize)> {
        let mut counts: Vec<(&'a str, usize)> = self
            .index
            .types()
            .iter()
            .map(|(t, ids)| (t.as_str(), ids.len()))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        counts
    }

    /// Index keywords starting with `partial`, then those merely containing it,
    /// each group sorted alphabetically. Case-insensitive; no fuzzy matching.
    pub fn suggest(&self, partial: &str, limit: usize) -> Vec<KeywordSuggestion> {
        let needle = partial.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut prefixed: Vec<(&String, usize)> = Vec::new();
        let mut contained: Vec<(&String, usize)> = Vec::new();
        for (keyword, ids) in self.index.inverted() {
            if keyword.starts_with(&needle) {
                prefixed.push((keyword, ids.len()));
            } else if keyword.contains(&needle) {
                contained.push((keyword, ids.len()));
            }
        }
        prefixed.sort();
        contained.sort();

        prefixed
            .into_iter()
            .chain(contained)
            .take(limit)
            .map(|(keyword, entity_count)| KeywordSuggestion {
                keyword: keyword.clone(),
                entity_count,
            })
            .collect()
    }
}

/// Cut `content` to at most `max_chars` characters, adding `...` when cut.
pub fn truncate_preview(content: &str, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &content[..end]),
        None => content.to_string(),
    }
}
