//! Keyword tokenizer shared by index construction and query parsing.
//!
//! Both sides of a lookup must go through [`tokenize`]; any divergence means
//! indexed keywords can no longer be found.

use crate::memory::types::Entity;

/// Tokens shorter than this (in characters) are discarded.
pub const MIN_TOKEN_LEN: usize = 3;

/// Lower-case `text`, split on non-alphanumeric boundaries, and drop tokens
/// shorter than [`MIN_TOKEN_LEN`]. Duplicates are kept, in text order.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= MIN_TOKEN_LEN)
        .map(str::to_string)
        .collect()
}

/// [`tokenize`], keeping only the first occurrence of each token.
pub fn distinct_tokens(text: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    tokenize(text)
        .into_iter()
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

/// The indexed text of an entity: name, description, then every observation.
pub fn entity_text(entity: &Entity) -> String {
    let mut text = String::with_capacity(
        entity.name.len()
            + entity.description.as_ref().map_or(0, String::len)
            + entity.observations.iter().map(|o| o.len() + 1).sum::<usize>()
            + 2,
    );
    text.push_str(&entity.name);
    if let Some(ref description) = entity.description {
        text.push(' ');
        text.push_str(description);
    }
    for observation in &entity.observations {
        text.push(' ');
        text.push_str(observation);
    }
    text
}
