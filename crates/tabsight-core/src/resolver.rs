//! Fuzzy column-name resolution.
//!
//! Layers run from strict to loose and the first one with a hit wins:
//!
//! 1. exact match after normalization
//! 2. substring containment in either direction
//! 3. any search word contained in a column name
//!
//! Column order breaks ties inside every layer.

use tracing::trace;

/// Lowercase and drop whitespace and underscores
fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Find the candidate column that best matches `search`.
///
/// Returns `None` for an empty candidate list. An empty search text is
/// contained in every name, so it yields the first candidate.
pub fn resolve_column<'a, S: AsRef<str>>(
    search: &str,
    candidates: &'a [S],
) -> Option<&'a str> {
    if candidates.is_empty() {
        return None;
    }
    let needle = normalize(search);
    let normalized: Vec<(&'a str, String)> = candidates
        .iter()
        .map(|c| {
            let name: &'a str = c.as_ref();
            (name, normalize(name))
        })
        .collect();

    if let Some((name, _)) = normalized.iter().find(|(_, col)| *col == needle) {
        trace!(search, column = *name, "exact column match");
        return Some(*name);
    }

    if let Some((name, _)) = normalized
        .iter()
        .find(|(_, col)| needle.contains(col.as_str()) || col.contains(&needle))
    {
        trace!(search, column = *name, "substring column match");
        return Some(*name);
    }

    let lowered = search.to_lowercase();
    for word in lowered.split_whitespace() {
        if let Some(name) = normalized
            .iter()
            .map(|(name, _)| *name)
            .find(|name| name.to_lowercase().contains(word))
        {
            trace!(search, column = name, word, "token column match");
            return Some(name);
        }
    }

    None
}
