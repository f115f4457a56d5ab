//! Name normalization and case-insensitive deduplication.

use std::collections::HashSet;

/// Collapses whitespace runs to a single space and trims.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Matching key: the normalized name, lowercased.
pub fn match_key(name: &str) -> String {
    normalize_name(name).to_lowercase()
}

/// Normalizes names and drops case-insensitive duplicates and empties.
///
/// The first spelling of each name wins; order of first appearance is kept.
pub fn unique_names<'a, I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    names
        .into_iter()
        .map(normalize_name)
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(name.to_lowercase()))
        .collect()
}
