//! Substring filter over the directory snapshot.

use crate::descriptor::AppDescriptor;

/// Trim and lower-case a raw query before matching.
pub fn normalize(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Positions in `all` whose descriptor matches `query`, in snapshot order.
///
/// An empty (or whitespace-only) query yields nothing.
pub fn matching_indices(query: &str, all: &[AppDescriptor]) -> Vec<usize> {
    let needle = normalize(query);
    if needle.is_empty() {
        return Vec::new();
    }

    all.iter()
        .enumerate()
        .filter(|(_, app)| app.matches(&needle))
        .map(|(idx, _)| idx)
        .collect()
}

/// Descriptors in `all` matching `query`, in snapshot order, duplicates kept.
pub fn filter<'a>(query: &str, all: &'a [AppDescriptor]) -> Vec<&'a AppDescriptor> {
    matching_indices(query, all)
        .into_iter()
        .map(|idx| &all[idx])
        .collect()
}
