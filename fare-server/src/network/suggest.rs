//! Section name suggestions for search-as-you-type inputs.

/// Suggest section names for a partial query.
///
/// A blank query returns `defaults`. Otherwise names are matched ignoring
/// case and returned in three groups: exact matches, then names starting
/// with the query, then names containing it. `names` should be sorted; each
/// group keeps that order. At most `limit` names are returned.
pub fn suggest<'a>(
    names: &'a [String],
    defaults: &'a [String],
    query: &str,
    limit: usize,
) -> Vec<&'a str> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return defaults.iter().take(limit).map(String::as_str).collect();
    }

    let mut exact = Vec::new();
    let mut prefix = Vec::new();
    let mut contains = Vec::new();

    for name in names {
        let lower = name.to_lowercase();
        if lower == query {
            exact.push(name.as_str());
        } else if lower.starts_with(&query) {
            prefix.push(name.as_str());
        } else if lower.contains(&query) {
            contains.push(name.as_str());
        }
    }

    exact
        .into_iter()
        .chain(prefix)
        .chain(contains)
        .take(limit)
        .collect()
}

/// Names containing `query`, ignoring case, in their given order.
///
/// A blank query matches every name.
pub fn filter_containing<'a>(names: &'a [String], query: &str, limit: usize) -> Vec<&'a str> {
    let query = query.trim().to_lowercase();
    names
        .iter()
        .filter(|name| name.to_lowercase().contains(&query))
        .take(limit)
        .map(String::as_str)
        .collect()
}
