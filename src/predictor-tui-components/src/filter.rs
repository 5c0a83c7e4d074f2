//! Case-insensitive substring filtering for option lists.
//!
//! No fuzzy matching and no ranking: the input order is kept.

/// Indices of the options containing `query`, ignoring case.
///
/// An empty query matches everything.
pub fn matching_indices<S: AsRef<str>>(options: &[S], query: &str) -> Vec<usize> {
    if query.is_empty() {
        return (0..options.len()).collect();
    }
    let needle = query.to_lowercase();
    options
        .iter()
        .enumerate()
        .filter(|(_, opt)| opt.as_ref().to_lowercase().contains(&needle))
        .map(|(i, _)| i)
        .collect()
}

/// The options containing `query`, ignoring case.
pub fn filter_options<'a, S: AsRef<str>>(options: &'a [S], query: &str) -> Vec<&'a str> {
    matching_indices(options, query)
        .into_iter()
        .map(|i| options[i].as_ref())
        .collect()
}
