//! Name filter views over list snapshots.
//!
//! Lists are never filtered in place. A filter reads an immutable snapshot
//! and returns a freshly built `Vec`, so the full list stays available for
//! the next query.

use olympics_domain::named::Named;

/// Records whose name contains `query`, ignoring case.
///
/// An empty (or whitespace-only) query returns the whole snapshot.
#[must_use]
pub fn by_name<T: Named + Clone>(snapshot: &[T], query: &str) -> Vec<T> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return snapshot.to_vec();
    }
    snapshot
        .iter()
        .filter(|item| item.name().to_lowercase().contains(&query))
        .cloned()
        .collect()
}
