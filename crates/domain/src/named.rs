//! Records that carry a human-readable name.

/// A record listed and searched by its display name.
pub trait Named {
    fn name(&self) -> &str;
}
