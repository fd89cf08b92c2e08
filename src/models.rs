//! Core data types for the clipboard archive.

/// One archived clipboard item as persisted in the `items` table.
///
/// At most one row exists per distinct `(content, tab)` pair. `id` is a
/// surrogate assigned by the store and carries no meaning beyond identity;
/// dedup logic keys on `(content, tab)` only. Timestamps are fractional
/// seconds since the epoch, with `first_seen <= last_seen` always.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipboardRecord {
    pub id: i64,
    pub tab: String,
    pub content: String,
    pub first_seen: f64,
    pub last_seen: f64,
}

/// A search match, most-recently-seen first.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub tab: String,
    pub content: String,
    pub last_seen: f64,
}
