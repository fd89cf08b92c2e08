//! Dedup upsert store operations over the `items` table.
//!
//! The archive is append-mostly: a `(content, tab)` pair is inserted once
//! and only its `last` timestamp moves afterwards. The upsert is a single
//! conditional statement backed by the unique `(content, tab)` index;
//! concurrent pipelines (or concurrent runs) racing on the same pair
//! cannot create duplicate rows.

use anyhow::Result;
use sqlx::{Row, SqlitePool};

use crate::models::{ClipboardRecord, SearchHit};

/// Record one observation of `content` under `tab` at `seen_at`.
///
/// First observation inserts the row with `first = last = seen_at`; any
/// later observation only refreshes `last`. `tab` and `first` are immutable
/// once written.
pub async fn upsert(pool: &SqlitePool, content: &str, tab: &str, seen_at: f64) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO items (tab, content, first, last)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(content, tab) DO UPDATE SET last = excluded.last
        "#,
    )
    .bind(tab)
    .bind(content)
    .bind(seen_at)
    .bind(seen_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Fetch the row for an exact `(content, tab)` pair, if any.
pub async fn lookup(
    pool: &SqlitePool,
    content: &str,
    tab: &str,
) -> Result<Option<ClipboardRecord>> {
    let row = sqlx::query("SELECT id, tab, content, first, last FROM items WHERE content = ? AND tab = ?")
        .bind(content)
        .bind(tab)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| ClipboardRecord {
        id: row.get("id"),
        tab: row.get("tab"),
        content: row.get("content"),
        first_seen: row.get("first"),
        last_seen: row.get("last"),
    }))
}

/// Rows whose content contains `query` as a substring, newest `last` first.
///
/// Matching uses SQLite's `LIKE`, so it is case-insensitive for ASCII and
/// treats `%`/`_` in the query with their native wildcard meaning. Ties on
/// `last` come back in whatever order the engine picks.
pub async fn search(
    pool: &SqlitePool,
    query: &str,
    tab: Option<&str>,
) -> Result<Vec<SearchHit>> {
    let pattern = format!("%{}%", query);

    let rows = match tab {
        Some(tab) => {
            sqlx::query(
                "SELECT tab, content, last FROM items WHERE content LIKE ? AND tab = ? ORDER BY last DESC",
            )
            .bind(&pattern)
            .bind(tab)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query("SELECT tab, content, last FROM items WHERE content LIKE ? ORDER BY last DESC")
                .bind(&pattern)
                .fetch_all(pool)
                .await?
        }
    };

    Ok(rows
        .iter()
        .map(|row| SearchHit {
            tab: row.get("tab"),
            content: row.get("content"),
            last_seen: row.get("last"),
        })
        .collect())
}

/// Total number of archived rows. Each row is a distinct `(content, tab)`
/// pair by construction.
pub async fn total_records(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
        .fetch_one(pool)
        .await?;

    Ok(count)
}
