use anyhow::Result;
use sqlx::SqlitePool;

/// Create the archive schema if it is not already present.
///
/// One row per distinct `(content, tab)` pair; `first` and `last` are
/// fractional epoch seconds. Runs on every open, so every statement must
/// stay idempotent. The batch executes on a single acquired connection:
/// a pool connection opened between these statements would cache the table
/// without `content_tab_idx` and fail to prepare the store's
/// conflict-target upsert.
pub async fn ensure(pool: &SqlitePool) -> Result<()> {
    let mut conn = pool.acquire().await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            tab TEXT DEFAULT 'default',
            content TEXT,
            first REAL,
            last REAL
        )
        "#,
    )
    .execute(&mut *conn)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS tab_idx ON items(tab)")
        .execute(&mut *conn)
        .await?;

    // Backs the single-statement upsert in the store.
    sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS content_tab_idx ON items(content, tab)")
        .execute(&mut *conn)
        .await?;

    Ok(())
}
