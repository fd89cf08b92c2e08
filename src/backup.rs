//! Backup orchestration: one extraction pipeline per tab, run concurrently
//! against a shared connection pool.

use anyhow::{Context, Result};
use chrono::Utc;
use futures::future::join_all;
use sqlx::SqlitePool;
use tracing::{error, info};
use uuid::Uuid;

use crate::config::{Config, CopyqConfig};
use crate::copyq;
use crate::db;
use crate::record::RecordAssembler;
use crate::script;
use crate::store;

/// Archive the given tabs into the database, or every tab the clipboard
/// manager knows about when `tabs` is empty.
///
/// Each tab gets its own task; a failing tab does not stop the others.
/// Every pipeline runs to completion and the first failure is returned
/// afterwards, with the rest logged.
pub async fn run_backup(config: &Config, tabs: Vec<String>) -> Result<()> {
    let tabs = if tabs.is_empty() {
        copyq::list_tabs(&config.copyq).await?
    } else {
        tabs
    };

    let pool = db::open(&config.db.path).await?;

    // One random sentinel per run, shared by every tab pipeline.
    let sentinel = Uuid::new_v4().to_string();

    let handles: Vec<_> = tabs
        .into_iter()
        .map(|tab| {
            let copyq = config.copyq.clone();
            let pool = pool.clone();
            let sentinel = sentinel.clone();
            tokio::spawn(async move { backup_tab(&copyq, &pool, &tab, &sentinel).await })
        })
        .collect();

    let mut first_err: Option<anyhow::Error> = None;
    for joined in join_all(handles).await {
        let outcome = joined.context("tab pipeline panicked").and_then(|r| r);
        if let Err(err) = outcome {
            if first_err.is_none() {
                first_err = Some(err);
            } else {
                error!("{:#}", err);
            }
        }
    }

    pool.close().await;

    match first_err {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Drain one tab through the extraction script into the store.
async fn backup_tab(
    copyq: &CopyqConfig,
    pool: &SqlitePool,
    tab: &str,
    sentinel: &str,
) -> Result<()> {
    let code = script::extraction_script(tab, sentinel);
    let mut process = copyq::run_extraction(copyq, &code)
        .await
        .with_context(|| format!("extraction failed for tab '{}'", tab))?;

    let seen_at = epoch_seconds();
    let mut assembler = RecordAssembler::new(sentinel);
    let mut saved = 0u64;

    while let Some(line) = process.next_line().await? {
        if let Some(content) = assembler.push_line(&line) {
            store::upsert(pool, &content, tab, seen_at).await?;
            saved += 1;
        }
    }
    if let Some(content) = assembler.finish() {
        store::upsert(pool, &content, tab, seen_at).await?;
        saved += 1;
    }

    process
        .finish()
        .await
        .with_context(|| format!("extraction failed for tab '{}'", tab))?;

    info!("Saved {} items in {}.", saved, tab);
    Ok(())
}

/// Current wall-clock time as fractional seconds since the Unix epoch.
fn epoch_seconds() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_seconds_is_in_a_sane_range() {
        let now = epoch_seconds();
        // Well past 2020-01-01 and comfortably before 2100.
        assert!(now > 1_577_836_800.0);
        assert!(now < 4_102_444_800.0);
    }

    #[test]
    fn test_epoch_seconds_does_not_go_backwards() {
        let a = epoch_seconds();
        let b = epoch_seconds();
        assert!(b >= a);
    }
}
