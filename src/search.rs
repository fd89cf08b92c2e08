use anyhow::Result;
use tracing::{info, warn};

use crate::backup;
use crate::config::Config;
use crate::db;
use crate::store;

/// Header timestamp layout, e.g. `August 23, 2026 @ 07:15:02 PM`.
const TIME_FORMAT: &str = "%B %d, %Y @ %I:%M:%S %p";

/// Print every archived item whose content contains `query`, newest first.
///
/// A missing database triggers a full backup before the query runs.
pub async fn run_search(config: &Config, query: &str, tab: Option<&str>) -> Result<()> {
    if !config.db.path.exists() {
        warn!("Must load clipboards into database file first, might take some time.");
        backup::run_backup(config, Vec::new()).await?;
    }

    let pool = db::open(&config.db.path).await?;
    let hits = store::search(&pool, query, tab).await?;

    for (rank, hit) in hits.iter().enumerate() {
        println!(
            "----- Item {} from {} on {} -----",
            rank + 1,
            hit.tab,
            format_timestamp(hit.last_seen)
        );
        println!("{}", hit.content);
        println!();
    }

    let total = store::total_records(&pool).await?;
    info!("Found {} items out of {} total items.", hits.len(), total);

    pool.close().await;
    Ok(())
}

/// Render a fractional epoch timestamp in the local timezone; values
/// chrono cannot represent fall back to the raw number.
fn format_timestamp(ts: f64) -> String {
    let secs = ts.trunc() as i64;
    let nanos = (ts.fract() * 1e9) as u32;
    match chrono::DateTime::from_timestamp(secs, nanos) {
        Some(utc) => utc
            .with_timezone(&chrono::Local)
            .format(TIME_FORMAT)
            .to_string(),
        None => ts.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_uses_twelve_hour_clock() {
        let rendered = format_timestamp(1_700_000_000.5);
        assert!(rendered.contains('@'));
        assert!(rendered.ends_with("AM") || rendered.ends_with("PM"));
    }

    #[test]
    fn test_timestamp_spells_out_the_month() {
        let rendered = format_timestamp(1_700_000_000.0);
        let months = [
            "January", "February", "March", "April", "May", "June", "July", "August",
            "September", "October", "November", "December",
        ];
        assert!(months.iter().any(|m| rendered.starts_with(m)));
    }

    #[test]
    fn test_unrepresentable_timestamp_falls_back_to_raw_value() {
        let rendered = format_timestamp(9.0e18);
        assert_eq!(rendered, 9.0e18f64.to_string());
    }
}
