use std::path::Path;

use anyhow::Context;
use tracing::{debug, info};

use crate::models::VisitRecord;

/// Rows with fewer populated columns than this are trailing blanks or
/// partially filled form rows; they are dropped before aggregation, never
/// counted and never an error.
const MIN_COLUMNS: usize = 6;

/// Parse a visit-log CSV export into records. The header row is skipped and
/// short rows are discarded. The export is assumed to be a simple
/// comma-separated sheet with no embedded delimiters in fields; the
/// `recommendations` column may be absent and defaults to empty.
pub fn parse_rows(data: &[u8]) -> anyhow::Result<Vec<VisitRecord>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(data);
    let mut records = Vec::new();

    for result in reader.records() {
        let row = result.context("failed to read visit row")?;
        if row.len() < MIN_COLUMNS {
            debug!("dropping row with {} columns", row.len());
            continue;
        }

        let col = |idx: usize| row.get(idx).unwrap_or("").to_string();
        records.push(VisitRecord {
            timestamp: col(0),
            email: col(1),
            location: col(2),
            coachee: col(3),
            progress: col(4),
            strengths: col(5),
            improvements: col(6),
            recommendations: col(7),
        });
    }

    Ok(records)
}

pub fn load_csv(path: &Path) -> anyhow::Result<Vec<VisitRecord>> {
    let data = std::fs::read(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let records = parse_rows(&data)?;
    info!("loaded {} visit records from {}", records.len(), path.display());
    Ok(records)
}

/// Fetch the sheet export over HTTP. The caller substitutes the fallback
/// sample data on failure; partial data never reaches the engine.
pub async fn fetch_csv(url: &str) -> anyhow::Result<Vec<VisitRecord>> {
    let response = reqwest::get(url)
        .await
        .with_context(|| format!("failed to fetch {url}"))?
        .error_for_status()
        .context("sheet export returned an error status")?;
    let body = response
        .bytes()
        .await
        .context("failed to read sheet export body")?;

    let records = parse_rows(&body)?;
    info!("fetched {} visit records from {url}", records.len());
    Ok(records)
}
