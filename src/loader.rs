//! Turns a source (built-in catalog, local file or URL) into a cohort.
//!
//! Two layouts are accepted:
//! - JSON: an array of `{ "name": ..., "data": [{ "name", "value", "description"? }] }`
//! - CSV: one row per city with a `name` column; every other column becomes
//!   an indicator in header order (`lat`, `lng` and `score` included).

use crate::catalog::builtin_cohort;
use crate::fetch::{BasicClient, fetch_bytes};
use crate::model::{CitySummaryRecord, Cohort, IndicatorValue};
use anyhow::{Context, Result, bail};
use tracing::{debug, info};

/// Source name that selects the embedded catalog.
pub const BUILTIN_SOURCE: &str = "builtin";

/// Loads a cohort from `source`.
#[tracing::instrument]
pub async fn load_cohort(source: &str) -> Result<Cohort> {
    let cohort = if source == BUILTIN_SOURCE {
        builtin_cohort()?
    } else {
        let bytes = if source.starts_with("http://") || source.starts_with("https://") {
            let client = BasicClient::new()?;
            fetch_bytes(&client, source).await?
        } else {
            tokio::fs::read(source)
                .await
                .with_context(|| format!("failed to read '{source}'"))?
        };
        parse_cohort(&bytes)?
    };

    info!(cities = cohort.len(), "Cohort loaded");
    Ok(cohort)
}

/// Picks JSON or CSV by the first non-blank byte.
pub fn parse_cohort(bytes: &[u8]) -> Result<Cohort> {
    match bytes.iter().find(|b| !b.is_ascii_whitespace()) {
        Some(b'[') => parse_json(bytes),
        Some(_) => parse_csv(bytes),
        None => Ok(Vec::new()),
    }
}

pub fn parse_json(bytes: &[u8]) -> Result<Cohort> {
    serde_json::from_slice(bytes).context("cohort JSON is malformed")
}

pub fn parse_csv(bytes: &[u8]) -> Result<Cohort> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(bytes);

    let headers = rdr.headers()?.clone();
    let Some(name_col) = headers.iter().position(|h| h == "name") else {
        bail!("cohort CSV has no 'name' column");
    };
    debug!(columns = headers.len(), "Parsing cohort CSV");

    let mut cohort = Vec::new();
    for (line, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("bad CSV row {}", line + 1))?;

        let data = headers
            .iter()
            .zip(record.iter())
            .enumerate()
            .filter(|(i, _)| *i != name_col)
            .map(|(_, (h, v))| IndicatorValue::new(h, v))
            .collect();

        cohort.push(CitySummaryRecord::new(&record[name_col], data));
    }

    Ok(cohort)
}
