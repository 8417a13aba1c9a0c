//! Report persistence
//!
//! Writes each brand's `ValidationReport` next to its evidence screenshots:
//! `slug-report-<brand>-<timestamp>.txt` for people and a sibling `.json`
//! for tooling.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::info;

use crate::audit::ValidationReport;
use crate::error::AuditResult;

/// Paths of the files written for one report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedReport {
    pub text_path: PathBuf,
    pub json_path: PathBuf,
}

/// Filesystem-safe UTC timestamp, e.g. `2025-01-31T09-15-02.123Z`
#[must_use]
pub fn file_timestamp(time: DateTime<Utc>) -> String {
    time.format("%Y-%m-%dT%H-%M-%S%.3fZ").to_string()
}

/// Base name (without extension) for the report of `brand_slug` started at `time`.
#[must_use]
pub fn report_stem(brand_slug: &str, time: DateTime<Utc>) -> String {
    format!(
        "slug-report-{}-{}",
        sanitize_filename::sanitize(brand_slug),
        file_timestamp(time)
    )
}

/// Write `report` as text and JSON under `dir`, creating it if needed.
pub async fn save_report(report: &ValidationReport, dir: &Path) -> AuditResult<SavedReport> {
    tokio::fs::create_dir_all(dir).await?;

    let stem = report_stem(report.brand_slug(), report.started_at());
    let text_path = dir.join(format!("{stem}.txt"));
    let json_path = dir.join(format!("{stem}.json"));

    tokio::fs::write(&text_path, report.render_text()).await?;
    tokio::fs::write(&json_path, serde_json::to_vec_pretty(report)?).await?;

    info!("Report saved to {}", text_path.display());
    Ok(SavedReport { text_path, json_path })
}
