//! Ordered, append-only result records for one brand run

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::health::{HealthStatus, HealthVerdict};
use super::url_resolver::{ResolvedUrl, UrlSource};

/// One row's full outcome. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRecord {
    index: usize,
    url: Option<String>,
    source: UrlSource,
    status: HealthStatus,
    evidence_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
    timestamp: DateTime<Utc>,
}

impl ValidationRecord {
    #[must_use]
    pub fn new(index: usize, resolved: ResolvedUrl, verdict: HealthVerdict) -> Self {
        let detail = verdict.detail.or_else(|| {
            verdict
                .matched_signature
                .map(|signature| format!("matched \"{signature}\""))
        });
        Self {
            index,
            url: resolved.url,
            source: resolved.source,
            status: verdict.status,
            evidence_path: verdict.evidence_path,
            detail,
            timestamp: Utc::now(),
        }
    }

    /// 0-based row index
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    #[must_use]
    pub fn source(&self) -> UrlSource {
        self.source
    }

    #[must_use]
    pub fn status(&self) -> HealthStatus {
        self.status
    }

    #[must_use]
    pub fn evidence_path(&self) -> Option<&Path> {
        self.evidence_path.as_deref()
    }

    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Outcome counts of a report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub ok: usize,
    pub broken: usize,
    pub skipped: usize,
}

impl ReportSummary {
    #[must_use]
    pub fn total(&self) -> usize {
        self.ok + self.broken + self.skipped
    }
}

/// Finalized results for one brand, in row order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    run_id: Uuid,
    brand_name: String,
    brand_slug: String,
    limit: usize,
    records: Vec<ValidationRecord>,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
}

impl ValidationReport {
    #[must_use]
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    #[must_use]
    pub fn brand_name(&self) -> &str {
        &self.brand_name
    }

    #[must_use]
    pub fn brand_slug(&self) -> &str {
        &self.brand_slug
    }

    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    #[must_use]
    pub fn records(&self) -> &[ValidationRecord] {
        &self.records
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn summary(&self) -> ReportSummary {
        self.records
            .iter()
            .fold(ReportSummary::default(), |mut summary, record| {
                match record.status {
                    HealthStatus::Ok => summary.ok += 1,
                    HealthStatus::Broken => summary.broken += 1,
                    HealthStatus::SkippedUnresolved => summary.skipped += 1,
                }
                summary
            })
    }

    #[must_use]
    pub fn has_broken(&self) -> bool {
        self.records.iter().any(|r| r.status == HealthStatus::Broken)
    }

    /// Human-readable report: header, one line per row, completion time, summary.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "SLUG URL REPORT - {} ({}) started {}",
            self.brand_slug,
            self.brand_name,
            self.started_at.to_rfc3339()
        );
        let _ = writeln!(out);

        for record in &self.records {
            let url = record.url.as_deref().unwrap_or("URL not found");
            let _ = write!(
                out,
                "#{} {} {} [{}]",
                record.index + 1,
                url,
                record.status.as_str(),
                record.source.as_str()
            );
            if let Some(path) = &record.evidence_path {
                let _ = write!(out, " evidence={}", path.display());
            }
            if let Some(detail) = &record.detail {
                let _ = write!(out, " ({detail})");
            }
            let _ = writeln!(out);
        }

        let summary = self.summary();
        let _ = writeln!(out);
        let _ = writeln!(out, "Completed at {}", self.completed_at.to_rfc3339());
        let _ = writeln!(
            out,
            "Summary: {} checked, {} ok, {} broken, {} skipped",
            summary.total(),
            summary.ok,
            summary.broken,
            summary.skipped
        );
        out
    }
}

/// Accumulates records for one brand run.
#[derive(Debug)]
pub struct ResultReporter {
    run_id: Uuid,
    brand_name: String,
    brand_slug: String,
    limit: usize,
    records: Vec<ValidationRecord>,
    started_at: DateTime<Utc>,
}

impl ResultReporter {
    #[must_use]
    pub fn new(brand_name: impl Into<String>, brand_slug: impl Into<String>, limit: usize) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            brand_name: brand_name.into(),
            brand_slug: brand_slug.into(),
            limit,
            records: Vec::with_capacity(limit.min(64)),
            started_at: Utc::now(),
        }
    }

    /// Append a record. Records keep insertion order.
    pub fn record(&mut self, record: ValidationRecord) {
        self.records.push(record);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Stamp completion time and hand over the report.
    #[must_use]
    pub fn finalize(self) -> ValidationReport {
        ValidationReport {
            run_id: self.run_id,
            brand_name: self.brand_name,
            brand_slug: self.brand_slug,
            limit: self.limit,
            records: self.records,
            started_at: self.started_at,
            completed_at: Utc::now(),
        }
    }
}
