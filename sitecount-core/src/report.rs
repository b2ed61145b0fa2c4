// Report generation from a finished crawl

use crate::rank::{RankedEntry, rank};
use serde::{Deserialize, Serialize};
use sitecount_scanner::{CanonicalUrl, CrawlOutcome, FailedPage};
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
    Csv,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            "csv" => Some(ReportFormat::Csv),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlSummary {
    /// Distinct in-scope pages seen, fetched or not.
    pub pages_discovered: usize,
    pub pages_fetched: usize,
    pub pages_failed: usize,
    pub dropped_by_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlReport {
    pub root: CanonicalUrl,
    pub summary: CrawlSummary,
    pub entries: Vec<RankedEntry>,
    pub failures: Vec<FailedPage>,
}

impl CrawlReport {
    pub fn from_outcome(outcome: CrawlOutcome) -> Self {
        let entries = rank(&outcome.visited);
        let summary = CrawlSummary {
            pages_discovered: outcome.visited.len(),
            pages_fetched: outcome.pages_fetched,
            pages_failed: outcome.failures.len(),
            dropped_by_limit: outcome.dropped_by_limit,
        };

        Self {
            root: outcome.root,
            summary,
            entries,
            failures: outcome.failures,
        }
    }
}

/// One `<url> has <count> instances` line per page.
pub fn generate_text_report(report: &CrawlReport) -> String {
    let mut text = String::new();
    for entry in &report.entries {
        text.push_str(&entry.to_string());
        text.push('\n');
    }
    text
}

pub fn generate_json_report(report: &CrawlReport) -> Result<String, serde_json::Error> {
    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "sitecount",
                "version": env!("CARGO_PKG_VERSION"),
                "format": "json"
            },
            "root": report.root,
            "summary": report.summary,
            "pages": report.entries,
            "failures": report.failures
        }
    });

    serde_json::to_string_pretty(&json_report)
}

pub fn generate_csv_report(report: &CrawlReport) -> String {
    let mut csv = String::from("url,count\n");
    for entry in &report.entries {
        csv.push_str(&format!("{},{}\n", csv_field(entry.url.as_str()), entry.count));
    }
    csv
}

pub fn render_report(report: &CrawlReport, format: ReportFormat) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Text => Ok(generate_text_report(report)),
        ReportFormat::Json => generate_json_report(report),
        ReportFormat::Csv => Ok(generate_csv_report(report)),
    }
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
