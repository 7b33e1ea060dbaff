//! CSV export of classification records.
//!
//! Column order is fixed. The interpretation and recommendation columns are
//! always quoted; recommendations are joined with `"; "`.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

use crate::Result;
use crate::telemetry;
use crate::types::ClassificationRecord;

/// Header row of every export.
pub const HEADERS: [&str; 8] = [
    "Customer ID",
    "Cluster ID",
    "Cluster Name",
    "Monetary Value",
    "Frequency",
    "Recency",
    "Cluster Interpretation",
    "Recommendations",
];

/// File name used when exporting the filtered view.
pub const FILTERED_EXPORT_FILENAME: &str = "customer_segmentation_results.csv";

/// Which records an export covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportScope {
    /// Every record returned by the service.
    All,
    /// Only the rows visible under the current search and focus.
    Filtered,
}

impl ExportScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportScope::All => "all",
            ExportScope::Filtered => "filtered",
        }
    }

    /// Default file name; the "all" export embeds `date`.
    pub fn default_filename(&self, date: NaiveDate) -> String {
        match self {
            ExportScope::All => all_export_filename(date),
            ExportScope::Filtered => FILTERED_EXPORT_FILENAME.to_string(),
        }
    }
}

/// `customer_segmentation_all_YYYY-MM-DD.csv`
pub fn all_export_filename(date: NaiveDate) -> String {
    format!("customer_segmentation_all_{}.csv", date.format("%Y-%m-%d"))
}

/// Today's date in UTC.
pub fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

/// Render records as a CSV document: header line, then one line per record,
/// joined by `\n` with no trailing newline.
pub fn to_csv<'a, I>(records: I) -> String
where
    I: IntoIterator<Item = &'a ClassificationRecord>,
{
    std::iter::once(HEADERS.join(","))
        .chain(records.into_iter().map(csv_row))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One export line for `record`.
pub fn csv_row(record: &ClassificationRecord) -> String {
    let rfm = &record.rfm_values;
    format!(
        "{},{},{},{:.2},{},{},{},{}",
        record.customer_id,
        record.predicted_cluster_id,
        record.cluster_name,
        rfm.monetary_value,
        rfm.frequency,
        rfm.recency,
        quoted(&record.cluster_interpretation),
        quoted(&record.cluster_recommendations.join("; ")),
    )
}

fn quoted(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Where an export lands: inside `target` when it is an existing directory,
/// otherwise at `target` itself.
pub fn resolve_target(target: &Path, default_name: &str) -> PathBuf {
    if target.is_dir() {
        target.join(default_name)
    } else {
        target.to_path_buf()
    }
}

/// Write `records` as CSV and return the path written.
pub fn write_export<'a, I>(
    target: &Path,
    scope: ExportScope,
    date: NaiveDate,
    records: I,
) -> Result<PathBuf>
where
    I: IntoIterator<Item = &'a ClassificationRecord>,
{
    let path = resolve_target(target, &scope.default_filename(date));
    std::fs::write(&path, to_csv(records))?;
    metrics::counter!(telemetry::EXPORTS_TOTAL, "scope" => scope.as_str()).increment(1);
    info!(path = %path.display(), scope = scope.as_str(), "export written");
    Ok(path)
}
