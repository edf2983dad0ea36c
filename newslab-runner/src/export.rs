//! Reporting and export — JSON, CSV, and Markdown artifact generation.
//!
//! Provides three export formats for analysis results:
//! - **JSON**: full round-trip serialization with schema versioning
//! - **CSV**: aligned tables, correlation matrices, indicator snapshots
//! - **Markdown**: a human-readable run summary
//!
//! All persisted artifacts include a `schema_version` field. Unknown versions
//! are rejected on load.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use newslab_core::domain::AlignedRow;

use crate::report::generate_markdown;
use crate::runner::{AnalysisReport, TickerReport, SCHEMA_VERSION};

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize an `AnalysisReport` to pretty JSON.
pub fn export_json(report: &AnalysisReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize AnalysisReport to JSON")
}

/// Deserialize an `AnalysisReport` from JSON, rejecting unknown schema
/// versions.
pub fn import_json(json: &str) -> Result<AnalysisReport> {
    let report: AnalysisReport =
        serde_json::from_str(json).context("failed to deserialize AnalysisReport from JSON")?;
    if report.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            report.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(report)
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Export an aligned sentiment/price table as CSV.
///
/// Optional columns serialize as empty cells, keeping "undefined" distinct
/// from zero in the output.
pub fn export_aligned_csv(rows: &[AlignedRow]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "date",
        "mean_sentiment",
        "article_count",
        "sentiment_class",
        "open",
        "high",
        "low",
        "close",
        "adj_close",
        "volume",
        "daily_return",
        "volatility",
    ])?;

    for row in rows {
        wtr.write_record([
            &row.date.to_string(),
            &format!("{:.6}", row.mean_sentiment),
            &row.article_count.to_string(),
            row.sentiment_class.as_str(),
            &format!("{:.6}", row.open),
            &format!("{:.6}", row.high),
            &format!("{:.6}", row.low),
            &format!("{:.6}", row.close),
            &format!("{:.6}", row.adj_close),
            &format!("{:.0}", row.volume),
            &fmt_opt(row.daily_return),
            &fmt_opt(row.volatility),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Export a ticker's correlation matrix as CSV, labels on both axes.
pub fn export_correlations_csv(report: &TickerReport) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    let labels = &report.correlation.labels;

    let mut header = vec![String::new()];
    header.extend(labels.iter().cloned());
    wtr.write_record(&header)?;

    for (i, label) in labels.iter().enumerate() {
        let mut record = vec![label.clone()];
        for j in 0..labels.len() {
            record.push(fmt_opt(report.correlation.cell(i, j)));
        }
        wtr.write_record(&record)?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Export the latest indicator values for a ticker as CSV.
pub fn export_indicators_csv(report: &TickerReport) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["indicator", "latest"])?;
    for (name, value) in &report.indicators {
        wtr.write_record([name.as_str(), &fmt_opt(*value)])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.6}"),
        None => String::new(),
    }
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Save the full artifact set for one analysis run.
///
/// Creates a directory named `run_{timestamp}/` under `output_dir`
/// containing:
/// - `report.json` — the full `AnalysisReport`
/// - `summary.md` — the Markdown run summary
/// - `{TICKER}_aligned.csv` / `{TICKER}_correlations.csv` /
///   `{TICKER}_indicators.csv` per analyzed ticker
///
/// Returns the path to the created directory.
pub fn save_artifacts(report: &AnalysisReport, output_dir: &Path) -> Result<PathBuf> {
    let dirname = format!("run_{}", chrono::Local::now().format("%Y%m%d_%H%M%S"));
    let run_dir = output_dir.join(dirname);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create artifact dir: {}", run_dir.display()))?;

    let json = export_json(report)?;
    std::fs::write(run_dir.join("report.json"), &json)?;

    let markdown = generate_markdown(report);
    std::fs::write(run_dir.join("summary.md"), &markdown)?;

    for ticker in &report.tickers {
        let aligned = export_aligned_csv(&ticker.aligned)?;
        std::fs::write(run_dir.join(format!("{}_aligned.csv", ticker.ticker)), &aligned)?;

        let correlations = export_correlations_csv(ticker)?;
        std::fs::write(
            run_dir.join(format!("{}_correlations.csv", ticker.ticker)),
            &correlations,
        )?;

        let indicators = export_indicators_csv(ticker)?;
        std::fs::write(
            run_dir.join(format!("{}_indicators.csv", ticker.ticker)),
            &indicators,
        )?;
    }

    Ok(run_dir)
}

/// Load an `AnalysisReport` from an artifact directory's report.json.
///
/// Rejects unknown schema versions.
pub fn load_artifacts(dir: &Path) -> Result<AnalysisReport> {
    let report_path = dir.join("report.json");
    let json = std::fs::read_to_string(&report_path)
        .with_context(|| format!("failed to read {}", report_path.display()))?;
    import_json(&json)
}
