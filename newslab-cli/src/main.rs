//! NewsLab CLI — analyze, inspect, and show commands.
//!
//! Commands:
//! - `analyze` — run the full news/price analysis from a TOML config
//! - `inspect` — quick profile of a news CSV without a full run
//! - `show` — reprint the summary of a saved run

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use newslab_core::data::{load_news_csv, NewsLoadOptions};
use newslab_core::stats::{headline_stats, publication_timing, publisher_stats};
use newslab_runner::{
    load_artifacts, print_summary, run_analysis, save_artifacts, AnalysisConfig,
};

#[derive(Parser)]
#[command(
    name = "newslab",
    about = "NewsLab CLI — financial news sentiment and price analysis"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full analysis and save artifacts.
    Analyze {
        /// Path to a TOML config file. Built-in defaults are used when omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// News CSV path (overrides the config).
        #[arg(long)]
        news: Option<PathBuf>,

        /// Directory of per-ticker price CSVs (overrides the config).
        #[arg(long)]
        prices: Option<PathBuf>,

        /// Restrict the run to these tickers (e.g., AAPL TSLA).
        #[arg(long, num_args = 1..)]
        tickers: Vec<String>,

        /// Output directory for artifacts (overrides the config).
        #[arg(long)]
        output: Option<PathBuf>,

        /// Skip topic modeling.
        #[arg(long, default_value_t = false)]
        no_topics: bool,
    },
    /// Profile a news CSV: row counts, coverage, publishers, timing.
    Inspect {
        /// News CSV path.
        news: PathBuf,

        /// Rows per table.
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
    /// Print the summary of a saved run.
    Show {
        /// Artifact directory containing report.json.
        run_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            config,
            news,
            prices,
            tickers,
            output,
            no_topics,
        } => run_analyze(config, news, prices, tickers, output, no_topics),
        Commands::Inspect { news, top } => run_inspect(&news, top),
        Commands::Show { run_dir } => run_show(&run_dir),
    }
}

fn run_analyze(
    config_path: Option<PathBuf>,
    news: Option<PathBuf>,
    prices: Option<PathBuf>,
    tickers: Vec<String>,
    output: Option<PathBuf>,
    no_topics: bool,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => AnalysisConfig::from_file(&path)?,
        None => AnalysisConfig::default(),
    };

    if let Some(path) = news {
        config.data.news_csv = path;
    }
    if let Some(path) = prices {
        config.data.prices_dir = path;
    }
    if !tickers.is_empty() {
        config.data.tickers = tickers;
    }
    if let Some(path) = output {
        config.output.dir = path;
    }
    if no_topics {
        config.topics.enabled = false;
    }

    let report = run_analysis(&config)?;
    print_summary(&report);

    let run_dir = save_artifacts(&report, &config.output.dir)?;
    println!();
    println!("Artifacts saved to: {}", run_dir.display());

    Ok(())
}

fn run_inspect(news: &PathBuf, top: usize) -> Result<()> {
    let loaded = load_news_csv(news, &NewsLoadOptions::default())?;

    println!("Feed: {}", news.display());
    println!("Rows: {} ({} skipped)", loaded.rows_total, loaded.rows_skipped);

    let dates: Vec<NaiveDate> = loaded.records.iter().filter_map(|r| r.date_key()).collect();
    if let (Some(first), Some(last)) = (dates.iter().min(), dates.iter().max()) {
        println!("Coverage: {first} to {last}");
    }

    let mut by_ticker: BTreeMap<&str, usize> = BTreeMap::new();
    for record in &loaded.records {
        *by_ticker.entry(record.stock.as_str()).or_insert(0) += 1;
    }
    println!("Tickers: {}", by_ticker.len());

    let mut rows: Vec<(&str, usize)> = by_ticker.into_iter().collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    println!();
    println!("{:<8} {:>10}", "Ticker", "Articles");
    println!("{}", "-".repeat(19));
    for (ticker, count) in rows.iter().take(top) {
        println!("{:<8} {:>10}", ticker, count);
    }

    let headlines = headline_stats(&loaded.records, top);
    println!();
    println!("Headlines: {} total, {} unique", headlines.total, headlines.unique);
    if let Some(len) = &headlines.length {
        println!(
            "Length: mean {:.1} chars (min {:.0}, max {:.0})",
            len.mean, len.min, len.max
        );
    }

    let publishers = publisher_stats(&loaded.records, top);
    println!();
    println!("{:<40} {:>10}", "Publisher", "Articles");
    println!("{}", "-".repeat(51));
    for row in &publishers.top {
        println!("{:<40} {:>10}", row.name, row.articles);
    }

    let timing = publication_timing(&loaded.records);
    println!();
    if let Some((date, n)) = timing.busiest_date() {
        println!("Busiest date: {date} ({n} articles)");
    }
    if let Some((hour, n)) = timing.busiest_hour() {
        println!("Busiest hour: {hour:02}:00 ({n} articles)");
    }
    println!(
        "Date-only rows: {}, undated: {}",
        timing.date_only, timing.undated
    );

    Ok(())
}

fn run_show(run_dir: &PathBuf) -> Result<()> {
    let report = load_artifacts(run_dir)?;
    print_summary(&report);
    Ok(())
}
