//! Run summary rendering — console and Markdown.

use newslab_core::stats::SeriesSummary;

use crate::runner::{AnalysisReport, TickerReport};

fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.4}"),
        None => "n/a".to_string(),
    }
}

// ─── Console summary ────────────────────────────────────────────────

/// Print a run summary to stdout.
pub fn print_summary(report: &AnalysisReport) {
    println!("=== News Sentiment Analysis ===");
    println!("  Generated:  {}", report.generated_at);
    println!("  Config:     {}", report.config_hash);
    println!("  Dataset:    {}", report.dataset_hash);
    println!(
        "  Articles:   {} loaded, {} skipped",
        report.news_rows_total, report.news_rows_skipped
    );

    println!("\n=== Headlines ===");
    println!("  Total:      {}", report.headlines.total);
    println!("  Unique:     {}", report.headlines.unique);
    if let Some(len) = &report.headlines.length {
        println!(
            "  Length:     mean {:.1} chars (min {:.0}, max {:.0})",
            len.mean, len.min, len.max
        );
    }

    println!(
        "\n=== Publishers ({} unique) ===",
        report.publishers.unique_publishers
    );
    println!("{:<40} {:>10} {:>12}", "Publisher", "Articles", "Sentiment");
    for row in &report.publishers.top {
        println!(
            "{:<40} {:>10} {:>12}",
            row.name,
            row.articles,
            fmt_opt(row.mean_sentiment)
        );
    }

    println!("\n=== Publication Timing ===");
    if let Some((date, n)) = report.timing.busiest_date() {
        println!("  Busiest date: {date} ({n} articles)");
    }
    if let Some((hour, n)) = report.timing.busiest_hour() {
        println!("  Busiest hour: {hour:02}:00 ({n} articles)");
    }
    println!(
        "  Date-only rows: {}, undated: {}",
        report.timing.date_only, report.timing.undated
    );

    if !report.topics.is_empty() {
        println!("\n=== Topics ===");
        for topic in &report.topics {
            let words: Vec<&str> = topic
                .top_words
                .iter()
                .map(|(w, _)| w.as_str())
                .collect();
            println!(
                "  #{:<2} ({:>5.1}%)  {}",
                topic.index,
                topic.prevalence * 100.0,
                words.join(" ")
            );
        }
    }

    println!("\n=== Tickers ===");
    println!(
        "{:<8} {:>9} {:>7} {:>8} {:>18}",
        "Ticker", "Articles", "Bars", "Aligned", "r(sent, return)"
    );
    for ticker in &report.tickers {
        println!(
            "{:<8} {:>9} {:>7} {:>8} {:>18}",
            ticker.ticker,
            ticker.article_count,
            ticker.bar_count,
            ticker.aligned.len(),
            fmt_opt(ticker.correlation.cell(0, 1))
        );
        for warning in &ticker.warnings {
            println!("         warning: {warning}");
        }
    }
}

// ─── Markdown report ────────────────────────────────────────────────

/// Render the full run report as Markdown.
pub fn generate_markdown(report: &AnalysisReport) -> String {
    let mut md = format!(
        "# NewsLab Analysis Report\n\n\
Generated: {}\n\n\
Config hash: `{}`\n\
Dataset hash: `{}`\n\n\
## Corpus\n\
- Articles: {} ({} skipped)\n\
- Unique headlines: {}\n\
- Publishers: {}\n",
        report.generated_at,
        report.config_hash,
        report.dataset_hash,
        report.news_rows_total,
        report.news_rows_skipped,
        report.headlines.unique,
        report.publishers.unique_publishers
    );
    if let Some(len) = &report.headlines.length {
        md.push_str(&headline_length_line(len));
    }

    if !report.publishers.top.is_empty() {
        md.push_str("\n### Top Publishers\n");
        md.push_str("| Publisher | Articles | Mean Sentiment |\n");
        md.push_str("|-----------|----------|----------------|\n");
        for row in &report.publishers.top {
            md.push_str(&format!(
                "| {} | {} | {} |\n",
                row.name,
                row.articles,
                fmt_opt(row.mean_sentiment)
            ));
        }
    }

    if !report.headlines.most_frequent.is_empty() {
        md.push_str("\n### Most Frequent Headlines\n");
        md.push_str("| Headline | Count |\n");
        md.push_str("|----------|-------|\n");
        for (headline, count) in &report.headlines.most_frequent {
            md.push_str(&format!("| {headline} | {count} |\n"));
        }
    }

    if !report.extremes.most_positive.is_empty() || !report.extremes.most_negative.is_empty() {
        md.push_str("\n## Sentiment Extremes\n");
        md.push_str("\n### Most Positive\n");
        md.push_str("| Headline | Score |\n");
        md.push_str("|----------|-------|\n");
        for (headline, score) in &report.extremes.most_positive {
            md.push_str(&format!("| {headline} | {score:+.4} |\n"));
        }
        md.push_str("\n### Most Negative\n");
        md.push_str("| Headline | Score |\n");
        md.push_str("|----------|-------|\n");
        for (headline, score) in &report.extremes.most_negative {
            md.push_str(&format!("| {headline} | {score:+.4} |\n"));
        }
    }

    if !report.topics.is_empty() {
        md.push_str("\n## Topics\n");
        md.push_str("| # | Prevalence | Top Words |\n");
        md.push_str("|---|------------|-----------|\n");
        for topic in &report.topics {
            let words: Vec<&str> = topic
                .top_words
                .iter()
                .map(|(w, _)| w.as_str())
                .collect();
            md.push_str(&format!(
                "| {} | {:.1}% | {} |\n",
                topic.index,
                topic.prevalence * 100.0,
                words.join(", ")
            ));
        }
    }

    if !report.entities.is_empty() {
        md.push_str("\n## Entity Sample\n");
        for (headline, entities) in &report.entities {
            let tagged: Vec<String> = entities
                .iter()
                .map(|e| format!("{} ({})", e.text, e.kind.as_str()))
                .collect();
            md.push_str(&format!("- {}: {}\n", headline, tagged.join(", ")));
        }
    }

    md.push_str("\n## Tickers\n");
    md.push_str("| Ticker | Articles | Bars | Aligned Days | r(sentiment, return) |\n");
    md.push_str("|--------|----------|------|--------------|----------------------|\n");
    for ticker in &report.tickers {
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            ticker.ticker,
            ticker.article_count,
            ticker.bar_count,
            ticker.aligned.len(),
            fmt_opt(ticker.correlation.cell(0, 1))
        ));
    }
    for ticker in &report.tickers {
        md.push_str(&ticker_section(ticker));
    }

    md.push_str(
        "\n## Notes\n\
- Aligned tables, correlation matrices, and indicator snapshots are exported as CSV alongside this report.\n",
    );

    md
}

fn headline_length_line(len: &SeriesSummary) -> String {
    format!(
        "- Headline length: mean {:.1} chars (min {:.0}, max {:.0})\n",
        len.mean, len.min, len.max
    )
}

fn ticker_section(ticker: &TickerReport) -> String {
    let mut md = format!("\n### {}\n", ticker.ticker);

    if let Some(summary) = &ticker.sentiment_summary {
        md.push_str(&format!(
            "- Daily sentiment: mean {:+.4}, std {:.4}, range [{:+.4}, {:+.4}] over {} days\n",
            summary.mean, summary.std, summary.min, summary.max, summary.count
        ));
    }

    let labels = &ticker.correlation.labels;
    md.push_str("\n| |");
    for label in labels {
        md.push_str(&format!(" {label} |"));
    }
    md.push('\n');
    md.push_str("|---|");
    for _ in labels {
        md.push_str("---|");
    }
    md.push('\n');
    for (i, label) in labels.iter().enumerate() {
        md.push_str(&format!("| {label} |"));
        for j in 0..labels.len() {
            md.push_str(&format!(" {} |", fmt_opt(ticker.correlation.cell(i, j))));
        }
        md.push('\n');
    }

    if !ticker.indicators.is_empty() {
        md.push_str("\n| Indicator | Latest |\n");
        md.push_str("|-----------|--------|\n");
        for (name, value) in &ticker.indicators {
            md.push_str(&format!("| {} | {} |\n", name, fmt_opt(*value)));
        }
    }

    for warning in &ticker.warnings {
        md.push_str(&format!("\n> warning: {warning}\n"));
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use newslab_core::stats::{
        correlation_matrix, HeadlineStats, PublicationTiming, PublisherRow, PublisherStats,
        SentimentExtremes,
    };
    use crate::runner::SCHEMA_VERSION;

    fn tiny_report() -> AnalysisReport {
        AnalysisReport {
            schema_version: SCHEMA_VERSION,
            generated_at: "2020-06-05 12:00:00".into(),
            config_hash: "cfg".into(),
            config: None,
            dataset_hash: "data".into(),
            news_rows_total: 3,
            news_rows_skipped: 1,
            headlines: HeadlineStats {
                total: 3,
                unique: 3,
                length: None,
                most_frequent: vec![("Shares rally".into(), 2)],
            },
            publishers: PublisherStats {
                unique_publishers: 1,
                top: vec![PublisherRow {
                    name: "Reuters".into(),
                    articles: 3,
                    mean_sentiment: Some(0.12),
                }],
                email_domains: Vec::new(),
            },
            timing: PublicationTiming {
                by_weekday: Vec::new(),
                by_date: Vec::new(),
                by_hour: Vec::new(),
                date_only: 0,
                undated: 0,
            },
            extremes: SentimentExtremes {
                most_positive: vec![("Shares rally".into(), 0.8)],
                most_negative: Vec::new(),
            },
            topics: Vec::new(),
            entities: Vec::new(),
            tickers: vec![TickerReport {
                schema_version: SCHEMA_VERSION,
                ticker: "AAPL".into(),
                article_count: 3,
                bar_count: 0,
                aligned: Vec::new(),
                sentiment_summary: None,
                correlation: correlation_matrix(&[]),
                indicators: Vec::new(),
                warnings: vec!["price data unavailable for AAPL: not found".into()],
            }],
        }
    }

    #[test]
    fn markdown_has_core_sections() {
        let md = generate_markdown(&tiny_report());
        assert!(md.starts_with("# NewsLab Analysis Report"));
        assert!(md.contains("## Corpus"));
        assert!(md.contains("| Reuters | 3 | 0.1200 |"));
        assert!(md.contains("## Tickers"));
        assert!(md.contains("### AAPL"));
        assert!(md.contains("> warning: price data unavailable"));
    }

    #[test]
    fn undefined_correlations_render_as_na_not_zero() {
        let md = generate_markdown(&tiny_report());
        assert!(md.contains("| AAPL | 3 | 0 | 0 | n/a |"));
        assert!(md.contains("| sentiment | n/a | n/a | n/a |"));
    }

    #[test]
    fn empty_optional_sections_are_omitted() {
        let mut report = tiny_report();
        report.extremes = SentimentExtremes {
            most_positive: Vec::new(),
            most_negative: Vec::new(),
        };
        let md = generate_markdown(&report);
        assert!(!md.contains("## Sentiment Extremes"));
        assert!(!md.contains("## Topics"));
        assert!(!md.contains("## Entity Sample"));
    }
}
