//! Publisher activity statistics.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::NewsRecord;

/// One publisher's footprint in the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublisherRow {
    pub name: String,
    pub articles: usize,
    /// Mean score over this publisher's scored headlines; `None` if none are scored.
    pub mean_sentiment: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublisherStats {
    pub unique_publishers: usize,
    /// Most active publishers, descending by article count.
    pub top: Vec<PublisherRow>,
    /// Domain counts for publisher names that are email addresses.
    pub email_domains: Vec<(String, usize)>,
}

/// Domain part of an email-shaped publisher name.
pub fn email_domain(publisher: &str) -> Option<&str> {
    publisher
        .rsplit_once('@')
        .map(|(_, domain)| domain.trim())
        .filter(|domain| !domain.is_empty())
}

pub fn publisher_stats(records: &[NewsRecord], top_n: usize) -> PublisherStats {
    let mut counts: HashMap<&str, (usize, f64, usize)> = HashMap::new();
    let mut domains: HashMap<String, usize> = HashMap::new();
    for rec in records {
        let name = rec.publisher.trim();
        if name.is_empty() {
            continue;
        }
        let entry = counts.entry(name).or_insert((0, 0.0, 0));
        entry.0 += 1;
        if let Some(score) = rec.sentiment.filter(|s| s.is_finite()) {
            entry.1 += score;
            entry.2 += 1;
        }
        if let Some(domain) = email_domain(name) {
            *domains.entry(domain.to_ascii_lowercase()).or_insert(0) += 1;
        }
    }

    let unique_publishers = counts.len();
    let mut top: Vec<PublisherRow> = counts
        .into_iter()
        .map(|(name, (articles, sum, scored))| PublisherRow {
            name: name.to_string(),
            articles,
            mean_sentiment: (scored > 0).then(|| sum / scored as f64),
        })
        .collect();
    top.sort_by(|a, b| b.articles.cmp(&a.articles).then_with(|| a.name.cmp(&b.name)));
    top.truncate(top_n);

    let mut email_domains: Vec<(String, usize)> = domains.into_iter().collect();
    email_domains.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    PublisherStats {
        unique_publishers,
        top,
        email_domains,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(publisher: &str, sentiment: Option<f64>) -> NewsRecord {
        NewsRecord {
            headline: "h".into(),
            url: String::new(),
            publisher: publisher.into(),
            published: None,
            stock: "TEST".into(),
            sentiment,
        }
    }

    #[test]
    fn counts_descend_with_alpha_tiebreak() {
        let records = vec![
            record("Benzinga", None),
            record("Benzinga", None),
            record("Reuters", None),
            record("Alpha Wire", None),
        ];
        let stats = publisher_stats(&records, 10);
        assert_eq!(stats.unique_publishers, 3);
        assert_eq!(stats.top[0].name, "Benzinga");
        assert_eq!(stats.top[0].articles, 2);
        assert_eq!(stats.top[1].name, "Alpha Wire");
    }

    #[test]
    fn mean_sentiment_per_publisher() {
        let records = vec![
            record("Reuters", Some(0.4)),
            record("Reuters", Some(-0.2)),
            record("Quiet Desk", None),
        ];
        let stats = publisher_stats(&records, 10);
        let reuters = stats.top.iter().find(|p| p.name == "Reuters").unwrap();
        assert!((reuters.mean_sentiment.unwrap() - 0.1).abs() < 1e-12);
        let quiet = stats.top.iter().find(|p| p.name == "Quiet Desk").unwrap();
        assert_eq!(quiet.mean_sentiment, None);
    }

    #[test]
    fn email_domains_extracted_case_insensitively() {
        let records = vec![
            record("alerts@Benzinga.com", None),
            record("news@benzinga.com", None),
            record("Reuters", None),
        ];
        let stats = publisher_stats(&records, 10);
        assert_eq!(stats.email_domains, vec![("benzinga.com".into(), 2)]);
    }

    #[test]
    fn email_domain_edge_cases() {
        assert_eq!(email_domain("a@b.com"), Some("b.com"));
        assert_eq!(email_domain("not an address"), None);
        assert_eq!(email_domain("trailing@"), None);
    }

    #[test]
    fn blank_publishers_are_ignored() {
        let stats = publisher_stats(&[record("  ", None)], 10);
        assert_eq!(stats.unique_publishers, 0);
        assert!(stats.top.is_empty());
    }
}
