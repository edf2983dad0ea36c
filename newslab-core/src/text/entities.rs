//! Rule-based entity spotting in headlines.
//!
//! Deliberately shallow: regex money/percent amounts, ticker-shaped tokens,
//! and runs of capitalized words as organization candidates.

use std::collections::HashSet;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::NewsRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Organization,
    Ticker,
    Money,
    Percent,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Organization => "organization",
            EntityKind::Ticker => "ticker",
            EntityKind::Money => "money",
            EntityKind::Percent => "percent",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub kind: EntityKind,
}

/// Uppercase abbreviations that look like tickers but never are.
const TICKER_BLOCKLIST: &[&str] = &[
    "AI", "AM", "CEO", "CFO", "EPS", "ETF", "EU", "FDA", "FTC", "GDP", "IPO", "IT", "NYSE",
    "PM", "SEC", "TV", "UK", "US", "USA",
];

/// Extracts entity candidates. Regexes are compiled once at construction;
/// reuse one extractor across a whole run.
#[derive(Debug)]
pub struct EntityExtractor {
    money: Regex,
    percent: Regex,
    cashtag: Regex,
}

impl EntityExtractor {
    pub fn new() -> Self {
        Self {
            money: Regex::new(r"\$\d[\d,]*(?:\.\d+)?(?:\s?(?i:million|billion|trillion))?")
                .expect("static regex"),
            percent: Regex::new(r"\d+(?:\.\d+)?%").expect("static regex"),
            cashtag: Regex::new(r"\$[A-Z]{1,5}\b").expect("static regex"),
        }
    }

    /// All entities found in one headline, first occurrence of each kept.
    pub fn extract(&self, text: &str) -> Vec<Entity> {
        let mut entities = Vec::new();
        for m in self.cashtag.find_iter(text) {
            entities.push(Entity {
                text: m.as_str().to_string(),
                kind: EntityKind::Ticker,
            });
        }
        for m in self.money.find_iter(text) {
            entities.push(Entity {
                text: m.as_str().to_string(),
                kind: EntityKind::Money,
            });
        }
        for m in self.percent.find_iter(text) {
            entities.push(Entity {
                text: m.as_str().to_string(),
                kind: EntityKind::Percent,
            });
        }
        entities.extend(word_shape_entities(text));

        let mut seen = HashSet::new();
        entities.retain(|e| seen.insert(e.clone()));
        entities
    }

    /// Entity lists for the first `limit` headlines, skipping headlines with
    /// no hits.
    pub fn extract_sample(
        &self,
        records: &[NewsRecord],
        limit: usize,
    ) -> Vec<(String, Vec<Entity>)> {
        records
            .iter()
            .filter_map(|r| {
                let found = self.extract(&r.headline);
                if found.is_empty() {
                    None
                } else {
                    Some((r.headline.clone(), found))
                }
            })
            .take(limit)
            .collect()
    }
}

impl Default for EntityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Ticker-shaped tokens plus capitalized multi-word runs.
fn word_shape_entities(text: &str) -> Vec<Entity> {
    let mut entities = Vec::new();
    let mut run: Vec<&str> = Vec::new();

    let mut flush = |run: &mut Vec<&str>, out: &mut Vec<Entity>| {
        if run.len() >= 2 {
            out.push(Entity {
                text: run.join(" "),
                kind: EntityKind::Organization,
            });
        }
        run.clear();
    };

    for raw in text.split_whitespace() {
        // Dollar-prefixed tokens belong to the cashtag and money passes.
        if raw.starts_with('$') {
            flush(&mut run, &mut entities);
            continue;
        }
        let word = raw.trim_matches(|c: char| !c.is_alphanumeric());
        if is_ticker_shaped(word) {
            flush(&mut run, &mut entities);
            entities.push(Entity {
                text: word.to_string(),
                kind: EntityKind::Ticker,
            });
        } else if is_capitalized(word) {
            run.push(word);
        } else {
            flush(&mut run, &mut entities);
        }
    }
    flush(&mut run, &mut entities);
    entities
}

fn is_ticker_shaped(word: &str) -> bool {
    (2..=5).contains(&word.len())
        && word.chars().all(|c| c.is_ascii_uppercase())
        && !TICKER_BLOCKLIST.contains(&word)
}

fn is_capitalized(word: &str) -> bool {
    let mut chars = word.chars();
    matches!(chars.next(), Some(first) if first.is_uppercase())
        && chars.all(|c| c.is_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts_of(entities: &[Entity], kind: EntityKind) -> Vec<&str> {
        entities
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.text.as_str())
            .collect()
    }

    #[test]
    fn money_amounts_found() {
        let ex = EntityExtractor::new();
        let found = ex.extract("deal worth $3.2 billion after $1,250.75 payout");
        assert_eq!(
            texts_of(&found, EntityKind::Money),
            vec!["$3.2 billion", "$1,250.75"]
        );
    }

    #[test]
    fn percents_found() {
        let ex = EntityExtractor::new();
        let found = ex.extract("shares fell 12% then recovered 3.5%");
        assert_eq!(texts_of(&found, EntityKind::Percent), vec!["12%", "3.5%"]);
    }

    #[test]
    fn cashtags_are_tickers_not_money() {
        let ex = EntityExtractor::new();
        let found = ex.extract("$TSLA drops while $AAPL gains");
        assert_eq!(
            texts_of(&found, EntityKind::Ticker),
            vec!["$TSLA", "$AAPL"]
        );
        assert!(texts_of(&found, EntityKind::Money).is_empty());
    }

    #[test]
    fn capitalized_runs_become_organizations() {
        let ex = EntityExtractor::new();
        let found = ex.extract("report from Morgan Stanley cites growth");
        assert_eq!(
            texts_of(&found, EntityKind::Organization),
            vec!["Morgan Stanley"]
        );
    }

    #[test]
    fn single_capitalized_word_is_not_an_organization() {
        let ex = EntityExtractor::new();
        let found = ex.extract("analysts expect Apple results soon");
        assert!(texts_of(&found, EntityKind::Organization).is_empty());
    }

    #[test]
    fn bare_uppercase_tokens_are_tickers_unless_blocklisted() {
        let ex = EntityExtractor::new();
        let found = ex.extract("MSFT CEO speaks on growth");
        assert_eq!(texts_of(&found, EntityKind::Ticker), vec!["MSFT"]);
    }

    #[test]
    fn duplicates_collapse_to_first_occurrence() {
        let ex = EntityExtractor::new();
        let found = ex.extract("AAPL beats, AAPL soars");
        assert_eq!(texts_of(&found, EntityKind::Ticker), vec!["AAPL"]);
    }

    #[test]
    fn sample_skips_empty_hits_and_respects_limit() {
        let ex = EntityExtractor::new();
        let mk = |headline: &str| NewsRecord {
            headline: headline.to_string(),
            url: String::new(),
            publisher: "wire".to_string(),
            published: None,
            stock: "AAPL".to_string(),
            sentiment: None,
        };
        let records = vec![
            mk("nothing to see here"),
            mk("TSLA up 4%"),
            mk("GOOG down 1%"),
            mk("AMZN flat at $100"),
        ];
        let sample = ex.extract_sample(&records, 2);
        assert_eq!(sample.len(), 2);
        assert_eq!(sample[0].0, "TSLA up 4%");
        assert_eq!(sample[1].0, "GOOG down 1%");
    }
}
