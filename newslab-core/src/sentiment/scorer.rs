//! Headline sentiment scoring.

use vader_sentiment::SentimentIntensityAnalyzer;

use crate::domain::NewsRecord;

/// VADER-backed headline scorer.
///
/// Construction loads the lexicon, so build one per run and reuse it; the
/// analyzer is read-only after that.
pub struct HeadlineScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl HeadlineScorer {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }

    /// Compound polarity in [-1, 1]. Empty or whitespace-only text scores 0.0.
    pub fn score(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return 0.0;
        }
        let scores = self.analyzer.polarity_scores(text);
        scores
            .get("compound")
            .copied()
            .unwrap_or(0.0)
            .clamp(-1.0, 1.0)
    }

    /// Returns new records with `sentiment` filled; the inputs stay untouched.
    pub fn score_records(&self, records: &[NewsRecord]) -> Vec<NewsRecord> {
        records
            .iter()
            .map(|rec| {
                let mut scored = rec.clone();
                scored.sentiment = Some(self.score(&rec.headline));
                scored
            })
            .collect()
    }
}

impl Default for HeadlineScorer {
    fn default() -> Self {
        Self::new()
    }
}
