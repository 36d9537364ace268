#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use review_sentiment::core::Result;
use review_sentiment::pipelines::{LabelScoreSet, SentimentClassifier};

pub const LABELS: [&str; 3] = ["negative", "neutral", "positive"];

/// Deterministic stand-in for the real model: scores reviews by keyword.
#[derive(Default)]
pub struct KeywordClassifier {
    calls: AtomicUsize,
}

impl KeywordClassifier {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn score(text: &str) -> LabelScoreSet {
        let lower = text.to_lowercase();
        let scores = if ["love", "great", "beautiful", "quick"]
            .iter()
            .any(|word| lower.contains(word))
        {
            [0.02, 0.05, 0.93]
        } else if ["broke", "heavy", "bad", "late"]
            .iter()
            .any(|word| lower.contains(word))
        {
            [0.81, 0.12, 0.07]
        } else {
            [0.2, 0.6, 0.2]
        };
        LabelScoreSet::from_scores(&LABELS, &scores)
    }
}

impl SentimentClassifier for KeywordClassifier {
    fn classify(&self, batch: &[&str]) -> Result<Vec<LabelScoreSet>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(batch.iter().map(|text| Self::score(text)).collect())
    }
}
