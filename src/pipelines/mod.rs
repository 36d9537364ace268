// Pipeline modules organized by functionality
pub mod sentiment_analysis_pipeline;
pub mod utils;

pub use sentiment_analysis_pipeline::*;

use crate::core::Result;

/// Anything that can score review text against a fixed set of sentiment labels.
///
/// Implementations are loaded once and shared read-only across requests, so
/// `classify` takes `&self` and the trait requires `Send + Sync`.
pub trait SentimentClassifier: Send + Sync {
    /// Returns exactly one [`LabelScoreSet`] per input text, in input order.
    fn classify(&self, batch: &[&str]) -> Result<Vec<LabelScoreSet>>;
}
