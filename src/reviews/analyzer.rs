use std::sync::Arc;

use super::table::{format_results, ResultTable};
use crate::core::AnalysisError;
use crate::pipelines::SentimentClassifier;

/// Runs collected reviews through a shared classifier.
///
/// The classifier is built once at startup and handed in here; every request
/// borrows it read-only.
#[derive(Clone)]
pub struct Analyzer {
    classifier: Arc<dyn SentimentClassifier>,
}

impl Analyzer {
    pub fn new(classifier: Arc<dyn SentimentClassifier>) -> Self {
        Self { classifier }
    }

    /// Handles one "Analyze Sentiment" action.
    ///
    /// Zero reviews is rejected before the classifier is touched. Any
    /// classifier failure fails the whole request.
    pub fn on_analyze_requested(&self, reviews: &[String]) -> Result<ResultTable, AnalysisError> {
        if reviews.is_empty() {
            tracing::warn!("analysis requested with no reviews");
            return Err(AnalysisError::EmptyInput);
        }

        let batch: Vec<&str> = reviews.iter().map(String::as_str).collect();
        let score_sets = self.classifier.classify(&batch).map_err(|e| {
            tracing::error!(error = %e, count = reviews.len(), "sentiment classification failed");
            AnalysisError::Classification(e)
        })?;

        let table = format_results(reviews, &score_sets)?;
        tracing::info!(count = table.len(), "analyzed reviews");
        Ok(table)
    }
}
