use serde::Serialize;
use tokenizers::Tokenizer;

use super::model::SentimentAnalysisModel;
use crate::core::{PipelineError, Result};
use crate::pipelines::SentimentClassifier;

// ============ Output types ============

/// Confidence for one label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f32,
}

/// Scores for every label the model supports, for one text.
///
/// Entries keep the order the classifier produced them in (the model's
/// label schema order), which is what breaks ties in [`LabelScoreSet::top`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LabelScoreSet {
    entries: Vec<LabelScore>,
}

impl LabelScoreSet {
    pub fn new(entries: Vec<LabelScore>) -> Self {
        Self { entries }
    }

    /// Pairs labels with scores positionally.
    pub fn from_scores<S: AsRef<str>>(labels: &[S], scores: &[f32]) -> Self {
        Self::new(
            labels
                .iter()
                .zip(scores)
                .map(|(label, &score)| LabelScore {
                    label: label.as_ref().to_string(),
                    score,
                })
                .collect(),
        )
    }

    /// Highest-scoring entry; the first one wins a tie and NaN never wins.
    pub fn top(&self) -> Option<&LabelScore> {
        let mut best: Option<&LabelScore> = None;
        for entry in self.entries.iter().filter(|e| !e.score.is_nan()) {
            match best {
                Some(current) if entry.score <= current.score => {}
                _ => best = Some(entry),
            }
        }
        best
    }

    pub fn iter(&self) -> impl Iterator<Item = &LabelScore> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A single sentiment prediction with label and confidence score.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// The predicted sentiment, as named by the model (e.g. "positive").
    pub label: String,
    /// Confidence score (0.0 to 1.0).
    pub score: f32,
}

// ============ Pipeline ============

/// Classifies text sentiment (positive, negative, neutral).
///
/// Construct with [`SentimentAnalysisPipelineBuilder`](super::SentimentAnalysisPipelineBuilder).
pub struct SentimentAnalysisPipeline<M: SentimentAnalysisModel> {
    pub(crate) model: M,
    pub(crate) tokenizer: Tokenizer,
    pub(crate) batch_size: usize,
}

impl<M: SentimentAnalysisModel> SentimentAnalysisPipeline<M> {
    /// Score every label for every text, `batch_size` texts per forward pass.
    pub fn classify(&self, texts: &[&str]) -> Result<Vec<LabelScoreSet>> {
        let mut score_sets = Vec::with_capacity(texts.len());
        for (batch_idx, batch) in texts.chunks(self.batch_size.max(1)).enumerate() {
            tracing::debug!(batch = batch_idx, size = batch.len(), "classifying batch");
            let batch_scores = self.model.predict_scores_batch(&self.tokenizer, batch)?;
            if batch_scores.len() != batch.len() {
                return Err(PipelineError::Unexpected(format!(
                    "model returned {} predictions for a batch of {}",
                    batch_scores.len(),
                    batch.len()
                )));
            }
            score_sets.extend(batch_scores);
        }
        Ok(score_sets)
    }

    /// Predict the top label for a single text.
    pub fn predict(&self, text: &str) -> Result<Prediction> {
        let score_set = self
            .model
            .predict_scores_batch(&self.tokenizer, &[text])?
            .pop()
            .ok_or_else(|| PipelineError::Unexpected("No predictions returned".into()))?;
        let top = score_set
            .top()
            .ok_or_else(|| PipelineError::Unexpected("Model returned no label scores".into()))?;
        Ok(Prediction {
            label: top.label.clone(),
            score: top.score,
        })
    }

    pub fn labels(&self) -> &[String] {
        self.model.labels()
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Returns the device (CPU/GPU) the model is running on.
    pub fn device(&self) -> &candle_core::Device {
        self.model.device()
    }
}

impl<M> SentimentClassifier for SentimentAnalysisPipeline<M>
where
    M: SentimentAnalysisModel + Send + Sync,
{
    fn classify(&self, batch: &[&str]) -> Result<Vec<LabelScoreSet>> {
        SentimentAnalysisPipeline::classify(self, batch)
    }
}
