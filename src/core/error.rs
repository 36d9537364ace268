//! Error types for this crate.
//!
//! Model loading and inference return [`Result<T>`], which uses [`PipelineError`].
//! The review workflow on top of it reports [`AnalysisError`], whose variants map
//! one-to-one onto what the user is shown.

use thiserror::Error;

/// A [`Result`](std::result::Result) alias using [`PipelineError`] as the error type.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Failures raised while loading or running a sentiment model.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PipelineError {
    /// Network or download failure.
    #[error("{0}")]
    Download(String),

    /// Tokenizer could not be loaded or could not encode the input.
    #[error("{0}")]
    Tokenization(String),

    /// Requested device is not available.
    #[error("{0}")]
    Device(String),

    /// Anything else coming out of the model stack.
    #[error("{0}")]
    Unexpected(String),
}

impl From<hf_hub::api::tokio::ApiError> for PipelineError {
    fn from(value: hf_hub::api::tokio::ApiError) -> Self {
        PipelineError::Download(format!("HuggingFace API error: {value}"))
    }
}

impl From<candle_core::Error> for PipelineError {
    fn from(value: candle_core::Error) -> Self {
        PipelineError::Unexpected(value.to_string())
    }
}

impl From<std::io::Error> for PipelineError {
    fn from(value: std::io::Error) -> Self {
        PipelineError::Unexpected(value.to_string())
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(value: serde_json::Error) -> Self {
        PipelineError::Unexpected(value.to_string())
    }
}

/// Outcome of a rejected analysis request.
///
/// `Schema`, `Csv` and `EmptyInput` are user errors and never reach the
/// classifier. `ClassifierLoad` only happens at startup and is fatal.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Uploaded table lacks the required column.
    #[error("CSV must contain a column named '{column}'.")]
    Schema { column: &'static str },

    /// Uploaded table could not be parsed.
    #[error("Could not read the uploaded CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Analysis triggered with zero collected reviews.
    #[error("Please enter at least one review or upload a valid CSV.")]
    EmptyInput,

    /// The classifier could not be constructed.
    #[error("failed to load sentiment classifier: {0}")]
    ClassifierLoad(#[source] PipelineError),

    /// Inference failed for the batch; no partial results are kept.
    #[error("sentiment analysis failed: {0}")]
    Classification(#[source] PipelineError),

    /// The classifier broke its one-score-set-per-review contract.
    #[error("classifier returned {actual} score sets for {expected} reviews")]
    ScoreCountMismatch { expected: usize, actual: usize },

    /// A score set with no labels cannot produce a verdict.
    #[error("classifier returned no label scores for review #{index}")]
    EmptyScoreSet { index: usize },
}

impl AnalysisError {
    /// Whether the error belongs to the input column of the page (as opposed
    /// to the results column).
    pub fn is_input_error(&self) -> bool {
        matches!(self, AnalysisError::Schema { .. } | AnalysisError::Csv(_))
    }
}
