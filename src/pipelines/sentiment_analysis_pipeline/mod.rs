//! Sentiment analysis pipeline for classifying the emotional tone of text.
//!
//! Scores each input against every label of a pretrained sequence classifier
//! (positive, negative, neutral) and keeps the full score set, so callers can
//! pick a verdict with their own tie-breaking rules.
//!
//! ## Main Types
//!
//! - [`SentimentAnalysisPipeline`] - High-level interface for sentiment classification
//! - [`SentimentAnalysisPipelineBuilder`] - Builder pattern for pipeline configuration
//! - [`SentimentAnalysisModel`] - Trait for sentiment analysis model implementations
//! - [`ModernBertSize`] - Available model size options
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use review_sentiment::pipelines::sentiment_analysis_pipeline::*;
//!
//! # async fn run() -> review_sentiment::core::Result<()> {
//! let pipeline = SentimentAnalysisPipelineBuilder::modernbert(ModernBertSize::Base)
//!     .build()
//!     .await?;
//!
//! let scores = pipeline.classify(&["Great quality!", "Broke in a week."])?;
//! for set in &scores {
//!     let top = set.top().expect("model scores every label");
//!     println!("{} ({:.3})", top.label, top.score);
//! }
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod model;
pub mod pipeline;

pub use builder::SentimentAnalysisPipelineBuilder;
pub use model::SentimentAnalysisModel;
pub use pipeline::{LabelScore, LabelScoreSet, Prediction, SentimentAnalysisPipeline};

pub use crate::models::ModernBertSize;
