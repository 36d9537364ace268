pub mod core;
mod loaders;
pub mod models;
pub mod pipelines;
pub mod reviews;
pub mod web;

// Re-export core types
pub use core::{AnalysisError, PipelineError, ServeConfig};

// Re-export model types for easier access
pub use models::{ModernBertSize, SentimentModernBertModel};

pub use pipelines::{
    LabelScore, LabelScoreSet, SentimentAnalysisPipeline, SentimentAnalysisPipelineBuilder,
    SentimentClassifier,
};
pub use reviews::{Analyzer, ResultRow, ResultTable};
