//! The review-to-result workflow: collect reviews, classify them, format and
//! export the verdicts.
//!
//! ```rust
//! use std::sync::Arc;
//! use review_sentiment::core::Result;
//! use review_sentiment::pipelines::{LabelScoreSet, SentimentClassifier};
//! use review_sentiment::reviews::{collect_from_text, Analyzer};
//!
//! struct AlwaysPositive;
//!
//! impl SentimentClassifier for AlwaysPositive {
//!     fn classify(&self, batch: &[&str]) -> Result<Vec<LabelScoreSet>> {
//!         Ok(batch
//!             .iter()
//!             .map(|_| LabelScoreSet::from_scores(&["negative", "positive"], &[0.1, 0.9]))
//!             .collect())
//!     }
//! }
//!
//! let reviews = collect_from_text("Great quality!\n\nArrived quickly.");
//! let table = Analyzer::new(Arc::new(AlwaysPositive))
//!     .on_analyze_requested(&reviews)
//!     .unwrap();
//!
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.rows()[0].sentiment, "Positive");
//! ```

pub mod analyzer;
pub mod input;
pub mod table;

pub use analyzer::Analyzer;
pub use input::{collect_from_csv, collect_from_text, InputSource, REVIEW_COLUMN};
pub use table::{
    capitalize, format_results, ExportedCsv, ResultRow, ResultTable, Verdict, EXPORT_FILE_NAME,
    EXPORT_MIME,
};
