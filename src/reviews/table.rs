//! Verdict selection, result rows and CSV export.

use serde::{Deserialize, Serialize};

use crate::core::AnalysisError;
use crate::pipelines::LabelScoreSet;

/// Download name for exported results.
pub const EXPORT_FILE_NAME: &str = "sentiment_results.csv";
/// MIME type of exported results.
pub const EXPORT_MIME: &str = "text/csv";

/// Highest-confidence label for one review.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub label: String,
    pub confidence: f32,
}

impl Verdict {
    /// Stable max over the score set; `None` when the set has no usable score.
    pub fn from_scores(scores: &LabelScoreSet) -> Option<Self> {
        scores.top().map(|top| Verdict {
            label: top.label.clone(),
            confidence: top.score,
        })
    }
}

/// One line of the results table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    #[serde(rename = "Review")]
    pub review: String,
    #[serde(rename = "Sentiment")]
    pub sentiment: String,
    #[serde(rename = "Confidence")]
    pub confidence: f64,
}

impl ResultRow {
    pub fn new(review: impl Into<String>, verdict: &Verdict) -> Self {
        Self {
            review: review.into(),
            sentiment: capitalize(&verdict.label),
            confidence: round_to_thousandths(verdict.confidence),
        }
    }
}

/// Rows in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultTable {
    rows: Vec<ResultRow>,
}

impl ResultTable {
    pub fn new(rows: Vec<ResultRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Serializes the table as `Review,Sentiment,Confidence` CSV.
    pub fn to_csv(&self) -> Result<ExportedCsv, csv::Error> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        if self.rows.is_empty() {
            writer.write_record(["Review", "Sentiment", "Confidence"])?;
        }
        for row in &self.rows {
            writer.serialize(row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))?;

        Ok(ExportedCsv {
            file_name: EXPORT_FILE_NAME,
            mime: EXPORT_MIME,
            bytes,
        })
    }
}

/// A ready-to-download results file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedCsv {
    pub file_name: &'static str,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

/// Pairs each review with its classifier output and picks the verdict.
///
/// The classifier must return exactly one score set per review.
pub fn format_results(
    reviews: &[String],
    score_sets: &[LabelScoreSet],
) -> Result<ResultTable, AnalysisError> {
    if reviews.len() != score_sets.len() {
        return Err(AnalysisError::ScoreCountMismatch {
            expected: reviews.len(),
            actual: score_sets.len(),
        });
    }

    let rows = reviews
        .iter()
        .zip(score_sets)
        .enumerate()
        .map(|(index, (review, scores))| {
            let verdict =
                Verdict::from_scores(scores).ok_or(AnalysisError::EmptyScoreSet { index })?;
            Ok(ResultRow::new(review.as_str(), &verdict))
        })
        .collect::<Result<Vec<_>, AnalysisError>>()?;

    Ok(ResultTable::new(rows))
}

/// Upper-cases the first character and lower-cases the rest.
pub fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Half-to-even on exact ties.
fn round_to_thousandths(score: f32) -> f64 {
    (f64::from(score) * 1000.0).round_ties_even() / 1000.0
}
