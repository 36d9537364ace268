//! Turns raw user input into the list of reviews to analyze.

use crate::core::AnalysisError;

/// Column an uploaded table must carry.
pub const REVIEW_COLUMN: &str = "review";

/// Cell values treated as missing: empty, plus the usual spellings of NA/NaN/null.
const NA_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Where the reviews come from. The two modes are exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Free text, one review per line.
    Text(String),
    /// An uploaded CSV file with a `review` column.
    Csv(Vec<u8>),
    /// Tabular mode was selected but nothing was uploaded.
    NoUpload,
}

impl InputSource {
    pub fn collect(&self) -> Result<Vec<String>, AnalysisError> {
        match self {
            InputSource::Text(text) => Ok(collect_from_text(text)),
            InputSource::Csv(bytes) => collect_from_csv(bytes),
            InputSource::NoUpload => Ok(Vec::new()),
        }
    }
}

/// One review per non-blank line, trimmed, in order.
///
/// Breaks on every Unicode line boundary, not only `\n` and `\r\n`.
pub fn collect_from_text(text: &str) -> Vec<String> {
    text.split(is_line_break)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Values of the `review` column in row order, missing cells dropped.
///
/// Values are returned as written; only free text is trimmed.
pub fn collect_from_csv(bytes: &[u8]) -> Result<Vec<String>, AnalysisError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let column = reader
        .headers()?
        .iter()
        .position(|header| header == REVIEW_COLUMN)
        .ok_or(AnalysisError::Schema {
            column: REVIEW_COLUMN,
        })?;

    let mut reviews = Vec::new();
    for record in reader.records() {
        let record = record?;
        match record.get(column) {
            Some(value) if !is_missing(value) => reviews.push(value.to_string()),
            _ => {}
        }
    }

    tracing::debug!(count = reviews.len(), "collected reviews from CSV upload");
    Ok(reviews)
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c'..='\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

fn is_missing(value: &str) -> bool {
    NA_MARKERS.contains(&value)
}
