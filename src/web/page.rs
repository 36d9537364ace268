//! What the single page shows, and how it is rendered.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use minijinja::Environment;
use serde::Serialize;

use crate::core::AnalysisError;
use crate::reviews::{ResultRow, ResultTable};

const INDEX_TEMPLATE: &str = "index.html";

/// Which input widget is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    #[default]
    Text,
    Csv,
}

impl InputMode {
    pub fn from_form_value(value: &str) -> Self {
        match value.trim() {
            "csv" => InputMode::Csv,
            _ => InputMode::Text,
        }
    }
}

/// Inline download link for the exported CSV.
#[derive(Debug, Clone, Serialize)]
pub struct DownloadLink {
    pub file_name: &'static str,
    pub href: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultsView {
    pub count: usize,
    pub rows: Vec<ResultRow>,
    pub download: DownloadLink,
}

/// Everything the template needs for one response.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageView {
    pub mode: InputMode,
    /// Textarea contents echoed back after a submit.
    pub text: String,
    /// Problem with the uploaded file, shown under the input widgets.
    pub input_error: Option<String>,
    /// Nothing to analyze.
    pub warning: Option<String>,
    /// Analysis failed.
    pub error: Option<String>,
    pub results: Option<ResultsView>,
}

impl PageView {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn with_input(mode: InputMode, text: String) -> Self {
        Self {
            mode,
            text,
            ..Self::default()
        }
    }

    /// Records a rejected upload (missing column, unreadable file).
    pub fn reject_input(&mut self, err: &AnalysisError) {
        self.input_error = Some(err.to_string());
    }

    /// Applies the result of an analysis request.
    pub fn apply_outcome(
        &mut self,
        outcome: Result<ResultTable, AnalysisError>,
    ) -> Result<(), csv::Error> {
        match outcome {
            Ok(table) => self.results = Some(ResultsView::from_table(&table)?),
            Err(err @ AnalysisError::EmptyInput) => self.warning = Some(err.to_string()),
            Err(err) if err.is_input_error() => self.reject_input(&err),
            Err(err) => self.error = Some(err.to_string()),
        }
        Ok(())
    }
}

impl ResultsView {
    pub fn from_table(table: &ResultTable) -> Result<Self, csv::Error> {
        let export = table.to_csv()?;
        let href = format!(
            "data:{};charset=utf-8;base64,{}",
            export.mime,
            BASE64.encode(&export.bytes)
        );
        Ok(Self {
            count: table.len(),
            rows: table.rows().to_vec(),
            download: DownloadLink {
                file_name: export.file_name,
                href,
            },
        })
    }
}

/// Compiled page templates, shared by all workers.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(INDEX_TEMPLATE, include_str!("../../templates/index.html"))?;
        Ok(Self { env })
    }

    pub fn render(&self, page: &PageView) -> Result<String, minijinja::Error> {
        self.env.get_template(INDEX_TEMPLATE)?.render(page)
    }
}
