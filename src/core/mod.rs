pub mod config;
pub mod error;

pub use config::{ServeConfig, DEFAULT_BATCH_SIZE};
pub use error::{AnalysisError, PipelineError, Result};
