//! Hugging Face Hub loaders for sentiment model assets.
//!
//! - [`HfLoader`] - downloads (or reuses the local cache of) a single repo file
//! - [`TokenizerLoader`] - loads `tokenizer.json`
//! - [`WeightsLoader`] - resolves the weight file, preferring safetensors
//!
//! Downloads retry with exponential backoff when the Hub cache lock is held by
//! another process.

use std::path::PathBuf;
use std::time::Duration;

use tokenizers::Tokenizer;

use crate::core::{PipelineError, Result};

const MAX_RETRIES: u32 = 3;

#[derive(Debug, Clone)]
pub struct HfLoader {
    pub repo: String,
    pub filename: String,
}

impl HfLoader {
    pub fn new(repo: &str, filename: &str) -> Self {
        Self {
            repo: repo.into(),
            filename: filename.into(),
        }
    }

    pub async fn load(&self) -> Result<PathBuf> {
        let hf_api = hf_hub::api::tokio::ApiBuilder::new()
            .with_chunk_size(None)
            .build()
            .map_err(|e| {
                PipelineError::Download(format!("Failed to initialize HuggingFace API: {e}"))
            })?;
        let hf_api = hf_api.model(self.repo.clone());

        let mut attempts = 0u32;
        for attempt in 0..MAX_RETRIES {
            attempts = attempt + 1;
            match hf_api.get(self.filename.as_str()).await {
                Ok(path) => {
                    tracing::debug!(repo = %self.repo, file = %self.filename, path = %path.display(), "resolved hub file");
                    return Ok(path);
                }
                Err(e) => {
                    let error_msg = e.to_string();
                    if error_msg.contains("Lock acquisition failed") && attempt < MAX_RETRIES - 1 {
                        let wait_time = Duration::from_millis(100 * (1 << attempt));
                        tracing::warn!(repo = %self.repo, file = %self.filename, ?wait_time, "hub cache locked, retrying");
                        tokio::time::sleep(wait_time).await;
                        continue;
                    }
                    return Err(PipelineError::Download(format!(
                        "Failed to download '{}' from '{}': {}",
                        self.filename, self.repo, error_msg
                    )));
                }
            }
        }

        Err(PipelineError::Download(format!(
            "Download timed out for '{}' from '{}' after {} attempt(s)",
            self.filename, self.repo, attempts
        )))
    }
}

#[derive(Clone)]
pub struct TokenizerLoader {
    pub tokenizer_file_loader: HfLoader,
}

impl TokenizerLoader {
    pub fn new(repo: &str, filename: &str) -> Self {
        Self {
            tokenizer_file_loader: HfLoader::new(repo, filename),
        }
    }

    pub async fn load(&self) -> Result<Tokenizer> {
        let tokenizer_file_path = self.tokenizer_file_loader.load().await?;

        Tokenizer::from_file(&tokenizer_file_path).map_err(|e| {
            PipelineError::Tokenization(format!(
                "Failed to load tokenizer from '{}': {}",
                tokenizer_file_path.display(),
                e
            ))
        })
    }
}

/// Resolves model weights, trying `model.safetensors` before `pytorch_model.bin`.
#[derive(Clone)]
pub struct WeightsLoader {
    pub safetensors_loader: HfLoader,
    pub pytorch_loader: HfLoader,
}

impl WeightsLoader {
    pub fn new(repo: &str) -> Self {
        Self {
            safetensors_loader: HfLoader::new(repo, "model.safetensors"),
            pytorch_loader: HfLoader::new(repo, "pytorch_model.bin"),
        }
    }

    pub async fn load(&self) -> Result<PathBuf> {
        match self.safetensors_loader.load().await {
            Ok(path) => Ok(path),
            Err(safetensors_err) => {
                tracing::debug!(%safetensors_err, "no safetensors weights, trying pytorch_model.bin");
                self.pytorch_loader.load().await.map_err(|e| {
                    PipelineError::Download(format!(
                        "Model weights not found in '{}'. Expected `model.safetensors` or `pytorch_model.bin`: {e}",
                        self.safetensors_loader.repo
                    ))
                })
            }
        }
    }
}
