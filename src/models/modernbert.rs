//! ModernBERT sentiment classifier.
//!
//! Wraps `candle-transformers`' sequence-classification head around the
//! `clapAI/modernBERT-*-multilingual-sentiment` checkpoints, whose label schema
//! is `negative`, `neutral`, `positive`.

use std::collections::HashMap;
use std::path::Path;

use candle_core::{DType, Device, Tensor, D};
use candle_nn::{ops::softmax, VarBuilder};
use candle_transformers::models::modernbert::{
    ClassifierConfig, ClassifierPooling, Config,
    ModernBertForSequenceClassification as CandleModernBertForSequenceClassification,
};
use serde::Deserialize;
use tokenizers::Tokenizer;

use crate::core::{PipelineError, Result};
use crate::loaders::{HfLoader, TokenizerLoader, WeightsLoader};
use crate::pipelines::sentiment_analysis_pipeline::{LabelScoreSet, SentimentAnalysisModel};

/// Available ModernBERT model sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ModernBertSize {
    /// Base model (~150M parameters).
    Base,
    /// Large model (~400M parameters).
    Large,
}

impl ModernBertSize {
    pub fn sentiment_repo_id(&self) -> &'static str {
        match self {
            ModernBertSize::Base => "clapAI/modernBERT-base-multilingual-sentiment",
            ModernBertSize::Large => "clapAI/modernBERT-large-multilingual-sentiment",
        }
    }
}

impl std::fmt::Display for ModernBertSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ModernBertSize::Base => "modernbert-base",
            ModernBertSize::Large => "modernbert-large",
        };
        write!(f, "{name}")
    }
}

#[derive(Clone)]
pub struct SentimentModernBertModel {
    model: CandleModernBertForSequenceClassification,
    device: Device,
    labels: Vec<String>,
}

impl SentimentModernBertModel {
    pub async fn new(size: ModernBertSize, device: Device) -> Result<Self> {
        let repo_id = size.sentiment_repo_id();

        let config_path = HfLoader::new(repo_id, "config.json").load().await?;
        let weights_path = WeightsLoader::new(repo_id).load().await?;

        let config_str = std::fs::read_to_string(&config_path)?;
        let mut config: Config = serde_json::from_str(&config_str)?;
        let class_cfg: ClassifierConfigJson = serde_json::from_str(&config_str)?;
        let labels = labels_in_id_order(&class_cfg.id2label)?;
        patch_classifier_config(&mut config, &class_cfg);

        let vb = load_var_builder(&weights_path, &device)?;
        let model = CandleModernBertForSequenceClassification::load(vb, &config)?;

        Ok(Self {
            model,
            device,
            labels,
        })
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn predict_scores_batch(
        &self,
        tokenizer: &Tokenizer,
        texts: &[&str],
    ) -> Result<Vec<LabelScoreSet>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let pad_token_id = tokenizer
            .get_padding()
            .map(|p| p.pad_id)
            .or_else(|| tokenizer.token_to_id("[PAD]"))
            .or_else(|| tokenizer.token_to_id("<pad>"))
            .unwrap_or(0);

        let encodings = texts
            .iter()
            .map(|text| {
                tokenizer.encode(*text, true).map_err(|e| {
                    PipelineError::Tokenization(format!(
                        "Tokenization failed on '{}': {}",
                        text.chars().take(50).collect::<String>(),
                        e
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let max_len = encodings.iter().map(|e| e.len()).max().unwrap_or(0);
        let mut all_token_ids: Vec<u32> = Vec::with_capacity(texts.len() * max_len);
        let mut all_attention_masks: Vec<u32> = Vec::with_capacity(texts.len() * max_len);

        for encoding in &encodings {
            let mut token_ids = encoding.get_ids().to_vec();
            let mut attention_mask = encoding.get_attention_mask().to_vec();
            token_ids.resize(max_len, pad_token_id);
            attention_mask.resize(max_len, 0);
            all_token_ids.extend(token_ids);
            all_attention_masks.extend(attention_mask);
        }

        let input_ids = Tensor::from_vec(all_token_ids, (texts.len(), max_len), &self.device)?;
        let attention_mask =
            Tensor::from_vec(all_attention_masks, (texts.len(), max_len), &self.device)?;

        let logits = self.model.forward(&input_ids, &attention_mask)?;
        let probs = softmax(&logits, D::Minus1)?.to_vec2::<f32>()?;

        probs
            .iter()
            .map(|row| {
                if row.len() != self.labels.len() {
                    return Err(PipelineError::Unexpected(format!(
                        "Model produced {} scores but the label schema has {} labels",
                        row.len(),
                        self.labels.len()
                    )));
                }
                Ok(LabelScoreSet::from_scores(&self.labels, row))
            })
            .collect()
    }

    pub async fn get_tokenizer(size: ModernBertSize) -> Result<Tokenizer> {
        TokenizerLoader::new(size.sentiment_repo_id(), "tokenizer.json")
            .load()
            .await
    }
}

impl SentimentAnalysisModel for SentimentModernBertModel {
    type Options = ModernBertSize;

    async fn new(options: Self::Options, device: Device) -> Result<Self> {
        SentimentModernBertModel::new(options, device).await
    }

    fn predict_scores_batch(
        &self,
        tokenizer: &Tokenizer,
        texts: &[&str],
    ) -> Result<Vec<LabelScoreSet>> {
        self.predict_scores_batch(tokenizer, texts)
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }

    async fn get_tokenizer(options: Self::Options) -> Result<Tokenizer> {
        SentimentModernBertModel::get_tokenizer(options).await
    }

    fn device(&self) -> &Device {
        &self.device
    }
}

#[derive(Deserialize)]
struct ClassifierConfigJson {
    #[serde(default)]
    id2label: HashMap<String, String>,
    #[serde(default)]
    classifier_pooling: Option<String>,
}

/// Orders `id2label` by numeric class id. Ids must be exactly `0..n`.
fn labels_in_id_order(id2label: &HashMap<String, String>) -> Result<Vec<String>> {
    if id2label.is_empty() {
        return Err(PipelineError::Unexpected(
            "Model config has no id2label mapping".to_string(),
        ));
    }

    let mut labels: Vec<Option<String>> = vec![None; id2label.len()];
    for (id, label) in id2label {
        let index: usize = id.parse().map_err(|_| {
            PipelineError::Unexpected(format!("Non-numeric label id '{id}' in id2label"))
        })?;
        let slot = labels.get_mut(index).ok_or_else(|| {
            PipelineError::Unexpected(format!(
                "Label id {index} out of range for {} labels",
                id2label.len()
            ))
        })?;
        *slot = Some(label.clone());
    }

    labels
        .into_iter()
        .enumerate()
        .map(|(i, label)| {
            label.ok_or_else(|| PipelineError::Unexpected(format!("Missing label for id {i}")))
        })
        .collect()
}

fn patch_classifier_config(config: &mut Config, class_cfg: &ClassifierConfigJson) {
    let classifier_pooling = match class_cfg.classifier_pooling.as_deref() {
        Some("mean") => ClassifierPooling::MEAN,
        Some(_) => ClassifierPooling::CLS,
        None => ClassifierPooling::default(),
    };
    let label2id = class_cfg
        .id2label
        .iter()
        .map(|(id, label)| (label.clone(), id.clone()))
        .collect();

    config.classifier_config = Some(ClassifierConfig {
        id2label: class_cfg.id2label.clone(),
        label2id,
        classifier_pooling,
    });
}

fn load_var_builder(weights_path: &Path, device: &Device) -> Result<VarBuilder<'static>> {
    let vb = if weights_path.extension().is_some_and(|e| e == "safetensors") {
        // SAFETY: the hub cache file is not modified while mapped.
        unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)? }
    } else {
        VarBuilder::from_pth(weights_path, DType::F32, device)?
    };
    Ok(vb)
}
