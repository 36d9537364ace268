use super::model::SentimentAnalysisModel;
use super::pipeline::SentimentAnalysisPipeline;
use crate::core::{PipelineError, Result, DEFAULT_BATCH_SIZE};
use crate::pipelines::utils::DeviceRequest;

pub struct SentimentAnalysisPipelineBuilder<M: SentimentAnalysisModel> {
    options: M::Options,
    device_request: DeviceRequest,
    batch_size: usize,
}

impl<M: SentimentAnalysisModel> SentimentAnalysisPipelineBuilder<M> {
    pub fn new(options: M::Options) -> Self {
        Self {
            options,
            device_request: DeviceRequest::Default,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn cpu(mut self) -> Self {
        self.device_request = DeviceRequest::Cpu;
        self
    }

    pub fn cuda_device(mut self, index: usize) -> Self {
        self.device_request = DeviceRequest::Cuda(index);
        self
    }

    pub fn device(mut self, device: candle_core::Device) -> Self {
        self.device_request = DeviceRequest::Explicit(device);
        self
    }

    pub fn device_request(mut self, request: DeviceRequest) -> Self {
        self.device_request = request;
        self
    }

    /// Texts per forward pass. Only affects throughput.
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Downloads (or reuses cached) weights and tokenizer and loads the model.
    ///
    /// Called once at startup; the returned pipeline is meant to be shared.
    pub async fn build(self) -> Result<SentimentAnalysisPipeline<M>> {
        if self.batch_size == 0 {
            return Err(PipelineError::Unexpected(
                "batch size must be at least 1".to_string(),
            ));
        }
        let device = self.device_request.resolve()?;
        tracing::info!(options = ?self.options, ?device, "loading sentiment model");

        let model = M::new(self.options.clone(), device).await?;
        let tokenizer = M::get_tokenizer(self.options).await?;

        tracing::info!(labels = ?model.labels(), batch_size = self.batch_size, "sentiment model ready");
        Ok(SentimentAnalysisPipeline {
            model,
            tokenizer,
            batch_size: self.batch_size,
        })
    }
}

impl SentimentAnalysisPipelineBuilder<crate::models::SentimentModernBertModel> {
    pub fn modernbert(size: crate::models::ModernBertSize) -> Self {
        Self::new(size)
    }
}

#[cfg(test)]
mod tests {
    use candle_core::Device;
    use tokenizers::Tokenizer;

    use super::*;
    use crate::core::AnalysisError;
    use crate::pipelines::LabelScoreSet;

    /// Model whose weights can never be fetched.
    struct OfflineModel {
        labels: Vec<String>,
        device: Device,
    }

    impl SentimentAnalysisModel for OfflineModel {
        type Options = ();

        async fn new(_options: (), _device: Device) -> Result<Self> {
            Err(PipelineError::Download("hub unreachable".to_string()))
        }

        fn predict_scores_batch(
            &self,
            _tokenizer: &Tokenizer,
            texts: &[&str],
        ) -> Result<Vec<LabelScoreSet>> {
            Ok(texts.iter().map(|_| LabelScoreSet::default()).collect())
        }

        fn labels(&self) -> &[String] {
            &self.labels
        }

        async fn get_tokenizer(_options: ()) -> Result<Tokenizer> {
            Ok(Tokenizer::new(tokenizers::models::bpe::BPE::default()))
        }

        fn device(&self) -> &Device {
            &self.device
        }
    }

    async fn load(builder: SentimentAnalysisPipelineBuilder<OfflineModel>) -> AnalysisError {
        match builder.build().await.map_err(AnalysisError::ClassifierLoad) {
            Ok(_) => panic!("pipeline should not load"),
            Err(err) => err,
        }
    }

    #[tokio::test]
    async fn model_load_failure_becomes_classifier_load_error() {
        let err = load(SentimentAnalysisPipelineBuilder::new(()).cpu()).await;

        assert!(matches!(
            err,
            AnalysisError::ClassifierLoad(PipelineError::Download(_))
        ));
        assert_eq!(
            err.to_string(),
            "failed to load sentiment classifier: hub unreachable"
        );
    }

    #[tokio::test]
    async fn zero_batch_size_is_rejected_before_loading() {
        let err = load(SentimentAnalysisPipelineBuilder::new(()).cpu().batch_size(0)).await;

        match err {
            AnalysisError::ClassifierLoad(PipelineError::Unexpected(msg)) => {
                assert!(msg.contains("batch size"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
