//! Startup configuration for the web app.
//!
//! Resolution order: command-line flags, then environment variables (a `.env`
//! file is loaded into the environment before parsing), then defaults.

use clap::Parser;

use crate::models::ModernBertSize;
use crate::pipelines::utils::DeviceRequest;

/// Reviews per forward pass.
pub const DEFAULT_BATCH_SIZE: usize = 16;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "review-sentiment",
    version,
    about = "Analyze customer reviews with a pretrained sentiment model",
    long_about = "Serves a single-page app: paste reviews (one per line) or upload a CSV with a \
                  `review` column, label each review Positive / Negative / Neutral and download \
                  the results as sentiment_results.csv."
)]
pub struct ServeConfig {
    /// Interface to bind the HTTP server to
    #[arg(long, env = "REVIEW_SENTIMENT_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8501)]
    pub port: u16,

    /// ModernBERT sentiment checkpoint to load
    #[arg(
        long,
        env = "REVIEW_SENTIMENT_MODEL_SIZE",
        value_enum,
        default_value_t = ModernBertSize::Base
    )]
    pub model_size: ModernBertSize,

    /// Number of reviews per forward pass
    #[arg(
        long,
        env = "REVIEW_SENTIMENT_BATCH_SIZE",
        default_value_t = DEFAULT_BATCH_SIZE,
        value_parser = parse_batch_size
    )]
    pub batch_size: usize,

    /// Run the model on CPU even when CUDA is available
    #[arg(long, env = "REVIEW_SENTIMENT_CPU")]
    pub cpu: bool,

    /// Run the model on a specific CUDA device
    #[arg(long, env = "REVIEW_SENTIMENT_CUDA_DEVICE", conflicts_with = "cpu")]
    pub cuda_device: Option<usize>,
}

impl ServeConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn device_request(&self) -> DeviceRequest {
        match (self.cpu, self.cuda_device) {
            (true, _) => DeviceRequest::Cpu,
            (false, Some(index)) => DeviceRequest::Cuda(index),
            (false, None) => DeviceRequest::Default,
        }
    }
}

fn parse_batch_size(raw: &str) -> std::result::Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("batch size must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("invalid batch size '{raw}': {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_base_model_and_auto_device() {
        let config = ServeConfig::try_parse_from(["review-sentiment"]).unwrap();
        assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);
        assert!(matches!(config.model_size, ModernBertSize::Base));
        assert!(matches!(config.device_request(), DeviceRequest::Default));
    }

    #[test]
    fn flags_override_defaults() {
        let config = ServeConfig::try_parse_from([
            "review-sentiment",
            "--host",
            "0.0.0.0",
            "--port",
            "9000",
            "--model-size",
            "large",
            "--batch-size",
            "4",
            "--cuda-device",
            "1",
        ])
        .unwrap();

        assert_eq!(config.bind_address(), "0.0.0.0:9000");
        assert_eq!(config.batch_size, 4);
        assert!(matches!(config.model_size, ModernBertSize::Large));
        assert!(matches!(config.device_request(), DeviceRequest::Cuda(1)));
    }

    #[test]
    fn cpu_flag_forces_cpu() {
        let config = ServeConfig::try_parse_from(["review-sentiment", "--cpu"]).unwrap();
        assert!(matches!(config.device_request(), DeviceRequest::Cpu));
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        assert!(ServeConfig::try_parse_from(["review-sentiment", "--batch-size", "0"]).is_err());
    }

    #[test]
    fn cpu_and_cuda_device_conflict() {
        let parsed =
            ServeConfig::try_parse_from(["review-sentiment", "--cpu", "--cuda-device", "0"]);
        assert!(parsed.is_err());
    }
}
