use tokenizers::Tokenizer;

use super::pipeline::LabelScoreSet;
use crate::core::Result;

pub trait SentimentAnalysisModel {
    type Options: std::fmt::Debug + Clone;

    async fn new(options: Self::Options, device: candle_core::Device) -> Result<Self>
    where
        Self: Sized;

    /// Scores every label for each text, in [`labels`](Self::labels) order.
    ///
    /// Fails as a whole: a tokenization or forward-pass error on any text
    /// fails the batch.
    fn predict_scores_batch(&self, tokenizer: &Tokenizer, texts: &[&str])
        -> Result<Vec<LabelScoreSet>>;

    /// Label schema in class-id order.
    fn labels(&self) -> &[String];

    async fn get_tokenizer(options: Self::Options) -> Result<Tokenizer>;

    fn device(&self) -> &candle_core::Device;
}
