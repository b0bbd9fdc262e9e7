use super::model::EntailmentClassificationModel;
use super::pipeline::ZeroShotClassificationPipeline;
use crate::pipelines::cache::ModelOptions;
use crate::pipelines::utils::{
    BasePipelineBuilder, DeviceRequest, DeviceSelectable, StandardPipelineBuilder,
};
use crate::{PipelineError, Result};
use tokenizers::{TruncationParams, TruncationStrategy};

/// Token budget for one (text, hypothesis) pair.
pub(crate) const MAX_PAIR_TOKENS: usize = 512;

/// Builder for creating [`ZeroShotClassificationPipeline`] instances.
///
/// Use [`Self::modernbert`] as the entry point.
pub struct ZeroShotClassificationPipelineBuilder<M: EntailmentClassificationModel>(
    StandardPipelineBuilder<M::Options>,
);

impl<M: EntailmentClassificationModel> DeviceSelectable
    for ZeroShotClassificationPipelineBuilder<M>
{
    fn device_request_mut(&mut self) -> &mut DeviceRequest {
        self.0.device_request_mut()
    }
}

impl<M: EntailmentClassificationModel> ZeroShotClassificationPipelineBuilder<M> {
    pub(crate) fn new(options: M::Options) -> Self {
        Self(StandardPipelineBuilder::new(options))
    }

    /// Builds the pipeline with configured settings.
    ///
    /// # Errors
    ///
    /// Returns an error if model loading or device initialization fails.
    pub fn build(self) -> Result<ZeroShotClassificationPipeline<M>>
    where
        M: Clone + Send + Sync + 'static,
        M::Options: ModelOptions + Clone,
    {
        BasePipelineBuilder::build(self)
    }
}

impl<M: EntailmentClassificationModel> BasePipelineBuilder<M>
    for ZeroShotClassificationPipelineBuilder<M>
where
    M: Clone + Send + Sync + 'static,
    M::Options: ModelOptions + Clone,
{
    type Model = M;
    type Pipeline = ZeroShotClassificationPipeline<M>;
    type Options = M::Options;

    fn options(&self) -> &Self::Options {
        &self.0.options
    }

    fn device_request(&self) -> &DeviceRequest {
        &self.0.device_request
    }

    fn create_model(options: Self::Options, device: candle_core::Device) -> Result<M> {
        M::new(options, device)
    }

    fn get_tokenizer(options: Self::Options) -> Result<tokenizers::Tokenizer> {
        M::get_tokenizer(options)
    }

    fn construct_pipeline(model: M, tokenizer: tokenizers::Tokenizer) -> Result<Self::Pipeline> {
        // When a (text, hypothesis) pair overflows the budget, only the text
        // side is truncated; hypotheses must survive intact.
        let mut tokenizer = tokenizer;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: MAX_PAIR_TOKENS,
                strategy: TruncationStrategy::OnlyFirst,
                ..Default::default()
            }))
            .map_err(|e| PipelineError::Tokenization(e.to_string()))?;
        Ok(ZeroShotClassificationPipeline { model, tokenizer })
    }
}

impl ZeroShotClassificationPipelineBuilder<crate::models::EntailmentModernBertModel> {
    /// Creates a builder for a ModernBERT NLI model.
    pub fn modernbert(size: crate::models::ModernBertSize) -> Self {
        Self::new(size)
    }
}
