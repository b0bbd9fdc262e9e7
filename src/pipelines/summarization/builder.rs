use super::model::{SummarizationModel, SummarizationParams};
use super::pipeline::SummarizationPipeline;
use crate::pipelines::cache::ModelOptions;
use crate::pipelines::utils::{
    BasePipelineBuilder, DeviceRequest, DeviceSelectable, StandardPipelineBuilder,
};
use crate::Result;

/// Builder for creating [`SummarizationPipeline`] instances.
///
/// Use [`Self::t5`] as the entry point. Decoding policy (beam count, length
/// bounds, length penalty) is fixed and not configurable here.
pub struct SummarizationPipelineBuilder<M: SummarizationModel>(
    StandardPipelineBuilder<M::Options>,
);

impl<M: SummarizationModel> DeviceSelectable for SummarizationPipelineBuilder<M> {
    fn device_request_mut(&mut self) -> &mut DeviceRequest {
        self.0.device_request_mut()
    }
}

impl<M: SummarizationModel> SummarizationPipelineBuilder<M> {
    pub(crate) fn new(options: M::Options) -> Self {
        Self(StandardPipelineBuilder::new(options))
    }

    /// Builds the pipeline with configured settings.
    ///
    /// # Errors
    ///
    /// Returns an error if model loading or device initialization fails.
    pub fn build(self) -> Result<SummarizationPipeline<M>>
    where
        M: Clone + Send + Sync + 'static,
        M::Options: ModelOptions + Clone,
    {
        BasePipelineBuilder::build(self)
    }
}

impl<M: SummarizationModel> BasePipelineBuilder<M> for SummarizationPipelineBuilder<M>
where
    M: Clone + Send + Sync + 'static,
    M::Options: ModelOptions + Clone,
{
    type Model = M;
    type Pipeline = SummarizationPipeline<M>;
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
        Ok(SummarizationPipeline {
            model,
            tokenizer,
            params: SummarizationParams::default(),
        })
    }
}

impl SummarizationPipelineBuilder<crate::models::SummarizationT5Model> {
    /// Creates a builder for a T5 summarization model.
    pub fn t5(size: crate::models::T5Size) -> Self {
        Self::new(size)
    }
}
