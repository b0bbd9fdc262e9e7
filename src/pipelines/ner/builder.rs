use super::model::TokenClassificationModel;
use super::pipeline::NerPipeline;
use crate::pipelines::cache::ModelOptions;
use crate::pipelines::utils::{
    BasePipelineBuilder, DeviceRequest, DeviceSelectable, StandardPipelineBuilder,
};
use crate::Result;

/// Builder for creating [`NerPipeline`] instances.
///
/// Use [`Self::bert`] as the entry point.
pub struct NerPipelineBuilder<M: TokenClassificationModel>(StandardPipelineBuilder<M::Options>);

impl<M: TokenClassificationModel> DeviceSelectable for NerPipelineBuilder<M> {
    fn device_request_mut(&mut self) -> &mut DeviceRequest {
        self.0.device_request_mut()
    }
}

impl<M: TokenClassificationModel> NerPipelineBuilder<M> {
    pub(crate) fn new(options: M::Options) -> Self {
        Self(StandardPipelineBuilder::new(options))
    }

    /// Builds the pipeline with configured settings.
    ///
    /// # Errors
    ///
    /// Returns an error if model loading or device initialization fails.
    pub fn build(self) -> Result<NerPipeline<M>>
    where
        M: Clone + Send + Sync + 'static,
        M::Options: ModelOptions + Clone,
    {
        BasePipelineBuilder::build(self)
    }
}

impl<M: TokenClassificationModel> BasePipelineBuilder<M> for NerPipelineBuilder<M>
where
    M: Clone + Send + Sync + 'static,
    M::Options: ModelOptions + Clone,
{
    type Model = M;
    type Pipeline = NerPipeline<M>;
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
        Ok(NerPipeline { model, tokenizer })
    }
}

impl NerPipelineBuilder<crate::models::NerBertModel> {
    /// Creates a builder for a BERT token-classification model.
    pub fn bert(size: crate::models::NerBertSize) -> Self {
        Self::new(size)
    }
}
