use super::model::{SummarizationModel, SummarizationParams};
use crate::pipelines::validation::ensure_min_tokens;
use crate::{PipelineError, Result};
use tokenizers::Tokenizer;

/// Task prefix prepended to every input before encoding.
pub(crate) const TASK_PREFIX: &str = "summarize: ";

/// Encoded inputs are truncated to this many tokens, keeping the head.
pub const MAX_INPUT_TOKENS: usize = 512;

pub struct SummarizationPipeline<M: SummarizationModel> {
    pub(crate) model: M,
    pub(crate) tokenizer: Tokenizer,
    pub(crate) params: SummarizationParams,
}

impl<M: SummarizationModel> SummarizationPipeline<M> {
    /// Summarize a single text.
    ///
    /// Inputs encoding to fewer than ten tokens are rejected with a
    /// validation error before the model runs.
    pub fn summarize(&self, text: &str) -> Result<String> {
        let prompt = format!("{TASK_PREFIX}{text}");
        let encoding = self
            .tokenizer
            .encode(prompt.as_str(), true)
            .map_err(|e| PipelineError::Tokenization(e.to_string()))?;

        let mut input_ids = encoding.get_ids().to_vec();
        input_ids.truncate(MAX_INPUT_TOKENS);
        ensure_min_tokens(&input_ids)?;

        tracing::debug!(input_tokens = input_ids.len(), "generating summary");
        let output_ids = self.model.generate(&input_ids, &self.params)?;

        let decoded = self
            .tokenizer
            .decode(&output_ids, true)
            .map_err(|e| PipelineError::Tokenization(e.to_string()))?;

        Ok(normalize_summary(&decoded))
    }

    /// Summarize a batch of inputs, returning one result per item.
    pub fn summarize_batch(&self, texts: &[&str]) -> Result<Vec<Result<String>>> {
        Ok(texts.iter().map(|text| self.summarize(text)).collect())
    }

    pub fn device(&self) -> &candle_core::Device {
        self.model.device()
    }
}

/// Strip the detokenization artifact that leaves a space before sentence-final
/// periods. Idempotent.
pub(crate) fn normalize_summary(text: &str) -> String {
    text.replace(" .", ".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipelines::test_support::tiny_tokenizer;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Fake model that records invocations and echoes a fixed output.
    #[derive(Clone)]
    struct FixedOutputModel {
        output: Vec<u32>,
        calls: Arc<AtomicUsize>,
        device: candle_core::Device,
    }

    impl SummarizationModel for FixedOutputModel {
        type Options = ();

        fn new(_options: (), device: candle_core::Device) -> crate::Result<Self> {
            Ok(Self {
                output: vec![],
                calls: Arc::new(AtomicUsize::new(0)),
                device,
            })
        }

        fn generate(
            &self,
            _input_ids: &[u32],
            _params: &SummarizationParams,
        ) -> crate::Result<Vec<u32>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.output.clone())
        }

        fn get_tokenizer(_options: ()) -> crate::Result<tokenizers::Tokenizer> {
            Ok(tiny_tokenizer())
        }

        fn device(&self) -> &candle_core::Device {
            &self.device
        }
    }

    fn pipeline_with_output(output: Vec<u32>) -> (SummarizationPipeline<FixedOutputModel>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let model = FixedOutputModel {
            output,
            calls: Arc::clone(&calls),
            device: candle_core::Device::Cpu,
        };
        let pipeline = SummarizationPipeline {
            model,
            tokenizer: tiny_tokenizer(),
            params: SummarizationParams::default(),
        };
        (pipeline, calls)
    }

    #[test]
    fn short_input_is_rejected_without_model_call() {
        let (pipeline, calls) = pipeline_with_output(vec![]);
        // "summarize : short text" encodes to 4 tokens, well under the gate.
        let err = pipeline.summarize("short text").unwrap_err();
        assert_eq!(err.to_string(), "text too short");
        assert!(err.is_validation());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn long_input_reaches_the_model_once() {
        let tokenizer = tiny_tokenizer();
        // Token ids for "the new law passed today ." (trailing " ." artifact).
        let output = tokenizer
            .encode("the new law passed today .", false)
            .unwrap()
            .get_ids()
            .to_vec();
        let (pipeline, calls) = pipeline_with_output(output);

        let text = "the parliament in par passed a new energy law today";
        let summary = pipeline.summarize(text).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(summary, "the new law passed today.");
    }

    #[test]
    fn normalization_removes_space_before_periods() {
        assert_eq!(normalize_summary("a law ."), "a law.");
        assert_eq!(normalize_summary("one . two ."), "one. two.");
        assert_eq!(normalize_summary("untouched."), "untouched.");
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize_summary("a sentence . another .");
        let twice = normalize_summary(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn default_params_match_published_policy() {
        let params = SummarizationParams::default();
        assert_eq!(params.num_beams, 4);
        assert_eq!(params.max_length, 150);
        assert_eq!(params.min_length, 40);
        assert_eq!(params.length_penalty, 2.0);
        assert!(params.early_stopping);
    }
}
