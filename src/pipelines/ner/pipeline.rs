use super::model::TokenClassificationModel;
use super::spans::{merge_fragments, EntitySpan};
use crate::pipelines::validation::ensure_min_tokens;
use crate::{PipelineError, Result};
use tokenizers::Tokenizer;

pub struct NerPipeline<M: TokenClassificationModel> {
    pub(crate) model: M,
    pub(crate) tokenizer: Tokenizer,
}

impl<M: TokenClassificationModel> NerPipeline<M> {
    /// Extract entity spans from a text.
    ///
    /// Fragments are derived from an encode→decode round-trip of the input,
    /// which canonicalizes tokenizer-specific casing and spacing; the model
    /// scores the original text directly. Both sequences are walked together
    /// to merge sub-word fragments into entities.
    pub fn extract(&self, text: &str) -> Result<Vec<EntitySpan>> {
        let fragments = self.normalized_fragments(text)?;

        let scored = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| PipelineError::Tokenization(e.to_string()))?;
        ensure_min_tokens(scored.get_ids())?;

        tracing::debug!(positions = scored.get_ids().len(), "scoring tags");
        let tags = self
            .model
            .predict_tags(scored.get_ids(), scored.get_attention_mask())?;

        // Fragments carry no special tokens, so drop the tags predicted for
        // [CLS]/[SEP] positions before zipping.
        let content_tags: Vec<String> = tags
            .into_iter()
            .zip(scored.get_special_tokens_mask().iter())
            .filter(|(_, mask)| **mask == 0)
            .map(|(tag, _)| tag)
            .collect();

        Ok(merge_fragments(&fragments, &content_tags))
    }

    /// Extract entities for a batch of inputs, returning one result per item.
    pub fn extract_batch(&self, texts: &[&str]) -> Result<Vec<Result<Vec<EntitySpan>>>> {
        Ok(texts.iter().map(|text| self.extract(text)).collect())
    }

    pub fn device(&self) -> &candle_core::Device {
        self.model.device()
    }

    /// Round-trip the text through encode→decode and re-tokenize, yielding
    /// the fragment sequence the span merger consumes.
    fn normalized_fragments(&self, text: &str) -> Result<Vec<String>> {
        let raw = self
            .tokenizer
            .encode(text, false)
            .map_err(|e| PipelineError::Tokenization(e.to_string()))?;
        let normalized = self
            .tokenizer
            .decode(raw.get_ids(), true)
            .map_err(|e| PipelineError::Tokenization(e.to_string()))?;
        let encoding = self
            .tokenizer
            .encode(normalized.as_str(), false)
            .map_err(|e| PipelineError::Tokenization(e.to_string()))?;
        Ok(encoding.get_tokens().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipelines::test_support::tiny_tokenizer;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Fake scorer that returns a preset tag sequence, padded with `O`.
    #[derive(Clone)]
    struct PresetTagsModel {
        tags: Vec<&'static str>,
        calls: Arc<AtomicUsize>,
        device: candle_core::Device,
    }

    impl TokenClassificationModel for PresetTagsModel {
        type Options = ();

        fn new(_options: (), device: candle_core::Device) -> crate::Result<Self> {
            Ok(Self {
                tags: vec![],
                calls: Arc::new(AtomicUsize::new(0)),
                device,
            })
        }

        fn predict_tags(
            &self,
            input_ids: &[u32],
            _attention_mask: &[u32],
        ) -> crate::Result<Vec<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok((0..input_ids.len())
                .map(|i| self.tags.get(i).copied().unwrap_or("O").to_string())
                .collect())
        }

        fn get_tokenizer(_options: ()) -> crate::Result<tokenizers::Tokenizer> {
            Ok(tiny_tokenizer())
        }

        fn device(&self) -> &candle_core::Device {
            &self.device
        }
    }

    fn pipeline_with_tags(
        tags: Vec<&'static str>,
    ) -> (NerPipeline<PresetTagsModel>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let model = PresetTagsModel {
            tags,
            calls: Arc::clone(&calls),
            device: candle_core::Device::Cpu,
        };
        let pipeline = NerPipeline {
            model,
            tokenizer: tiny_tokenizer(),
        };
        (pipeline, calls)
    }

    #[test]
    fn short_input_is_rejected_without_model_call() {
        let (pipeline, calls) = pipeline_with_tags(vec![]);
        let err = pipeline.extract("short text").unwrap_err();
        assert_eq!(err.to_string(), "text too short");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn merges_subword_entity_end_to_end() {
        // "paris" is out of vocab as a whole word and splits into par + ##is.
        let text = "the parliament in paris passed a new energy law today";
        let tags = vec![
            "O", "B-ORG", "O", "B-LOC", "I-LOC", "O", "O", "O", "O", "O", "O",
        ];
        let (pipeline, calls) = pipeline_with_tags(tags);

        let spans = pipeline.extract(text).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].text, "parliament");
        assert_eq!(spans[0].tag, "B-ORG");
        assert_eq!(spans[1].text, "paris");
        assert_eq!(spans[1].tag, "I-LOC");
    }

    #[test]
    fn round_trip_is_stable() {
        let tokenizer = tiny_tokenizer();
        let text = "the parliament in paris passed a new energy law today";

        let first = tokenizer.encode(text, false).unwrap().get_ids().to_vec();
        let normalized = tokenizer.decode(&first, true).unwrap();
        let second = tokenizer
            .encode(normalized.as_str(), false)
            .unwrap()
            .get_ids()
            .to_vec();
        let renormalized = tokenizer.decode(&second, true).unwrap();
        let third = tokenizer
            .encode(renormalized.as_str(), false)
            .unwrap()
            .get_ids()
            .to_vec();

        assert_eq!(second, third);
    }
}
