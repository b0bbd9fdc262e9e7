//! ModernBERT NLI wrapper for the zero-shot categorization pipeline.
//!
//! Uses `candle_transformers::models::modernbert` for the underlying
//! implementation. Each candidate label is scored through a softmax over its
//! entailment and contradiction logits alone (the neutral class, when the
//! head has one, is discarded), so scores are independent across labels.

use std::collections::HashMap;

use candle_core::{Device, IndexOp, Tensor, D};
use candle_nn::ops::softmax;
use candle_transformers::models::modernbert::{
    Config, ModernBertForSequenceClassification as CandleModernBertForSequenceClassification,
};
use tokenizers::Tokenizer;

use crate::loaders::{load_model_weights, load_tokenizer, LabelMaps};
use crate::pipelines::zero_shot::model::{hypothesis_for, EntailmentClassificationModel};
use crate::{PipelineError, Result};

/// MNLI index convention, used when the checkpoint config omits `label2id`.
const ENTAILMENT_INDEX: u32 = 0;
const CONTRADICTION_INDEX: u32 = 2;

/// Available ModernBERT model sizes.
#[derive(Debug, Clone, Copy)]
pub enum ModernBertSize {
    Base,
    Large,
}

impl ModernBertSize {
    fn repo_id(self) -> &'static str {
        match self {
            ModernBertSize::Base => "MoritzLaurer/ModernBERT-base-zeroshot-v2.0",
            ModernBertSize::Large => "MoritzLaurer/ModernBERT-large-zeroshot-v2.0",
        }
    }
}

impl std::fmt::Display for ModernBertSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ModernBertSize::Base => "modernbert-nli-base",
            ModernBertSize::Large => "modernbert-nli-large",
        };
        write!(f, "{name}")
    }
}

impl crate::pipelines::cache::ModelOptions for ModernBertSize {
    fn cache_key(&self) -> String {
        self.to_string()
    }
}

/// NLI entailment model using ModernBERT.
#[derive(Clone)]
pub struct EntailmentModernBertModel {
    model: CandleModernBertForSequenceClassification,
    device: Device,
    entailment_index: u32,
    contradiction_index: u32,
}

impl EntailmentModernBertModel {
    pub fn new(size: ModernBertSize, device: Device) -> Result<Self> {
        let (config_json, vb) = load_model_weights(size.repo_id(), &device)?;
        let config: Config = serde_json::from_str(&config_json)?;
        let label2id = LabelMaps::from_config(&config_json)?.label2id;

        let (entailment_index, contradiction_index) = nli_indices(&label2id);
        let model = CandleModernBertForSequenceClassification::load(vb, &config)?;

        Ok(Self {
            model,
            device,
            entailment_index,
            contradiction_index,
        })
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn get_tokenizer(size: ModernBertSize) -> Result<Tokenizer> {
        load_tokenizer(size.repo_id())
    }

    /// Score every (text, hypothesis) pair in one batched forward pass and
    /// keep each label's entailment probability.
    pub fn predict(
        &self,
        tokenizer: &Tokenizer,
        text: &str,
        candidate_labels: &[&str],
    ) -> Result<Vec<(String, f32)>> {
        if candidate_labels.is_empty() {
            return Ok(vec![]);
        }

        let mut encodings = Vec::with_capacity(candidate_labels.len());
        for &label in candidate_labels {
            let hypothesis = hypothesis_for(label);
            let encoding = tokenizer
                .encode((text, hypothesis.as_str()), true)
                .map_err(|e| PipelineError::Tokenization(e.to_string()))?;
            encodings.push(encoding);
        }

        // Pad every pair to the longest one in this request.
        let max_len = encodings.iter().map(|e| e.len()).max().unwrap_or(0);
        let pad_token_id = tokenizer
            .get_padding()
            .map(|p| p.pad_id)
            .or_else(|| tokenizer.token_to_id("<pad>"))
            .or_else(|| tokenizer.token_to_id("[PAD]"))
            .unwrap_or(0);

        let mut all_token_ids: Vec<u32> = Vec::with_capacity(candidate_labels.len() * max_len);
        let mut all_attention_masks: Vec<u32> = Vec::with_capacity(candidate_labels.len() * max_len);
        for encoding in encodings {
            let mut token_ids = encoding.get_ids().to_vec();
            let mut attention_mask = encoding.get_attention_mask().to_vec();
            token_ids.resize(max_len, pad_token_id);
            attention_mask.resize(max_len, 0);
            all_token_ids.extend(token_ids);
            all_attention_masks.extend(attention_mask);
        }

        let input_ids = Tensor::from_vec(
            all_token_ids,
            (candidate_labels.len(), max_len),
            &self.device,
        )?;
        let attention_mask = Tensor::from_vec(
            all_attention_masks,
            (candidate_labels.len(), max_len),
            &self.device,
        )?;

        tracing::debug!(
            labels = candidate_labels.len(),
            pair_len = max_len,
            "scoring entailment batch"
        );
        let logits = self.model.forward(&input_ids, &attention_mask)?;

        // Keep only the [contradiction, entailment] columns and softmax the
        // pair; column 1 is the entailment probability.
        let pair_columns = Tensor::new(
            &[self.contradiction_index, self.entailment_index],
            &self.device,
        )?;
        let two_way = logits.index_select(&pair_columns, 1)?;
        let probabilities = softmax(&two_way, D::Minus1)?;
        let entailment_probs = probabilities.i((.., 1))?.to_vec1::<f32>()?;

        Ok(candidate_labels
            .iter()
            .map(|&l| l.to_string())
            .zip(entailment_probs)
            .collect())
    }
}

/// Resolve the entailment/contradiction class indices from a checkpoint's
/// `label2id`. Two-class heads name the negative class `not_entailment`;
/// missing maps fall back to the MNLI convention.
fn nli_indices(label2id: &HashMap<String, u32>) -> (u32, u32) {
    let entailment = label2id
        .get("entailment")
        .copied()
        .unwrap_or(ENTAILMENT_INDEX);
    let contradiction = label2id
        .get("contradiction")
        .or_else(|| label2id.get("not_entailment"))
        .copied()
        .unwrap_or(CONTRADICTION_INDEX);
    (entailment, contradiction)
}

impl EntailmentClassificationModel for EntailmentModernBertModel {
    type Options = ModernBertSize;

    fn new(options: Self::Options, device: Device) -> Result<Self> {
        EntailmentModernBertModel::new(options, device)
    }

    fn predict(
        &self,
        tokenizer: &Tokenizer,
        text: &str,
        candidate_labels: &[&str],
    ) -> Result<Vec<(String, f32)>> {
        self.predict(tokenizer, text, candidate_labels)
    }

    fn get_tokenizer(options: Self::Options) -> Result<Tokenizer> {
        Self::get_tokenizer(options)
    }

    fn device(&self) -> &Device {
        &self.device
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_default_to_mnli_convention() {
        let (ent, contra) = nli_indices(&HashMap::new());
        assert_eq!(ent, 0);
        assert_eq!(contra, 2);
    }

    #[test]
    fn indices_follow_three_class_label2id() {
        let map = HashMap::from([
            ("contradiction".to_string(), 0u32),
            ("neutral".to_string(), 1u32),
            ("entailment".to_string(), 2u32),
        ]);
        assert_eq!(nli_indices(&map), (2, 0));
    }

    #[test]
    fn indices_accept_two_class_heads() {
        let map = HashMap::from([
            ("entailment".to_string(), 0u32),
            ("not_entailment".to_string(), 1u32),
        ]);
        assert_eq!(nli_indices(&map), (0, 1));
    }
}
