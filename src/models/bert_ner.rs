//! BERT token-classification wrapper for the NER pipeline.
//!
//! Uses `candle_transformers::models::bert` for the encoder and loads the
//! checkpoint's classifier head on top. The tag vocabulary (`O`, `B-PER`,
//! `I-PER`, ...) comes from `id2label` in the checkpoint config.

use std::sync::Arc;

use candle_core::{Device, Tensor, D};
use candle_nn::Module;
use candle_transformers::models::bert::{BertModel, Config};
use tokenizers::Tokenizer;

use crate::loaders::{load_model_weights, load_tokenizer, LabelMaps};
use crate::pipelines::ner::model::TokenClassificationModel;
use crate::{PipelineError, Result};

/// Available BERT NER checkpoints.
#[derive(Debug, Clone, Copy)]
pub enum NerBertSize {
    Base,
    Large,
}

impl NerBertSize {
    fn repo_id(self) -> &'static str {
        match self {
            NerBertSize::Base => "dslim/bert-base-NER",
            NerBertSize::Large => "dbmdz/bert-large-cased-finetuned-conll03-english",
        }
    }
}

impl std::fmt::Display for NerBertSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NerBertSize::Base => "bert-ner-base",
            NerBertSize::Large => "bert-ner-large",
        };
        write!(f, "{name}")
    }
}

impl crate::pipelines::cache::ModelOptions for NerBertSize {
    fn cache_key(&self) -> String {
        self.to_string()
    }
}

/// Token-classification model using BERT.
#[derive(Clone)]
pub struct NerBertModel {
    model: Arc<BertModel>,
    classifier: candle_nn::Linear,
    labels: Vec<String>,
    device: Device,
}

impl NerBertModel {
    pub fn new(size: NerBertSize, device: Device) -> Result<Self> {
        let (config_json, vb) = load_model_weights(size.repo_id(), &device)?;
        let config: Config = serde_json::from_str(&config_json)?;

        let labels = LabelMaps::from_config(&config_json)?.ordered_labels()?;
        if labels.is_empty() {
            return Err(PipelineError::ModelMetadata(
                "checkpoint config carries no id2label map".into(),
            ));
        }

        let model = BertModel::load(vb.pp("bert"), &config)?;
        let classifier = candle_nn::linear(config.hidden_size, labels.len(), vb.pp("classifier"))?;

        Ok(Self {
            model: Arc::new(model),
            classifier,
            labels,
            device,
        })
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn get_tokenizer(size: NerBertSize) -> Result<Tokenizer> {
        load_tokenizer(size.repo_id())
    }

    /// Run the encoder plus classifier head and argmax-decode one tag per
    /// position.
    pub fn predict_tags(&self, input_ids: &[u32], attention_mask: &[u32]) -> Result<Vec<String>> {
        let input = Tensor::new(input_ids, &self.device)?.unsqueeze(0)?;
        let token_type_ids = input.zeros_like()?;
        let mask = Tensor::new(attention_mask, &self.device)?.unsqueeze(0)?;

        let hidden = self.model.forward(&input, &token_type_ids, Some(&mask))?;
        let logits = self.classifier.forward(&hidden)?;
        let tag_ids = logits.argmax(D::Minus1)?.squeeze(0)?.to_vec1::<u32>()?;

        tag_ids
            .into_iter()
            .map(|id| {
                self.labels.get(id as usize).cloned().ok_or_else(|| {
                    PipelineError::ModelMetadata(format!("predicted tag id {id} not in id2label"))
                })
            })
            .collect()
    }
}

impl TokenClassificationModel for NerBertModel {
    type Options = NerBertSize;

    fn new(options: Self::Options, device: Device) -> Result<Self> {
        NerBertModel::new(options, device)
    }

    fn predict_tags(&self, input_ids: &[u32], attention_mask: &[u32]) -> Result<Vec<String>> {
        self.predict_tags(input_ids, attention_mask)
    }

    fn get_tokenizer(options: Self::Options) -> Result<Tokenizer> {
        Self::get_tokenizer(options)
    }

    fn device(&self) -> &Device {
        &self.device
    }
}
