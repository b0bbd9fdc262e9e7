//! Loading utilities for Hugging Face Hub artifacts.
//!
//! Every pipeline needs three files from its model repository: `config.json`,
//! the weights (`model.safetensors`, with a `pytorch_model.bin` fallback), and
//! `tokenizer.json`. The loaders here fetch them through the hub cache and
//! retry on transient lock-acquisition failures.

use std::path::PathBuf;

use candle_core::{DType, Device};
use candle_nn::VarBuilder;
use hf_hub::{api::sync::Api, Repo, RepoType};
use serde::Deserialize;
use std::collections::HashMap;
use tokenizers::Tokenizer;

use crate::{PipelineError, Result};

const MAX_DOWNLOAD_RETRIES: usize = 3;

/// Fetch a single file from a model repository, retrying when the hub cache
/// lock is contended (several pipelines may resolve the same repo at once).
pub fn fetch_file(repo_id: &str, filename: &str) -> Result<PathBuf> {
    let api = Api::new()?;
    let repo = api.repo(Repo::new(repo_id.to_string(), RepoType::Model));

    let mut last_error = None;
    for attempt in 0..MAX_DOWNLOAD_RETRIES {
        match repo.get(filename) {
            Ok(path) => return Ok(path),
            Err(e) => {
                let message = e.to_string();
                if message.contains("Lock acquisition failed") && attempt < MAX_DOWNLOAD_RETRIES - 1
                {
                    std::thread::sleep(std::time::Duration::from_millis(100 * (1 << attempt)));
                    last_error = Some(PipelineError::Download(message));
                    continue;
                }
                return Err(PipelineError::Download(message));
            }
        }
    }
    Err(last_error.unwrap_or_else(|| PipelineError::Download("unknown failure".to_string())))
}

/// Load a tokenizer from a repository's `tokenizer.json`.
pub fn load_tokenizer(repo_id: &str) -> Result<Tokenizer> {
    let path = fetch_file(repo_id, "tokenizer.json")?;
    Tokenizer::from_file(path)
        .map_err(|e| PipelineError::Tokenization(format!("Failed to load tokenizer: {e}")))
}

/// Load a repository's `config.json` (returned raw so each model can
/// deserialize its own config type plus any label maps) together with a
/// [`VarBuilder`] over the checkpoint weights.
pub fn load_model_weights(repo_id: &str, device: &Device) -> Result<(String, VarBuilder<'static>)> {
    let config_path = fetch_file(repo_id, "config.json")?;
    let weights_path =
        fetch_file(repo_id, "model.safetensors").or_else(|_| fetch_file(repo_id, "pytorch_model.bin"))?;
    tracing::info!(repo_id, weights = %weights_path.display(), "loaded model checkpoint");

    let config = std::fs::read_to_string(&config_path)?;

    let vb = if weights_path.extension().is_some_and(|e| e == "safetensors") {
        unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)? }
    } else {
        VarBuilder::from_pth(&weights_path, DType::F32, device)?
    };

    Ok((config, vb))
}

/// Label maps found in classification checkpoints' `config.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LabelMaps {
    #[serde(default)]
    pub id2label: HashMap<String, String>,
    #[serde(default)]
    pub label2id: HashMap<String, u32>,
}

impl LabelMaps {
    pub fn from_config(config_json: &str) -> Result<Self> {
        Ok(serde_json::from_str(config_json)?)
    }

    /// The tag vocabulary ordered by class index, for argmax decoding.
    pub fn ordered_labels(&self) -> Result<Vec<String>> {
        let mut labels = vec![String::new(); self.id2label.len()];
        for (id, label) in &self.id2label {
            let index: usize = id.parse().map_err(|_| {
                PipelineError::ModelMetadata(format!("non-numeric id2label key: {id}"))
            })?;
            let slot = labels.get_mut(index).ok_or_else(|| {
                PipelineError::ModelMetadata(format!("id2label key out of range: {id}"))
            })?;
            *slot = label.clone();
        }
        Ok(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_labels_sorts_by_numeric_id() {
        let maps = LabelMaps::from_config(
            r#"{"id2label": {"2": "I-MISC", "0": "O", "1": "B-MISC"}, "label2id": {}}"#,
        )
        .unwrap();
        assert_eq!(maps.ordered_labels().unwrap(), vec!["O", "B-MISC", "I-MISC"]);
    }

    #[test]
    fn ordered_labels_rejects_gaps() {
        let maps = LabelMaps::from_config(r#"{"id2label": {"0": "O", "5": "B-PER"}}"#).unwrap();
        assert!(maps.ordered_labels().is_err());
    }

    #[test]
    fn missing_maps_default_to_empty() {
        let maps = LabelMaps::from_config(r#"{"hidden_size": 768}"#).unwrap();
        assert!(maps.id2label.is_empty());
        assert!(maps.label2id.is_empty());
    }
}
