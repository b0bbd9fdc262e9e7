//! T5 encoder-decoder wrapper for the summarization pipeline.
//!
//! Uses `candle_transformers::models::t5` for the underlying implementation
//! and drives it with beam search. The decoder is re-run over the full prefix
//! each step (kv-cache disabled) so all beams can share one model instance.

use std::sync::{Arc, Mutex};

use candle_core::{Device, Tensor};
use candle_nn::ops::log_softmax;
use candle_transformers::models::t5;
use tokenizers::Tokenizer;

use crate::loaders::{load_model_weights, load_tokenizer};
use crate::pipelines::summarization::model::{SummarizationModel, SummarizationParams};
use crate::{PipelineError, Result};

/// Available T5 model sizes.
#[derive(Debug, Clone, Copy)]
pub enum T5Size {
    Small,
    Base,
    Large,
}

impl T5Size {
    fn repo_id(self) -> &'static str {
        match self {
            T5Size::Small => "google-t5/t5-small",
            T5Size::Base => "google-t5/t5-base",
            T5Size::Large => "google-t5/t5-large",
        }
    }
}

impl std::fmt::Display for T5Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            T5Size::Small => "t5-small",
            T5Size::Base => "t5-base",
            T5Size::Large => "t5-large",
        };
        write!(f, "{name}")
    }
}

impl crate::pipelines::cache::ModelOptions for T5Size {
    fn cache_key(&self) -> String {
        self.to_string()
    }
}

/// One partial output sequence during beam search.
#[derive(Clone)]
struct BeamHypothesis {
    tokens: Vec<u32>,
    score: f32,
    finished: bool,
}

impl BeamHypothesis {
    /// Cumulative log-probability scaled by hypothesis length; used only for
    /// the final beam selection.
    fn rank_score(&self, length_penalty: f32) -> f32 {
        self.score / (self.tokens.len() as f32).powf(length_penalty)
    }
}

/// Summarization model using T5.
#[derive(Clone)]
pub struct SummarizationT5Model {
    model: Arc<Mutex<t5::T5ForConditionalGeneration>>,
    device: Device,
    decoder_start: u32,
    eos_token: u32,
}

impl SummarizationT5Model {
    pub fn new(size: T5Size, device: Device) -> Result<Self> {
        let (config_json, vb) = load_model_weights(size.repo_id(), &device)?;
        let mut config: t5::Config = serde_json::from_str(&config_json)?;
        // Beams share one model instance; re-decoding the full prefix each
        // step keeps them independent without per-beam cache state.
        config.use_cache = false;

        let decoder_start = config.decoder_start_token_id.unwrap_or(config.pad_token_id) as u32;
        let eos_token = config.eos_token_id as u32;
        let model = t5::T5ForConditionalGeneration::load(vb, &config)?;

        Ok(Self {
            model: Arc::new(Mutex::new(model)),
            device,
            decoder_start,
            eos_token,
        })
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn get_tokenizer(size: T5Size) -> Result<Tokenizer> {
        load_tokenizer(size.repo_id())
    }

    fn beam_search(
        &self,
        input_ids: &[u32],
        params: &SummarizationParams,
    ) -> Result<Vec<u32>> {
        let mut model = self.model.lock().unwrap();
        model.clear_kv_cache();

        let input = Tensor::new(input_ids, &self.device)?.unsqueeze(0)?;
        let encoder_output = model.encode(&input)?;

        let mut beams = vec![BeamHypothesis {
            tokens: vec![self.decoder_start],
            score: 0.0,
            finished: false,
        }];

        for _step in 0..params.max_length {
            if params.early_stopping && beams.iter().all(|b| b.finished) {
                break;
            }

            let mut candidates: Vec<BeamHypothesis> = Vec::new();
            for beam in &beams {
                if beam.finished {
                    candidates.push(beam.clone());
                    continue;
                }

                let decoder_ids =
                    Tensor::new(beam.tokens.as_slice(), &self.device)?.unsqueeze(0)?;
                let logits = model.decode(&decoder_ids, &encoder_output)?;
                let log_probs = log_softmax(&logits, candle_core::D::Minus1)?
                    .flatten_all()?
                    .to_vec1::<f32>()?;

                let generated = beam.tokens.len() - 1;
                for (token, log_prob) in top_candidates(
                    &log_probs,
                    params.num_beams,
                    (generated < params.min_length).then_some(self.eos_token),
                ) {
                    let mut tokens = beam.tokens.clone();
                    tokens.push(token);
                    candidates.push(BeamHypothesis {
                        tokens,
                        score: beam.score + log_prob,
                        finished: token == self.eos_token,
                    });
                }
            }

            candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
            candidates.truncate(params.num_beams);
            beams = candidates;
        }

        let best = beams
            .into_iter()
            .max_by(|a, b| {
                a.rank_score(params.length_penalty)
                    .total_cmp(&b.rank_score(params.length_penalty))
            })
            .ok_or_else(|| PipelineError::Generation("beam search produced no beams".into()))?;

        let mut tokens = best.tokens;
        tokens.remove(0);
        if tokens.last() == Some(&self.eos_token) {
            tokens.pop();
        }
        Ok(tokens)
    }
}

/// Top `k` (token, log-prob) pairs, with `banned` (the EOS token before the
/// minimum length is reached) excluded.
fn top_candidates(log_probs: &[f32], k: usize, banned: Option<u32>) -> Vec<(u32, f32)> {
    let mut indices: Vec<usize> = (0..log_probs.len())
        .filter(|&i| banned != Some(i as u32))
        .collect();
    indices.sort_by(|&a, &b| log_probs[b].total_cmp(&log_probs[a]));
    indices
        .into_iter()
        .take(k)
        .map(|i| (i as u32, log_probs[i]))
        .collect()
}

impl SummarizationModel for SummarizationT5Model {
    type Options = T5Size;

    fn new(options: Self::Options, device: Device) -> Result<Self> {
        SummarizationT5Model::new(options, device)
    }

    fn generate(&self, input_ids: &[u32], params: &SummarizationParams) -> Result<Vec<u32>> {
        self.beam_search(input_ids, params)
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
    fn top_candidates_orders_by_log_prob() {
        let log_probs = [-3.0, -0.5, -1.0, -2.0];
        let top = top_candidates(&log_probs, 2, None);
        assert_eq!(top, vec![(1, -0.5), (2, -1.0)]);
    }

    #[test]
    fn top_candidates_excludes_banned_token() {
        let log_probs = [-3.0, -0.5, -1.0];
        let top = top_candidates(&log_probs, 2, Some(1));
        assert_eq!(top, vec![(2, -1.0), (0, -3.0)]);
    }

    #[test]
    fn rank_score_penalizes_by_length() {
        let short = BeamHypothesis {
            tokens: vec![0, 1],
            score: -2.0,
            finished: true,
        };
        let long = BeamHypothesis {
            tokens: vec![0, 1, 2, 3],
            score: -2.0,
            finished: true,
        };
        // Same cumulative score: the longer hypothesis ranks higher under a
        // positive length penalty.
        assert!(long.rank_score(2.0) > short.rank_score(2.0));
    }
}
