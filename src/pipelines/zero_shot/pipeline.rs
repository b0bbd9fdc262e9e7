use super::model::EntailmentClassificationModel;
use crate::Result;
use tokenizers::Tokenizer;

#[derive(Debug, Clone)]
pub struct ClassificationResult {
    pub label: String,
    pub score: f32,
}

pub struct ZeroShotClassificationPipeline<M: EntailmentClassificationModel> {
    pub(crate) model: M,
    pub(crate) tokenizer: Tokenizer,
}

impl<M: EntailmentClassificationModel> ZeroShotClassificationPipeline<M> {
    /// Score each candidate label independently against the text.
    ///
    /// Results keep the input label order; every score is an entailment
    /// probability in `[0, 1]` and the scores are not normalized across
    /// labels.
    pub fn classify(
        &self,
        text: &str,
        candidate_labels: &[&str],
    ) -> Result<Vec<ClassificationResult>> {
        let results = self
            .model
            .predict(&self.tokenizer, text, candidate_labels)?;
        Ok(results
            .into_iter()
            .map(|(label, score)| ClassificationResult { label, score })
            .collect())
    }

    /// Classify a batch of inputs, returning one result per item.
    pub fn classify_batch(
        &self,
        texts: &[&str],
        candidate_labels: &[&str],
    ) -> Result<Vec<Result<Vec<ClassificationResult>>>> {
        let results = self
            .model
            .predict_batch(&self.tokenizer, texts, candidate_labels)?;

        Ok(results
            .into_iter()
            .map(|res| {
                res.map(|entries| {
                    entries
                        .into_iter()
                        .map(|(label, score)| ClassificationResult { label, score })
                        .collect()
                })
            })
            .collect())
    }

    pub fn device(&self) -> &candle_core::Device {
        self.model.device()
    }
}
