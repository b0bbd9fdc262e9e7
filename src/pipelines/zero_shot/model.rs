use crate::Result;
use tokenizers::Tokenizer;

/// Hypothesis template paired with every candidate label.
pub(crate) const HYPOTHESIS_TEMPLATE: &str = "This example is about {}.";

/// Build the entailment hypothesis for one candidate label.
pub(crate) fn hypothesis_for(label: &str) -> String {
    HYPOTHESIS_TEMPLATE.replacen("{}", label, 1)
}

pub trait EntailmentClassificationModel {
    type Options: std::fmt::Debug + Clone;

    fn new(options: Self::Options, device: candle_core::Device) -> Result<Self>
    where
        Self: Sized;

    /// Entailment probability per candidate label, in input order.
    ///
    /// Each probability comes from a softmax over that label's entailment and
    /// contradiction logits alone; scores are independent across labels and
    /// do not sum to 1.
    fn predict(
        &self,
        tokenizer: &Tokenizer,
        text: &str,
        candidate_labels: &[&str],
    ) -> Result<Vec<(String, f32)>>;

    /// Predict a batch of inputs, returning one result per item.
    fn predict_batch(
        &self,
        tokenizer: &Tokenizer,
        texts: &[&str],
        candidate_labels: &[&str],
    ) -> Result<Vec<Result<Vec<(String, f32)>>>> {
        Ok(texts
            .iter()
            .map(|text| self.predict(tokenizer, text, candidate_labels))
            .collect())
    }

    fn get_tokenizer(options: Self::Options) -> Result<Tokenizer>;

    fn device(&self) -> &candle_core::Device;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hypothesis_wraps_the_label() {
        assert_eq!(hypothesis_for("energy"), "This example is about energy.");
    }

    #[test]
    fn hypothesis_substitutes_only_once() {
        assert_eq!(hypothesis_for("{}"), "This example is about {}.");
    }
}
