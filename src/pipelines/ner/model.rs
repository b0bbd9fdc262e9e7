use crate::Result;
use tokenizers::Tokenizer;

pub trait TokenClassificationModel {
    type Options: std::fmt::Debug + Clone;

    fn new(options: Self::Options, device: candle_core::Device) -> Result<Self>
    where
        Self: Sized;

    /// Argmax-decode one tag per input position over the model's tag
    /// vocabulary (`O`, `B-PER`, `I-PER`, ...). The returned sequence is
    /// positionally aligned with `input_ids`, special tokens included.
    fn predict_tags(&self, input_ids: &[u32], attention_mask: &[u32]) -> Result<Vec<String>>;

    fn get_tokenizer(options: Self::Options) -> Result<Tokenizer>;

    fn device(&self) -> &candle_core::Device;
}
