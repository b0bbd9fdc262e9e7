use crate::Result;
use tokenizers::Tokenizer;

/// Fixed decoding policy for summaries.
///
/// These mirror the service's published behavior and are not request-tunable;
/// output parity tests depend on them.
#[derive(Debug, Clone)]
pub struct SummarizationParams {
    pub num_beams: usize,
    pub max_length: usize,
    pub min_length: usize,
    pub length_penalty: f32,
    pub early_stopping: bool,
}

impl Default for SummarizationParams {
    fn default() -> Self {
        Self {
            num_beams: 4,
            max_length: 150,
            min_length: 40,
            length_penalty: 2.0,
            early_stopping: true,
        }
    }
}

pub trait SummarizationModel {
    type Options: std::fmt::Debug + Clone;

    fn new(options: Self::Options, device: candle_core::Device) -> Result<Self>
    where
        Self: Sized;

    /// Generate a summary token sequence for an already-encoded input.
    ///
    /// The returned ids carry no decoder-start or end-of-sequence markers.
    fn generate(&self, input_ids: &[u32], params: &SummarizationParams) -> Result<Vec<u32>>;

    fn get_tokenizer(options: Self::Options) -> Result<Tokenizer>;

    fn device(&self) -> &candle_core::Device;
}
