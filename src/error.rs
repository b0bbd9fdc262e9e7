use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    // Request validation, recovered into a 400 response by the service layer
    #[error("{0}")]
    Validation(String),

    // Tokenization
    #[error("Tokenization failed: {0}")]
    Tokenization(String),

    // Generation / scoring
    #[error("Generation failed: {0}")]
    Generation(String),

    // Checkpoint metadata (missing label maps, unexpected head shapes)
    #[error("Model metadata missing: {0}")]
    ModelMetadata(String),

    // Network/Download
    #[error("Download failed: {0}")]
    Download(String),

    // Device
    #[error("Device error: {0}")]
    Device(String),

    // Pass-through from dependencies
    #[error(transparent)]
    Candle(#[from] candle_core::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;

impl PipelineError {
    /// The fixed message returned when an input encodes to too few tokens.
    pub fn text_too_short() -> Self {
        PipelineError::Validation("text too short".to_string())
    }

    /// Whether this error should be recovered into a 400 response rather than
    /// propagated as a model-invocation fault.
    pub fn is_validation(&self) -> bool {
        matches!(self, PipelineError::Validation(_))
    }
}

impl From<hf_hub::api::sync::ApiError> for PipelineError {
    fn from(value: hf_hub::api::sync::ApiError) -> Self {
        PipelineError::Download(value.to_string())
    }
}
