//! # text-pipelines
//!
//! Inference pipelines for three text endpoints: abstractive summarization,
//! named-entity recognition, and zero-shot categorization. Models run on
//! [candle](https://github.com/huggingface/candle); weights are pulled from
//! the Hugging Face Hub on first use.
//!
//! ```rust,no_run
//! use text_pipelines::pipelines::summarization::{SummarizationPipelineBuilder, T5Size};
//!
//! fn main() -> text_pipelines::Result<()> {
//!     let pipeline = SummarizationPipelineBuilder::t5(T5Size::Small).build()?;
//!     let summary = pipeline.summarize("A long article body goes here...")?;
//!     println!("{summary}");
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod loaders;
pub mod models;
pub mod pipelines;
pub mod service;

pub use error::{PipelineError, Result};
pub use models::{
    EntailmentModernBertModel, ModernBertSize, NerBertModel, NerBertSize, SummarizationT5Model,
    T5Size,
};
