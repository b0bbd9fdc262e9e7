//! Abstractive summarization pipeline.
//!
//! Prefixes the input with `"summarize: "`, truncates to 512 tokens, and
//! decodes with 4-beam search (40..150 output tokens, length penalty 2.0,
//! early stopping). Outputs are normalized so no space precedes a
//! sentence-final period.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use text_pipelines::pipelines::summarization::{SummarizationPipelineBuilder, T5Size};
//!
//! # fn main() -> text_pipelines::Result<()> {
//! let pipeline = SummarizationPipelineBuilder::t5(T5Size::Base).build()?;
//! let summary = pipeline.summarize("A long article about parliamentary procedure...")?;
//! println!("{summary}");
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod model;
pub mod pipeline;

pub use builder::SummarizationPipelineBuilder;
pub use model::{SummarizationModel, SummarizationParams};
pub use pipeline::{SummarizationPipeline, MAX_INPUT_TOKENS};

pub use crate::models::T5Size;
