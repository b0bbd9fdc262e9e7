//! Named-entity recognition pipeline.
//!
//! Tags every sub-word fragment with a BIO label (`O`, `B-PER`, `I-PER`,
//! `B-ORG`, `I-ORG`, `B-LOC`, `I-LOC`, `B-MISC`, `I-MISC`) and merges
//! contiguous runs back into entity strings.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use text_pipelines::pipelines::ner::{NerPipelineBuilder, NerBertSize};
//!
//! # fn main() -> text_pipelines::Result<()> {
//! let pipeline = NerPipelineBuilder::bert(NerBertSize::Large).build()?;
//! for span in pipeline.extract("Angela Merkel visited Paris last week.")? {
//!     println!("{} [{}]", span.text, span.tag);
//! }
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod model;
pub mod pipeline;
pub mod spans;

pub use builder::NerPipelineBuilder;
pub use model::TokenClassificationModel;
pub use pipeline::NerPipeline;
pub use spans::{merge_fragments, EntitySpan};

pub use crate::models::NerBertSize;
