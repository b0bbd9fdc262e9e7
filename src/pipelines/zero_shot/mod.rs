//! Zero-shot text categorization via natural-language inference.
//!
//! Each candidate label becomes the hypothesis `"This example is about
//! {label}."`; the model scores whether the input text entails it. Labels are
//! scored independently, so probabilities do not sum to 1 across labels.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use text_pipelines::pipelines::zero_shot::{
//!     ZeroShotClassificationPipelineBuilder, ModernBertSize,
//! };
//!
//! # fn main() -> text_pipelines::Result<()> {
//! let pipeline =
//!     ZeroShotClassificationPipelineBuilder::modernbert(ModernBertSize::Base).build()?;
//! let labels = ["energy", "healthcare", "media"];
//!
//! for result in pipeline.classify("The new solar farm opened today.", &labels)? {
//!     println!("{}: {:.2}", result.label, result.score);
//! }
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod model;
pub mod pipeline;

pub use builder::ZeroShotClassificationPipelineBuilder;
pub use model::EntailmentClassificationModel;
pub use pipeline::{ClassificationResult, ZeroShotClassificationPipeline};

pub use crate::models::ModernBertSize;
