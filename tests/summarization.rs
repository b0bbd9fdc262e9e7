//! Integration tests for the summarization pipeline
//! Run with: cargo test --features integration

#![cfg(feature = "integration")]

use text_pipelines::pipelines::summarization::*;
use text_pipelines::pipelines::utils::DeviceSelectable;

const ARTICLE: &str = "The parliament today passed sweeping changes to the national energy \
    framework after months of negotiation between the major parties. The legislation sets \
    binding emissions targets for the electricity sector, establishes a transition fund for \
    coal regions, and creates a new regulator to oversee grid reliability. Industry groups \
    welcomed the certainty the bill provides, while environmental organisations argued the \
    targets remain short of what the science demands. The changes take effect next July.";

#[test]
fn summarizes_a_news_article() -> anyhow::Result<()> {
    let pipeline = SummarizationPipelineBuilder::t5(T5Size::Small).cpu().build()?;

    let summary = pipeline.summarize(ARTICLE)?;
    assert!(!summary.trim().is_empty());
    assert!(!summary.contains(" ."), "detokenization artifact survived");
    Ok(())
}

#[test]
fn short_input_is_rejected() -> anyhow::Result<()> {
    let pipeline = SummarizationPipelineBuilder::t5(T5Size::Small).cpu().build()?;

    let err = pipeline.summarize("too short").unwrap_err();
    assert_eq!(err.to_string(), "text too short");
    Ok(())
}

#[test]
fn batch_returns_one_result_per_input() -> anyhow::Result<()> {
    let pipeline = SummarizationPipelineBuilder::t5(T5Size::Small).cpu().build()?;

    let results = pipeline.summarize_batch(&[ARTICLE, "too short"])?;
    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert!(results[1].is_err());
    Ok(())
}
