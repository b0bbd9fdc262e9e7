//! JSON request/response envelope shared by the three endpoints.
//!
//! Requests carry a single `text` field. Success responses wrap the pipeline
//! payload under `result` with HTTP 200; validation failures (input too
//! short, missing `text`) become structured 400 responses. Any other pipeline
//! error propagates to the caller, which owns the 5xx mapping — no retries
//! happen here.

use serde_json::{json, Map, Value};

use crate::pipelines::ner::{NerPipeline, TokenClassificationModel};
use crate::pipelines::summarization::{SummarizationModel, SummarizationPipeline};
use crate::pipelines::zero_shot::{EntailmentClassificationModel, ZeroShotClassificationPipeline};
use crate::{PipelineError, Result};

/// The categories every categorization response scores, in output order.
pub const CATEGORIES: [&str; 14] = [
    "environmental",
    "defence",
    "education",
    "economy",
    "legal",
    "energy",
    "healthcare",
    "indigenous",
    "technology",
    "parliament",
    "infrastructure",
    "transportation",
    "agriculture",
    "media",
];

pub const CONTENT_TYPE_JSON: &str = "application/json";

const MISSING_TEXT: &str = "missing text field";

/// A formatted endpoint response: status code, content type, JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Value,
}

impl ServiceResponse {
    fn ok(result: Value) -> Self {
        Self {
            status: 200,
            content_type: CONTENT_TYPE_JSON,
            body: json!({ "result": result }),
        }
    }

    fn bad_request(message: &str) -> Self {
        Self {
            status: 400,
            content_type: CONTENT_TYPE_JSON,
            body: json!({ "error": message }),
        }
    }
}

/// Pull the `text` field out of a request body.
fn request_text(request: &Value) -> Option<&str> {
    request.get("text")?.as_str()
}

/// Fold a pipeline outcome into the envelope: validation errors become 400s,
/// anything else stays a fault for the serving layer.
fn respond<T>(outcome: Result<T>, to_value: impl FnOnce(T) -> Value) -> Result<ServiceResponse> {
    match outcome {
        Ok(payload) => Ok(ServiceResponse::ok(to_value(payload))),
        Err(PipelineError::Validation(message)) => Ok(ServiceResponse::bad_request(&message)),
        Err(err) => Err(err),
    }
}

/// Summarization endpoint: `{"text": ...}` → `{"result": "<summary>"}`.
pub fn predict_summary<M: SummarizationModel>(
    pipeline: &SummarizationPipeline<M>,
    request: &Value,
) -> Result<ServiceResponse> {
    let Some(text) = request_text(request) else {
        return Ok(ServiceResponse::bad_request(MISSING_TEXT));
    };
    respond(pipeline.summarize(text), Value::String)
}

/// NER endpoint: `{"text": ...}` → `{"result": [[text, tag], ...]}`.
pub fn predict_entities<M: TokenClassificationModel>(
    pipeline: &NerPipeline<M>,
    request: &Value,
) -> Result<ServiceResponse> {
    let Some(text) = request_text(request) else {
        return Ok(ServiceResponse::bad_request(MISSING_TEXT));
    };
    respond(pipeline.extract(text), |spans| {
        Value::Array(
            spans
                .into_iter()
                .map(|span| json!([span.text, span.tag]))
                .collect(),
        )
    })
}

/// Categorization endpoint: `{"text": ...}` → `{"result": {category: score}}`
/// with every category present, in canonical order.
pub fn predict_categories<M: EntailmentClassificationModel>(
    pipeline: &ZeroShotClassificationPipeline<M>,
    request: &Value,
) -> Result<ServiceResponse> {
    let Some(text) = request_text(request) else {
        return Ok(ServiceResponse::bad_request(MISSING_TEXT));
    };
    respond(pipeline.classify(text, &CATEGORIES), |scores| {
        let mut map = Map::with_capacity(scores.len());
        for entry in scores {
            map.insert(entry.label, json!(entry.score));
        }
        Value::Object(map)
    })
}
