// src/research/extractor.rs
//! Best-effort extraction of a JSON object from free-form model output.
//!
//! Heuristic: when the text contains a "```json" fence, the candidate is what
//! follows the first such fence up to the next "```" (or the end of the text);
//! otherwise the whole text is the candidate. The candidate must parse as a
//! JSON object. No schema is checked.

use crate::types::Summary;
use serde_json::Value;
use thiserror::Error;

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// Message shown to the user when extraction fails
pub const PARSE_WARNING: &str = "⚠ Could not parse JSON from AI output.";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("model output is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("model output is JSON but not an object (found {0})")]
    NotAnObject(&'static str),
}

pub fn extract_json(text: &str) -> Result<Summary, ExtractError> {
    match serde_json::from_str::<Value>(candidate(text))? {
        Value::Object(fields) => Ok(Summary::new(fields)),
        other => Err(ExtractError::NotAnObject(kind(&other))),
    }
}

fn candidate(text: &str) -> &str {
    match text.split_once(JSON_FENCE) {
        Some((_, rest)) => rest.split_once(FENCE).map_or(rest, |(block, _)| block).trim(),
        None => text,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
