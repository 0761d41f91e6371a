//! Inbound payloads and outbound response mappings for both entrypoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RequestError;

/// General entrypoint payload: `{"prompt": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptRequest {
    /// Raw user prompt forwarded to the agent.
    pub prompt: String,
}

impl PromptRequest {
    /// Creates a prompt payload.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }

    /// Parses a loosely-typed JSON payload.
    pub fn from_value(payload: Value) -> Result<Self, RequestError> {
        let mut object = into_object(payload)?;
        match object.remove("prompt") {
            None | Some(Value::Null) => Err(RequestError::MissingField("prompt".to_string())),
            Some(Value::String(prompt)) => Ok(Self { prompt }),
            Some(other) => Err(RequestError::InvalidPayload(format!(
                "prompt must be a string, got {}",
                json_type_name(&other)
            ))),
        }
    }
}

/// One changed file inside a pull request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrFile {
    /// Path of the changed file.
    #[serde(default)]
    pub filename: Option<String>,
    /// Unified diff for this file.
    #[serde(default)]
    pub patch: Option<String>,
}

impl PrFile {
    /// Creates a file entry with both fields present.
    pub fn new(filename: impl Into<String>, patch: impl Into<String>) -> Self {
        Self {
            filename: Some(filename.into()),
            patch: Some(patch.into()),
        }
    }
}

/// Pull-request metadata and diffs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrData {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Changed files in review order.
    #[serde(default)]
    pub files: Vec<PrFile>,
}

/// Review entrypoint payload: `{"pr_data": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub pr_data: PrData,
}

impl ReviewRequest {
    /// Wraps PR data into a review payload.
    pub fn new(pr_data: PrData) -> Self {
        Self { pr_data }
    }

    /// Parses a loosely-typed JSON payload.
    pub fn from_value(payload: Value) -> Result<Self, RequestError> {
        let mut object = into_object(payload)?;
        let pr_data = match object.remove("pr_data") {
            None | Some(Value::Null) => {
                return Err(RequestError::MissingField("pr_data".to_string()));
            }
            Some(value @ Value::Object(_)) => value,
            Some(other) => {
                return Err(RequestError::InvalidPayload(format!(
                    "pr_data must be an object, got {}",
                    json_type_name(&other)
                )));
            }
        };
        let pr_data: PrData = serde_json::from_value(pr_data)
            .map_err(|e| RequestError::InvalidPayload(format!("pr_data: {e}")))?;
        Ok(Self { pr_data })
    }
}

/// General entrypoint response: `{"response": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptResponse {
    pub response: String,
}

/// Review entrypoint response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewResponse {
    /// Normalized review text.
    pub review: String,
    /// Title echoed from the payload (`null` when absent).
    pub pr_title: Option<String>,
    /// Number of files in the payload.
    pub files_reviewed: usize,
}

fn into_object(payload: Value) -> Result<serde_json::Map<String, Value>, RequestError> {
    match payload {
        Value::Object(map) => Ok(map),
        other => Err(RequestError::InvalidPayload(format!(
            "payload must be a JSON object, got {}",
            json_type_name(&other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
