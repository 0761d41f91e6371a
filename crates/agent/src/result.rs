//! Normalization of agent runtime results into plain text.

use serde::Deserialize;
use serde::de::IgnoredAny;
use serde_json::Value;

/// Where the normalized text came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseText {
    /// Text field of the first content block.
    FirstBlock(String),
    /// String rendering of the whole result (no usable first block).
    Rendered(String),
}

impl ResponseText {
    pub fn as_str(&self) -> &str {
        match self {
            Self::FirstBlock(text) | Self::Rendered(text) => text,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            Self::FirstBlock(text) | Self::Rendered(text) => text,
        }
    }

    /// `true` when the fallback rendering was used.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Rendered(_))
    }
}

/// Raw runtime result paired with its normalized text.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentResult {
    raw: Value,
    text: ResponseText,
}

impl AgentResult {
    /// Normalizes a raw runtime result.
    pub fn from_raw(raw: Value) -> Self {
        let text = extract_text(&raw);
        Self { raw, text }
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn text(&self) -> &ResponseText {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text.into_string()
    }
}

// ── Result envelope ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ResultEnvelope {
    #[serde(default)]
    message: Option<ResultMessage>,
}

#[derive(Debug, Deserialize)]
struct ResultMessage {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ContentBlock {
    Text { text: String },
    Other(IgnoredAny),
}

/// First content block's text, or the whole result rendered as a string.
pub fn extract_text(raw: &Value) -> ResponseText {
    match first_block_text(raw) {
        Some(text) => ResponseText::FirstBlock(text),
        None => ResponseText::Rendered(render(raw)),
    }
}

fn first_block_text(raw: &Value) -> Option<String> {
    let envelope = ResultEnvelope::deserialize(raw).ok()?;
    match envelope.message?.content.into_iter().next()? {
        ContentBlock::Text { text } => Some(text),
        ContentBlock::Other(_) => None,
    }
}

fn render(raw: &Value) -> String {
    match raw {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
