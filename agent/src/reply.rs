//! Agent reply messages (A2A message shape) and their text content.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::services::{GenerationError, Rendered};

pub const HELP_TEXT: &str = "🔧 QR & Barcode Generator Bot

Commands:
• qr [text] - Generate QR code
• barcode [text] - Generate barcode
• qr size:15 [text] - QR with custom size
• barcode format:ean13 [text] - Barcode with format

Examples:
• qr https://example.com
• barcode 1234567890
• qr size:20 Hello World
• barcode format:ean13 123456789012

Supported formats: code128, ean13, ean8, upc";

/// Characters of the payload echoed back in QR acknowledgments.
const QR_ACK_PREVIEW: usize = 50;

/// One piece of message content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Part {
    Text {
        text: String,
    },
    Data {
        data: String,
        #[serde(rename = "contentType")]
        content_type: String,
    },
}

/// A message sent back by the agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentMessage {
    pub role: String,
    pub parts: Vec<Part>,
    pub kind: String,
    pub message_id: String,
}

impl AgentMessage {
    pub fn new(parts: Vec<Part>) -> Self {
        Self {
            role: "agent".into(),
            parts,
            kind: "message".into(),
            message_id: uuid::Uuid::new_v4().to_string(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(vec![Part::Text { text: text.into() }])
    }

    /// Acknowledgment text followed by the image as a data URI.
    pub fn image(ack: impl Into<String>, rendered: &Rendered) -> Self {
        Self::new(vec![
            Part::Text { text: ack.into() },
            Part::Data {
                data: rendered.data_uri.clone(),
                content_type: image_engine::PNG_MIME.into(),
            },
        ])
    }

    pub fn help() -> Self {
        Self::text(HELP_TEXT)
    }

    /// Text of the first text part, if any.
    pub fn text_content(&self) -> Option<&str> {
        self.parts.iter().find_map(|p| match p {
            Part::Text { text } => Some(text.as_str()),
            Part::Data { .. } => None,
        })
    }

    /// Data URI of the first data part, if any.
    pub fn image_data(&self) -> Option<&str> {
        self.parts.iter().find_map(|p| match p {
            Part::Data { data, .. } => Some(data.as_str()),
            Part::Text { .. } => None,
        })
    }

    /// Flat webhook reply: `{text, type: "text"|"image", image?}`.
    pub fn to_webhook_reply(&self) -> Value {
        let text = self.text_content().unwrap_or_default();
        match self.image_data() {
            Some(image) => json!({ "text": text, "type": "image", "image": image }),
            None => json!({ "text": text, "type": "text" }),
        }
    }
}

/// Leading characters of a QR payload echoed in acknowledgments.
pub fn qr_preview(text: &str) -> String {
    text.chars().take(QR_ACK_PREVIEW).collect()
}

pub fn qr_ack(text: &str) -> String {
    format!("QR code generated for: {}...", qr_preview(text))
}

pub fn barcode_ack(text: &str) -> String {
    format!("Barcode generated for: {text}")
}

pub fn qr_failure(err: &GenerationError) -> AgentMessage {
    AgentMessage::text(format!("Error generating QR code: {err}"))
}

pub fn barcode_failure(err: &GenerationError) -> AgentMessage {
    AgentMessage::text(format!("Error generating barcode: {err}"))
}

/// Inbound message as sent by the platform. Parts are kept loose because
/// clients use either `kind` or `type` to tag them. Webhook clients send a
/// flat `message` string instead of parts.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundMessage {
    #[serde(default)]
    pub parts: Vec<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl InboundMessage {
    /// Text of the first part tagged as text, or `None`.
    pub fn first_text(&self) -> Option<&str> {
        self.parts
            .iter()
            .find(|part| {
                ["kind", "type"]
                    .iter()
                    .any(|tag| part.get(*tag).and_then(Value::as_str) == Some("text"))
            })
            .map(|part| part.get("text").and_then(Value::as_str).unwrap_or_default())
    }
}

/// Command text carried by one input line: the first text part (or the
/// `message` field) when the line is a JSON message object, otherwise the
/// line itself.
pub fn command_from_line(line: &str) -> String {
    if line.trim_start().starts_with('{') {
        if let Ok(msg) = serde_json::from_str::<InboundMessage>(line) {
            return msg
                .first_text()
                .or(msg.message.as_deref())
                .unwrap_or_default()
                .to_string();
        }
    }
    line.to_string()
}
