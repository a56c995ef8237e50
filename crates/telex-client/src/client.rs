use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde_json::Value;

use crate::{TelexError, tips};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Payload posted to the Telex webhook.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutboundMessage {
    pub channel_id: String,
    pub agent_name: String,
    pub message: String,
    pub timestamp: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TelexClient {
    http: reqwest::Client,
    webhook_url: String,
    agent_name: String,
}

impl TelexClient {
    pub fn new(
        webhook_url: impl Into<String>,
        agent_name: impl Into<String>,
    ) -> Result<Self, TelexError> {
        let agent_name = agent_name.into();
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .user_agent(format!("{agent_name}/1.0"))
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            webhook_url: webhook_url.into(),
            agent_name,
        })
    }

    pub fn webhook_url(&self) -> &str {
        &self.webhook_url
    }

    pub fn agent_name(&self) -> &str {
        &self.agent_name
    }

    /// Build the webhook payload. An image turns the message type into `image`.
    pub fn build_message(
        &self,
        channel_id: &str,
        message: &str,
        image: Option<&str>,
    ) -> OutboundMessage {
        OutboundMessage {
            channel_id: channel_id.to_string(),
            agent_name: self.agent_name.clone(),
            message: message.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            kind: if image.is_some() { "image" } else { "text" },
            image: image.map(str::to_string),
        }
    }

    /// Send a message (optionally with a data-URI image) to a channel.
    pub async fn send_message(
        &self,
        channel_id: &str,
        message: &str,
        image: Option<&str>,
    ) -> Result<(), TelexError> {
        let payload = self.build_message(channel_id, message, image);
        self.post_json(&self.webhook_url, &payload).await?;
        tracing::info!(channel_id, "Message sent to Telex");
        Ok(())
    }

    /// Send one randomly chosen QR tip to a channel.
    pub async fn send_daily_tip(&self, channel_id: &str) -> Result<(), TelexError> {
        self.send_message(channel_id, tips::random_tip(), None).await
    }

    /// Register the agent with the platform (`<webhook>/register`).
    pub async fn register_agent(&self, agent_config: &impl Serialize) -> Result<(), TelexError> {
        let url = format!("{}/register", self.webhook_url.trim_end_matches('/'));
        self.post_json(&url, agent_config).await?;
        tracing::info!("Agent registered with Telex");
        Ok(())
    }

    async fn post_json(&self, url: &str, body: &impl Serialize) -> Result<(), TelexError> {
        let resp = self.http.post(url).json(body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            tracing::warn!(url, status = status.as_u16(), "Telex request rejected");
            return Err(TelexError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }
}

/// Check that a reply object carries the fields Telex requires.
pub fn validate_reply(reply: &Value) -> bool {
    ["text", "type"].iter().all(|field| reply.get(field).is_some())
}
