//! Stdio runner: one command per input line, one JSON reply per output line.
//!
//! Lines holding a JSON message object contribute their first text part.
//! Replies are also forwarded to Telex when TELEX_CHANNEL_ID is set.
//!
//! Modes, picked by the first argument:
//! - none: chat commands in, A2A messages out
//! - `webhook`: chat commands in, flat `{text, type, image?}` replies out
//! - `direct`: JSON requests (`{"type":"qr","text":..,"size":..}` or
//!   `{"type":"barcode","text":..,"format":..}`) in, direct responses out
//!
//! One-shot subcommands: `register` registers the agent card with Telex,
//! `tip` posts one QR tip to TELEX_CHANNEL_ID and `settings` lists every
//! setting with its default.

use serde::Deserialize;
use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

use qr_barcode_agent::app::SharedState;
use qr_barcode_agent::card::agent_card;
use qr_barcode_agent::config::AppConfig;
use qr_barcode_agent::config::defaults::setting_defs;
use qr_barcode_agent::reply::{AgentMessage, command_from_line};
use qr_barcode_agent::request::{BarcodeRequest, QrRequest};
use telex_client::TelexClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Chat,
    Webhook,
    Direct,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum DirectRequest {
    Qr(QrRequest),
    Barcode(BarcodeRequest),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries replies only.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting QR & Barcode Generator Agent");

    let config = qr_barcode_agent::init_foundation()?;

    let mode = match std::env::args().nth(1).as_deref() {
        Some("register") => return register(&config).await,
        Some("tip") => return send_tip(&config).await,
        Some("settings") => {
            print_settings();
            return Ok(());
        }
        Some("webhook") => Mode::Webhook,
        Some("direct") => Mode::Direct,
        Some(other) => anyhow::bail!(
            "unknown subcommand: {other} (expected register, tip, settings, webhook or direct)"
        ),
        None => Mode::Chat,
    };

    let telex = match &config.telex_channel_id {
        Some(channel) if mode != Mode::Direct => {
            let client = TelexClient::new(&config.telex_webhook_url, &config.agent_name)?;
            tracing::info!(channel = %channel, "Forwarding replies to Telex");
            Some((client, channel.clone()))
        }
        _ => None,
    };
    let state = SharedState::new(config);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                break;
            }
        };
        let Some(line) = line else {
            break;
        };

        let mut out = match mode {
            Mode::Direct => serde_json::to_string(&direct(&state, &line).await)?,
            Mode::Chat | Mode::Webhook => {
                let reply =
                    qr_barcode_agent::handle_command(&state, &command_from_line(&line)).await;
                if let Some((client, channel)) = &telex {
                    forward(client, channel, &reply).await;
                }
                if mode == Mode::Webhook {
                    serde_json::to_string(&reply.to_webhook_reply())?
                } else {
                    serde_json::to_string(&reply)?
                }
            }
        };
        out.push('\n');
        stdout.write_all(out.as_bytes()).await?;
        stdout.flush().await?;
    }

    tracing::info!("QR & Barcode Generator Agent stopped");
    Ok(())
}

/// Serve one direct request line. Invalid requests and generation failures
/// are answered with `{success: false, error}`.
async fn direct(state: &SharedState, line: &str) -> Value {
    let request = match serde_json::from_str::<DirectRequest>(line) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!("Invalid direct request: {e}");
            return json!({ "success": false, "error": e.to_string() });
        }
    };
    let result = match &request {
        DirectRequest::Qr(req) => qr_barcode_agent::handle_qr_request(state, req).await,
        DirectRequest::Barcode(req) => qr_barcode_agent::handle_barcode_request(state, req).await,
    };
    match result.map(|resp| serde_json::to_value(&resp)) {
        Ok(Ok(value)) => value,
        Ok(Err(e)) => json!({ "success": false, "error": e.to_string() }),
        Err(e) => json!({ "success": false, "error": e.to_string() }),
    }
}

fn print_settings() {
    for def in setting_defs() {
        println!("{}={}  # {}", def.key, def.default, def.description);
    }
}

async fn forward(client: &TelexClient, channel: &str, reply: &AgentMessage) {
    let text = reply.text_content().unwrap_or_default();
    if let Err(e) = client.send_message(channel, text, reply.image_data()).await {
        tracing::warn!("Failed to forward reply to Telex: {e}");
    }
}

async fn register(config: &AppConfig) -> anyhow::Result<()> {
    let client = TelexClient::new(&config.telex_webhook_url, &config.agent_name)?;
    client.register_agent(&agent_card(config)).await?;
    Ok(())
}

async fn send_tip(config: &AppConfig) -> anyhow::Result<()> {
    let Some(channel) = &config.telex_channel_id else {
        anyhow::bail!("TELEX_CHANNEL_ID is not set");
    };
    let client = TelexClient::new(&config.telex_webhook_url, &config.agent_name)?;
    client.send_daily_tip(channel).await?;
    Ok(())
}
