//! Turns one chat command into one agent reply, and serves typed direct
//! requests through the same render and storage path.
//!
//! Rendering runs on the blocking pool. For chat commands, generation
//! failures become text replies and no error reaches the caller.

use std::path::PathBuf;

use command_parser::{BarcodeFormat, IntentKind, ParsedIntent, parse_command};

use crate::app::SharedState;
use crate::reply::{self, AgentMessage};
use crate::request::{BarcodeRequest, DirectResponse, QrRequest};
use crate::services::{GenerationError, Rendered};

/// Parse `command` and produce the reply for it.
pub async fn handle_command(state: &SharedState, command: &str) -> AgentMessage {
    let intent = parse_command(command);
    tracing::info!(kind = ?intent.kind, chars = intent.text.chars().count(), "Command parsed");
    handle_intent(state, intent).await
}

/// Produce the reply for an already-parsed intent.
pub async fn handle_intent(state: &SharedState, intent: ParsedIntent) -> AgentMessage {
    match intent.kind {
        IntentKind::Help => AgentMessage::help(),
        IntentKind::Qr => match generate_qr(state, &intent.text, intent.qr_size).await {
            Ok((rendered, _)) => AgentMessage::image(reply::qr_ack(&intent.text), &rendered),
            Err(e) => reply::qr_failure(&e),
        },
        IntentKind::Barcode => {
            match generate_barcode(state, &intent.text, intent.barcode_format).await {
                Ok((rendered, _)) => {
                    AgentMessage::image(reply::barcode_ack(&intent.text), &rendered)
                }
                Err(e) => reply::barcode_failure(&e),
            }
        }
    }
}

/// Generate a QR code for a validated direct request.
pub async fn handle_qr_request(
    state: &SharedState,
    req: &QrRequest,
) -> Result<DirectResponse, GenerationError> {
    let (rendered, saved) = generate_qr(state, req.text(), req.size()).await?;
    Ok(direct_response(
        format!("QR code generated successfully for: {}...", reply::qr_preview(req.text())),
        rendered,
        saved,
    ))
}

/// Generate a barcode for a validated direct request.
pub async fn handle_barcode_request(
    state: &SharedState,
    req: &BarcodeRequest,
) -> Result<DirectResponse, GenerationError> {
    let (rendered, saved) = generate_barcode(state, req.text(), req.format()).await?;
    Ok(direct_response(
        format!("Barcode generated successfully for: {}", req.text()),
        rendered,
        saved,
    ))
}

fn direct_response(message: String, rendered: Rendered, saved: Option<PathBuf>) -> DirectResponse {
    DirectResponse {
        success: true,
        message,
        image: rendered.data_uri,
        file_name: saved
            .as_deref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned()),
    }
}

async fn generate_qr(
    state: &SharedState,
    text: &str,
    size: u32,
) -> Result<(Rendered, Option<PathBuf>), GenerationError> {
    let svc = state.qr().clone();
    let owned = text.to_string();
    match render(move || svc.render(&owned, size)).await {
        Ok(rendered) => {
            let saved = persist(state, "qr", &rendered).await;
            Ok((rendered, saved))
        }
        Err(e) => {
            tracing::error!(size, "QR generation error: {e}");
            Err(e)
        }
    }
}

async fn generate_barcode(
    state: &SharedState,
    text: &str,
    format: BarcodeFormat,
) -> Result<(Rendered, Option<PathBuf>), GenerationError> {
    let svc = state.barcode().clone();
    let owned = text.to_string();
    match render(move || svc.render(&owned, format)).await {
        Ok(rendered) => {
            let saved = persist(state, "barcode", &rendered).await;
            Ok((rendered, saved))
        }
        Err(e) => {
            tracing::error!(%format, "Barcode generation error: {e}");
            Err(e)
        }
    }
}

async fn render<F>(job: F) -> Result<Rendered, GenerationError>
where
    F: FnOnce() -> Result<Rendered, GenerationError> + Send + 'static,
{
    tokio::task::spawn_blocking(job).await?
}

/// Save the image and schedule retention cleanup. Storage problems are
/// logged; the reply still carries the data URI.
async fn persist(state: &SharedState, prefix: &'static str, rendered: &Rendered) -> Option<PathBuf> {
    let store = state.artifacts()?.clone();
    let png = rendered.png.clone();

    let save_store = store.clone();
    let saved = match tokio::task::spawn_blocking(move || save_store.save(prefix, &png)).await {
        Ok(Ok(path)) => path,
        Ok(Err(e)) => {
            tracing::warn!(dir = %store.dir().display(), "Failed to save image: {e}");
            return None;
        }
        Err(e) => {
            tracing::error!("Save task failed: {e}");
            return None;
        }
    };

    tokio::spawn(async move {
        match tokio::task::spawn_blocking(move || store.cleanup(prefix)).await {
            Ok(report) if !report.is_clean() => {
                tracing::warn!(prefix, failures = ?report.failures, "Artifact cleanup incomplete");
            }
            Ok(_) => {}
            Err(e) => tracing::error!("Cleanup task failed: {e}"),
        }
    });

    tracing::info!(path = %saved.display(), "Image saved");
    Some(saved)
}
