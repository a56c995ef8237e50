//! Regex-based command parser.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::intent::{BarcodeFormat, ParsedIntent};
use crate::DEFAULT_QR_SIZE;

// The parameter group only matches when a payload follows it; otherwise the
// `size:`/`format:` token falls through into the payload capture. The payload
// ends at the first line break. Size digits are ASCII only.
static RE_QR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^qr\s+(?:size:([0-9]+)\s+)?(.+)").unwrap());
static RE_BARCODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^barcode\s+(?:format:(\w+)\s+)?(.+)").unwrap());

const HELP_WORDS: [&str; 3] = ["help", "commands", "?"];

/// Parse a raw chat message into a [`ParsedIntent`].
///
/// Never fails. Unknown input becomes a QR code of the whole message and
/// empty input becomes [`IntentKind::Help`](crate::IntentKind::Help).
pub fn parse_command(raw: &str) -> ParsedIntent {
    let message = raw.trim();

    if let Some(caps) = RE_QR.captures(message) {
        let text = caps.get(2).map_or("", |m| m.as_str()).trim();
        let size = caps
            .get(1)
            .map(|m| parse_size(m.as_str()))
            .unwrap_or(DEFAULT_QR_SIZE);
        if caps.get(1).is_none() && has_prefix(text, "size:") {
            debug!(payload = text, "Malformed size parameter kept in payload");
        }
        return ParsedIntent::qr(text, size);
    }

    if let Some(caps) = RE_BARCODE.captures(message) {
        let text = caps.get(2).map_or("", |m| m.as_str()).trim();
        let format = match caps.get(1) {
            Some(token) => {
                let format = BarcodeFormat::from_token(token.as_str());
                if format.is_none() {
                    debug!(token = token.as_str(), "Unknown barcode format, using code128");
                }
                format.unwrap_or_default()
            }
            None => BarcodeFormat::default(),
        };
        return ParsedIntent::barcode(text, format);
    }

    if HELP_WORDS.iter().any(|w| w.eq_ignore_ascii_case(message)) {
        return ParsedIntent::help();
    }

    if message.is_empty() {
        return ParsedIntent::help();
    }

    ParsedIntent::qr(message, DEFAULT_QR_SIZE)
}

/// Digit strings too large for `u32` saturate; the caller clamps afterwards.
fn parse_size(digits: &str) -> u32 {
    digits.parse().unwrap_or(u32::MAX)
}

fn has_prefix(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}
