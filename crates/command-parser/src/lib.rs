//! Chat command parsing for the QR & barcode agent.
//!
//! Turns a free-text message such as `qr size:20 Hello` or
//! `barcode format:ean13 123456789012` into a [`ParsedIntent`].
//! Parsing never fails: malformed parameters degrade to defaults.

pub mod intent;
pub mod parser;

pub use intent::{BarcodeFormat, IntentKind, ParsedIntent};
pub use parser::parse_command;

/// Default QR module size in pixels.
pub const DEFAULT_QR_SIZE: u32 = 10;

/// Smallest accepted QR module size.
pub const MIN_QR_SIZE: u32 = 1;

/// Largest accepted QR module size.
pub const MAX_QR_SIZE: u32 = 40;

/// Clamp a requested QR size into `MIN_QR_SIZE..=MAX_QR_SIZE`.
pub fn clamp_qr_size(size: u32) -> u32 {
    size.clamp(MIN_QR_SIZE, MAX_QR_SIZE)
}
