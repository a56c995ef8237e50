//! Image generation for the QR & barcode agent.
//!
//! Wraps the `qrcode` and `barcoders` encoders, draws their module
//! matrices into grayscale images and encodes the result as PNG.

pub mod barcode;
pub mod png;
pub mod qr;

// Re-exports for convenience
pub use barcode::{BarcodeStyle, generate_barcode, normalize_payload};
pub use png::{PNG_MIME, encode_png, to_data_uri};
pub use qr::generate_qr;

use command_parser::BarcodeFormat;

/// Default quiet-zone width around a QR code, in modules.
pub const QR_BORDER: u32 = 4;

/// Errors raised while turning a payload into image bytes.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("QR encode error: {0}")]
    Qr(String),

    #[error("{format} cannot encode this payload ({reason})")]
    Symbology { format: BarcodeFormat, reason: String },

    #[error("PNG encode error: {0}")]
    Encode(#[from] image::ImageError),
}
