//! Code generation and artifact storage services.

pub mod artifacts;
pub mod barcode;
pub mod qr;

pub use artifacts::{ArtifactStore, CleanupReport};
pub use barcode::BarcodeService;
pub use qr::QrService;

use image_engine::ImageError;

/// A generated image, ready to reply with.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub png: Vec<u8>,
    pub data_uri: String,
}

impl Rendered {
    fn from_png(png: Vec<u8>) -> Self {
        let data_uri = image_engine::to_data_uri(&png, image_engine::PNG_MIME);
        Self { png, data_uri }
    }
}

/// Failure to turn a parsed intent into an image.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("QR code generation failed: {0}")]
    Qr(#[source] ImageError),

    #[error("Barcode generation failed: {0}")]
    Barcode(#[source] ImageError),

    #[error("Rendering task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
