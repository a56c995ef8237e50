use image_engine::{encode_png, generate_qr};

use super::{GenerationError, Rendered};

/// Renders QR codes as PNG.
#[derive(Debug, Clone)]
pub struct QrService {
    border: u32,
}

impl QrService {
    pub fn new(border: u32) -> Self {
        Self { border }
    }

    /// `size` is the module size in pixels; the parser has already clamped it.
    pub fn render(&self, text: &str, size: u32) -> Result<Rendered, GenerationError> {
        let size = command_parser::clamp_qr_size(size);
        let img = generate_qr(text, size, self.border).map_err(GenerationError::Qr)?;
        let png = encode_png(&img).map_err(GenerationError::Qr)?;
        tracing::debug!(size, bytes = png.len(), "QR code rendered");
        Ok(Rendered::from_png(png))
    }
}
