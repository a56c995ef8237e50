use command_parser::BarcodeFormat;
use image_engine::{BarcodeStyle, encode_png, generate_barcode};

use super::{GenerationError, Rendered};

/// Renders linear barcodes as PNG.
#[derive(Debug, Clone)]
pub struct BarcodeService {
    style: BarcodeStyle,
}

impl BarcodeService {
    pub fn new(style: BarcodeStyle) -> Self {
        Self { style }
    }

    /// Numeric formats are digit-normalized by the engine before encoding.
    pub fn render(&self, text: &str, format: BarcodeFormat) -> Result<Rendered, GenerationError> {
        let img = generate_barcode(text, format, &self.style).map_err(GenerationError::Barcode)?;
        let png = encode_png(&img).map_err(GenerationError::Barcode)?;
        tracing::debug!(%format, bytes = png.len(), "Barcode rendered");
        Ok(Rendered::from_png(png))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_every_format() {
        let svc = BarcodeService::new(BarcodeStyle::default());
        for format in BarcodeFormat::ALL {
            let rendered = svc.render("123456789012", format).unwrap();
            assert!(rendered.png.starts_with(b"\x89PNG"), "{format}");
        }
    }

    #[test]
    fn non_numeric_ean_is_zero_padded_not_rejected() {
        let svc = BarcodeService::new(BarcodeStyle::default());
        assert!(svc.render("hello", BarcodeFormat::Ean13).is_ok());
    }

    #[test]
    fn unsupported_code128_text_is_a_barcode_error() {
        let svc = BarcodeService::new(BarcodeStyle::default());
        let err = svc.render("日本語", BarcodeFormat::Code128).unwrap_err();
        assert!(matches!(err, GenerationError::Barcode(_)));
        assert!(err.to_string().starts_with("Barcode generation failed"));
    }
}
