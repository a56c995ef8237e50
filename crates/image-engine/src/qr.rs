//! QR code rendering.

use image::{DynamicImage, GrayImage, Luma};
use qrcode::{EcLevel, QrCode};
use tracing::debug;

use crate::ImageError;

/// Generate a QR code image from a URL or text string.
///
/// Each module is drawn `module_px` pixels wide and the code is surrounded
/// by `border` white modules. The symbol version is picked to fit the data,
/// using the lowest error-correction level.
pub fn generate_qr(data: &str, module_px: u32, border: u32) -> Result<DynamicImage, ImageError> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::L)
        .map_err(|e| ImageError::Qr(e.to_string()))?;
    let modules = code.to_colors();
    let module_count = code.width() as u32;

    let scale = module_px.max(1);
    let img_size = (module_count + 2 * border) * scale;

    debug!(module_count, scale, img_size, "Rendering QR code");

    let mut img = GrayImage::from_pixel(img_size, img_size, Luma([255u8]));

    for (i, color) in modules.iter().enumerate() {
        let x = (i as u32) % module_count + border;
        let y = (i as u32) / module_count + border;

        if *color == qrcode::Color::Dark {
            for dx in 0..scale {
                for dy in 0..scale {
                    img.put_pixel(x * scale + dx, y * scale + dy, Luma([0u8]));
                }
            }
        }
    }

    Ok(DynamicImage::ImageLuma8(img))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_qr_produces_square_image() {
        let img = generate_qr("https://example.com", 10, 4).unwrap();
        assert!(img.width() > 0);
        assert_eq!(img.width(), img.height());
        assert_eq!(img.width() % 10, 0);
    }

    #[test]
    fn module_size_scales_image() {
        let small = generate_qr("Hello", 1, 4).unwrap();
        let large = generate_qr("Hello", 20, 4).unwrap();
        assert_eq!(large.width(), small.width() * 20);
    }

    #[test]
    fn border_is_white_and_symbol_has_dark_modules() {
        let img = generate_qr("test", 5, 4).unwrap().to_luma8();
        assert_eq!(img.get_pixel(0, 0), &Luma([255u8]));
        // Top-left finder pattern starts right after the quiet zone.
        assert_eq!(img.get_pixel(4 * 5, 4 * 5), &Luma([0u8]));
    }

    #[test]
    fn oversized_payload_is_rejected() {
        let data = "x".repeat(8000);
        let err = generate_qr(&data, 1, 4).unwrap_err();
        assert!(matches!(err, ImageError::Qr(_)));
    }
}
