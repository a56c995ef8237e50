//! Linear barcode rendering (CODE128, EAN-13, EAN-8, UPC-A).

use barcoders::sym::code128::Code128;
use barcoders::sym::ean8::EAN8;
use barcoders::sym::ean13::EAN13;
use command_parser::BarcodeFormat;
use image::{DynamicImage, GrayImage, Luma};
use tracing::debug;

use crate::ImageError;

// Code set selectors understood by `barcoders`.
const CODE128_SET_B: char = 'Ɓ';
const CODE128_SET_C: char = 'Ć';

/// Bar geometry in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarcodeStyle {
    /// Width of the narrowest bar.
    pub module_width: u32,
    pub bar_height: u32,
    /// Blank margin on each side, in modules.
    pub quiet_zone: u32,
}

impl Default for BarcodeStyle {
    fn default() -> Self {
        Self {
            module_width: 2,
            bar_height: 120,
            quiet_zone: 10,
        }
    }
}

/// Prepare a payload for the given symbology.
///
/// Numeric symbologies keep ASCII digits only, truncated or right-padded
/// with `0` to the length they carry before the check digit. CODE128 text
/// passes through unchanged.
pub fn normalize_payload(text: &str, format: BarcodeFormat) -> String {
    let Some(len) = format.payload_digits() else {
        return text.to_string();
    };
    let mut digits: String = text.chars().filter(char::is_ascii_digit).take(len).collect();
    while digits.len() < len {
        digits.push('0');
    }
    digits
}

/// Encode a payload into its bar pattern, one entry per module (1 = bar).
pub fn encode_modules(text: &str, format: BarcodeFormat) -> Result<Vec<u8>, ImageError> {
    let payload = normalize_payload(text, format);
    let rejected = |e: barcoders::error::Error| ImageError::Symbology {
        format,
        reason: e.to_string(),
    };

    let modules = match format {
        BarcodeFormat::Code128 => Code128::new(code128_data(&payload))
            .map_err(rejected)?
            .encode(),
        BarcodeFormat::Ean13 => EAN13::new(payload).map_err(rejected)?.encode(),
        BarcodeFormat::Ean8 => EAN8::new(payload).map_err(rejected)?.encode(),
        // UPC-A is the EAN-13 subset with a leading zero.
        BarcodeFormat::Upc => EAN13::new(format!("0{payload}")).map_err(rejected)?.encode(),
    };
    Ok(modules)
}

/// Render a barcode image.
pub fn generate_barcode(
    text: &str,
    format: BarcodeFormat,
    style: &BarcodeStyle,
) -> Result<DynamicImage, ImageError> {
    let modules = encode_modules(text, format)?;
    let scale = style.module_width.max(1);
    let margin = style.quiet_zone * scale;
    let width = modules.len() as u32 * scale + 2 * margin;
    let height = style.bar_height.max(1) + 2 * margin;

    debug!(%format, modules = modules.len(), width, height, "Rendering barcode");

    let mut img = GrayImage::from_pixel(width, height, Luma([255u8]));
    for (i, bar) in modules.iter().enumerate() {
        if *bar == 0 {
            continue;
        }
        let x0 = margin + i as u32 * scale;
        for x in x0..x0 + scale {
            for y in margin..height - margin {
                img.put_pixel(x, y, Luma([0u8]));
            }
        }
    }

    Ok(DynamicImage::ImageLuma8(img))
}

/// Pick code set C for even-length digit strings, B otherwise.
fn code128_data(payload: &str) -> String {
    let numeric = !payload.is_empty()
        && payload.len() % 2 == 0
        && payload.chars().all(|c| c.is_ascii_digit());
    let set = if numeric { CODE128_SET_C } else { CODE128_SET_B };
    format!("{set}{payload}")
}
