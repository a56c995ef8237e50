//! PNG and data-URI encoding.

use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{DynamicImage, ImageFormat};

use crate::ImageError;

pub const PNG_MIME: &str = "image/png";

/// Encode an image as PNG bytes.
pub fn encode_png(img: &DynamicImage) -> Result<Vec<u8>, ImageError> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}

/// Wrap raw bytes as a `data:<mime>;base64,...` URI.
pub fn to_data_uri(bytes: &[u8], mime: &str) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    #[test]
    fn encode_png_writes_signature() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(4, 4, Luma([0u8])));
        let bytes = encode_png(&img).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn data_uri_has_prefix() {
        assert_eq!(to_data_uri(b"abc", PNG_MIME), "data:image/png;base64,YWJj");
    }
}
