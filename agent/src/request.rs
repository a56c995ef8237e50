//! Typed direct requests: generate one code without going through the
//! chat command parser.

use command_parser::{BarcodeFormat, MAX_QR_SIZE, MIN_QR_SIZE};
use serde::{Deserialize, Serialize};

/// Longest text accepted for a QR request, in characters.
pub const MAX_QR_TEXT_CHARS: usize = 2000;
/// Longest text accepted for a barcode request, in characters.
pub const MAX_BARCODE_TEXT_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("text must be 1 to {max} characters long (got {len})")]
    TextLength { len: usize, max: usize },

    #[error("size must be between 1 and 40 (got {0})")]
    Size(u32),

    #[error("unsupported barcode format: {0}")]
    Format(String),
}

fn check_text(text: &str, max: usize) -> Result<(), RequestError> {
    let len = text.chars().count();
    if len == 0 || len > max {
        return Err(RequestError::TextLength { len, max });
    }
    Ok(())
}

/// A validated QR request. Unlike chat commands, an out-of-range size is
/// rejected rather than clamped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawQrRequest")]
pub struct QrRequest {
    text: String,
    size: u32,
}

#[derive(Deserialize)]
struct RawQrRequest {
    text: String,
    size: Option<u32>,
}

impl QrRequest {
    /// `size` defaults to 10 when absent.
    pub fn new(text: impl Into<String>, size: Option<u32>) -> Result<Self, RequestError> {
        let text = text.into();
        check_text(&text, MAX_QR_TEXT_CHARS)?;
        let size = size.unwrap_or(command_parser::DEFAULT_QR_SIZE);
        if !(MIN_QR_SIZE..=MAX_QR_SIZE).contains(&size) {
            return Err(RequestError::Size(size));
        }
        Ok(Self { text, size })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn size(&self) -> u32 {
        self.size
    }
}

impl TryFrom<RawQrRequest> for QrRequest {
    type Error = RequestError;

    fn try_from(raw: RawQrRequest) -> Result<Self, Self::Error> {
        Self::new(raw.text, raw.size)
    }
}

/// A validated barcode request. Unknown formats are rejected here, where
/// chat commands would fall back to CODE128.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBarcodeRequest")]
pub struct BarcodeRequest {
    text: String,
    format: BarcodeFormat,
}

#[derive(Deserialize)]
struct RawBarcodeRequest {
    text: String,
    format: Option<String>,
}

impl BarcodeRequest {
    pub fn new(text: impl Into<String>, format: BarcodeFormat) -> Result<Self, RequestError> {
        let text = text.into();
        check_text(&text, MAX_BARCODE_TEXT_CHARS)?;
        Ok(Self { text, format })
    }

    /// Like [`new`](Self::new) with a format token such as `"ean13"`.
    pub fn with_token(text: impl Into<String>, token: Option<&str>) -> Result<Self, RequestError> {
        let format = match token {
            Some(token) => BarcodeFormat::from_token(token)
                .ok_or_else(|| RequestError::Format(token.to_string()))?,
            None => BarcodeFormat::default(),
        };
        Self::new(text, format)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn format(&self) -> BarcodeFormat {
        self.format
    }
}

impl TryFrom<RawBarcodeRequest> for BarcodeRequest {
    type Error = RequestError;

    fn try_from(raw: RawBarcodeRequest) -> Result<Self, Self::Error> {
        Self::with_token(raw.text, raw.format.as_deref())
    }
}

/// Result of a direct request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectResponse {
    pub success: bool,
    pub message: String,
    /// PNG as a data URI.
    pub image: String,
    /// File name of the saved copy, when one was written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn qr_request_defaults_size() {
        let req = QrRequest::new("hello", None).unwrap();
        assert_eq!(req.size(), 10);
        assert_eq!(req.text(), "hello");
    }

    #[test]
    fn qr_request_rejects_bad_size() {
        assert_eq!(QrRequest::new("x", Some(0)), Err(RequestError::Size(0)));
        assert_eq!(QrRequest::new("x", Some(41)), Err(RequestError::Size(41)));
        assert!(QrRequest::new("x", Some(40)).is_ok());
    }

    #[test]
    fn qr_request_text_length_in_chars() {
        assert_eq!(
            QrRequest::new("", None),
            Err(RequestError::TextLength { len: 0, max: 2000 })
        );
        assert!(QrRequest::new("é".repeat(2000), None).is_ok());
        assert_eq!(
            QrRequest::new("é".repeat(2001), None),
            Err(RequestError::TextLength { len: 2001, max: 2000 })
        );
    }

    #[test]
    fn barcode_request_limits() {
        assert!(BarcodeRequest::new("1".repeat(100), BarcodeFormat::Code128).is_ok());
        assert_eq!(
            BarcodeRequest::new("1".repeat(101), BarcodeFormat::Code128),
            Err(RequestError::TextLength { len: 101, max: 100 })
        );
    }

    #[test]
    fn barcode_request_format_token() {
        let req = BarcodeRequest::with_token("42", Some("EAN8")).unwrap();
        assert_eq!(req.format(), BarcodeFormat::Ean8);
        assert_eq!(
            BarcodeRequest::with_token("42", None).unwrap().format(),
            BarcodeFormat::Code128
        );
        assert_eq!(
            BarcodeRequest::with_token("42", Some("qr")),
            Err(RequestError::Format("qr".into()))
        );
    }

    #[test]
    fn requests_validate_on_deserialize() {
        let req: QrRequest = serde_json::from_value(json!({ "text": "hi", "size": 20 })).unwrap();
        assert_eq!(req.size(), 20);

        let err = serde_json::from_value::<QrRequest>(json!({ "text": "hi", "size": 99 }))
            .unwrap_err();
        assert!(err.to_string().contains("size must be between 1 and 40"));

        let req: BarcodeRequest =
            serde_json::from_value(json!({ "text": "123", "format": "upc" })).unwrap();
        assert_eq!(req.format(), BarcodeFormat::Upc);

        assert!(serde_json::from_value::<BarcodeRequest>(json!({ "text": "" })).is_err());
    }
}
