//! Intent types produced by the parser.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::DEFAULT_QR_SIZE;

/// What the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentKind {
    Qr,
    Barcode,
    Help,
}

/// Supported barcode symbologies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarcodeFormat {
    #[default]
    Code128,
    Ean13,
    Ean8,
    Upc,
}

impl BarcodeFormat {
    pub const ALL: [BarcodeFormat; 4] = [
        BarcodeFormat::Code128,
        BarcodeFormat::Ean13,
        BarcodeFormat::Ean8,
        BarcodeFormat::Upc,
    ];

    /// Lowercase token used in commands (`format:ean13`).
    pub fn as_str(self) -> &'static str {
        match self {
            BarcodeFormat::Code128 => "code128",
            BarcodeFormat::Ean13 => "ean13",
            BarcodeFormat::Ean8 => "ean8",
            BarcodeFormat::Upc => "upc",
        }
    }

    /// Case-insensitive lookup. Returns `None` for unknown tokens.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(token))
    }

    /// Like [`from_token`](Self::from_token) but unknown tokens resolve to CODE128.
    pub fn normalize(token: &str) -> Self {
        Self::from_token(token).unwrap_or_default()
    }

    /// Number of payload digits the symbology carries before its check digit.
    /// `None` for CODE128, which takes arbitrary text.
    pub fn payload_digits(self) -> Option<usize> {
        match self {
            BarcodeFormat::Code128 => None,
            BarcodeFormat::Ean13 => Some(12),
            BarcodeFormat::Ean8 => Some(7),
            BarcodeFormat::Upc => Some(11),
        }
    }
}

impl fmt::Display for BarcodeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured result of parsing one chat message.
///
/// `qr_size` is only meaningful for [`IntentKind::Qr`] and `barcode_format`
/// only for [`IntentKind::Barcode`]; both always hold valid values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedIntent {
    pub kind: IntentKind,
    pub text: String,
    pub qr_size: u32,
    pub barcode_format: BarcodeFormat,
}

impl ParsedIntent {
    pub fn help() -> Self {
        Self {
            kind: IntentKind::Help,
            text: String::new(),
            qr_size: DEFAULT_QR_SIZE,
            barcode_format: BarcodeFormat::default(),
        }
    }

    /// `size` is clamped into the valid range.
    pub fn qr(text: impl Into<String>, size: u32) -> Self {
        Self {
            kind: IntentKind::Qr,
            text: text.into(),
            qr_size: crate::clamp_qr_size(size),
            barcode_format: BarcodeFormat::default(),
        }
    }

    pub fn barcode(text: impl Into<String>, format: BarcodeFormat) -> Self {
        Self {
            kind: IntentKind::Barcode,
            text: text.into(),
            qr_size: DEFAULT_QR_SIZE,
            barcode_format: format,
        }
    }
}
