//! All setting definitions with their default values.

use std::collections::HashMap;
use std::sync::LazyLock;

/// A single setting definition.
#[derive(Debug, Clone)]
pub struct SettingDef {
    pub key: &'static str,
    pub default: &'static str,
    pub description: &'static str,
}

const DEFS: &[(&str, &str, &str)] = &[
    ("QR_AGENT_DATA_DIR", "", "Base data directory (defaults to ~/.qr-barcode-agent)"),
    ("OUTPUT_DIR", "", "Directory for generated images (defaults to <data dir>/images)"),
    ("SAVE_IMAGES", "true", "Keep a PNG copy of every generated code"),
    ("MAX_STORED_FILES", "100", "Generated files kept per kind before cleanup"),
    ("QR_BORDER", "4", "Quiet zone around QR codes, in modules"),
    ("BARCODE_MODULE_WIDTH", "2", "Width of the narrowest barcode bar, in pixels"),
    ("BARCODE_HEIGHT", "120", "Barcode bar height, in pixels"),
    ("AGENT_NAME", "QRBarcodeBot", "Name reported to Telex"),
    ("TELEX_WEBHOOK_URL", telex_client::DEFAULT_WEBHOOK_URL, "Telex webhook endpoint"),
    ("TELEX_CHANNEL_ID", "", "Forward every reply to this channel when set"),
];

/// Global setting definitions indexed by key.
pub static DEFAULT_SETTINGS: LazyLock<HashMap<&'static str, SettingDef>> = LazyLock::new(|| {
    DEFS.iter()
        .map(|&(key, default, description)| {
            (
                key,
                SettingDef {
                    key,
                    default,
                    description,
                },
            )
        })
        .collect()
});

/// Get the default value for a setting key, or `None` if not defined.
pub fn get_default(key: &str) -> Option<&'static str> {
    DEFAULT_SETTINGS.get(key).map(|d| d.default)
}

/// Human-readable description of a setting key.
pub fn describe(key: &str) -> Option<&'static str> {
    DEFAULT_SETTINGS.get(key).map(|d| d.description)
}

/// Every setting definition, sorted by key.
pub fn setting_defs() -> Vec<&'static SettingDef> {
    let mut defs: Vec<_> = DEFAULT_SETTINGS.values().collect();
    defs.sort_by_key(|d| d.key);
    defs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_has_a_definition() {
        assert_eq!(DEFAULT_SETTINGS.len(), DEFS.len());
        assert_eq!(get_default("MAX_STORED_FILES"), Some("100"));
        assert_eq!(get_default("AGENT_NAME"), Some("QRBarcodeBot"));
        assert_eq!(get_default("UNKNOWN"), None);
    }

    #[test]
    fn definitions_are_listed_by_key() {
        let defs = setting_defs();
        assert_eq!(defs.len(), DEFS.len());
        assert!(defs.windows(2).all(|w| w[0].key < w[1].key));
        assert!(defs.iter().all(|d| !d.description.is_empty()));
        assert_eq!(
            describe("BARCODE_HEIGHT"),
            Some("Barcode bar height, in pixels")
        );
        assert_eq!(describe("UNKNOWN"), None);
    }
}
