//! Runtime application configuration loaded from the environment.

use std::path::PathBuf;

use image_engine::BarcodeStyle;

use super::defaults::{describe, get_default};
use super::validation::validate_setting;

/// Runtime configuration, passed explicitly to every service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub save_images: bool,
    pub max_stored_files: usize,
    pub qr_border: u32,
    pub barcode_module_width: u32,
    pub barcode_height: u32,
    pub agent_name: String,
    pub telex_webhook_url: String,
    pub telex_channel_id: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::load(|_| None)
    }
}

impl AppConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::load(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`. Missing or invalid values fall
    /// back to their defaults; invalid ones are logged.
    pub fn load(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let g = |key: &str| -> String {
            let default = get_default(key).unwrap_or_default();
            match lookup(key).map(|v| v.trim().to_string()) {
                Some(v) if !v.is_empty() => match validate_setting(key, &v) {
                    Ok(()) => v,
                    Err(e) => {
                        tracing::warn!(
                            key,
                            value = %v,
                            setting = describe(key).unwrap_or_default(),
                            "Invalid setting ({e}), using default"
                        );
                        default.to_string()
                    }
                },
                _ => default.to_string(),
            }
        };

        let data_dir = {
            let d = g("QR_AGENT_DATA_DIR");
            if d.is_empty() { default_data_dir() } else { PathBuf::from(d) }
        };
        let output_dir = {
            let d = g("OUTPUT_DIR");
            if d.is_empty() { data_dir.join("images") } else { PathBuf::from(d) }
        };
        let telex_channel_id = Some(g("TELEX_CHANNEL_ID")).filter(|c| !c.is_empty());

        Self {
            output_dir,
            data_dir,
            save_images: g("SAVE_IMAGES") == "true",
            max_stored_files: parse_or(&g("MAX_STORED_FILES"), 100),
            qr_border: parse_or(&g("QR_BORDER"), image_engine::QR_BORDER),
            barcode_module_width: parse_or(&g("BARCODE_MODULE_WIDTH"), 2),
            barcode_height: parse_or(&g("BARCODE_HEIGHT"), 120),
            agent_name: g("AGENT_NAME"),
            telex_webhook_url: g("TELEX_WEBHOOK_URL"),
            telex_channel_id,
        }
    }

    pub fn barcode_style(&self) -> BarcodeStyle {
        BarcodeStyle {
            module_width: self.barcode_module_width,
            bar_height: self.barcode_height,
            ..BarcodeStyle::default()
        }
    }
}

/// Priority: QR_AGENT_DATA_DIR > ~/.qr-barcode-agent
fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".qr-barcode-agent")
}

fn parse_or<T: std::str::FromStr>(s: &str, default: T) -> T {
    if s.is_empty() {
        return default;
    }
    s.parse().unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::load(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = load(&[("QR_AGENT_DATA_DIR", "/srv/agent")]);
        assert_eq!(config.data_dir, PathBuf::from("/srv/agent"));
        assert_eq!(config.output_dir, PathBuf::from("/srv/agent/images"));
        assert!(config.save_images);
        assert_eq!(config.max_stored_files, 100);
        assert_eq!(config.qr_border, 4);
        assert_eq!(config.agent_name, "QRBarcodeBot");
        assert_eq!(config.telex_webhook_url, "https://api.telex.im/webhook");
        assert_eq!(config.telex_channel_id, None);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = load(&[
            ("OUTPUT_DIR", "/tmp/codes"),
            ("SAVE_IMAGES", "false"),
            ("MAX_STORED_FILES", "5"),
            ("BARCODE_HEIGHT", "200"),
            ("TELEX_CHANNEL_ID", "chan-9"),
        ]);
        assert_eq!(config.output_dir, PathBuf::from("/tmp/codes"));
        assert!(!config.save_images);
        assert_eq!(config.max_stored_files, 5);
        assert_eq!(config.barcode_style().bar_height, 200);
        assert_eq!(config.telex_channel_id.as_deref(), Some("chan-9"));
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = load(&[
            ("MAX_STORED_FILES", "-3"),
            ("QR_BORDER", "lots"),
            ("TELEX_WEBHOOK_URL", "not a url"),
            ("SAVE_IMAGES", "maybe"),
        ]);
        assert_eq!(config.max_stored_files, 100);
        assert_eq!(config.qr_border, 4);
        assert_eq!(config.telex_webhook_url, "https://api.telex.im/webhook");
        assert!(config.save_images);
    }
}
