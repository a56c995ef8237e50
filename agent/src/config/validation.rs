//! Setting value validation.

use regex::Regex;
use std::sync::LazyLock;

static RE_HTTP_URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^https?://\S+$").unwrap());

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        "MAX_STORED_FILES" => validate_int_range(value, 1, 100_000)?,
        "QR_BORDER" => validate_int_range(value, 0, 20)?,
        "BARCODE_MODULE_WIDTH" => validate_int_range(value, 1, 10)?,
        "BARCODE_HEIGHT" => validate_int_range(value, 10, 1000)?,
        "AGENT_NAME" => {
            let len = value.chars().count();
            if len == 0 || len > 64 {
                return Err("agent name must be 1-64 characters".into());
            }
        }
        "TELEX_WEBHOOK_URL" => {
            if !RE_HTTP_URL.is_match(value) {
                return Err("must be an http(s) URL".into());
            }
        }
        "SAVE_IMAGES" => {
            if value != "true" && value != "false" {
                return Err("must be 'true' or 'false'".into());
            }
        }
        _ => {}
    }
    Ok(())
}

fn validate_int_range(value: &str, min: i64, max: i64) -> Result<(), String> {
    let v: i64 = value.parse().map_err(|_| "must be an integer")?;
    if v < min || v > max {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_boolean() {
        assert!(validate_setting("SAVE_IMAGES", "true").is_ok());
        assert!(validate_setting("SAVE_IMAGES", "false").is_ok());
        assert!(validate_setting("SAVE_IMAGES", "yes").is_err());
    }

    #[test]
    fn test_int_ranges() {
        assert!(validate_setting("MAX_STORED_FILES", "100").is_ok());
        assert!(validate_setting("MAX_STORED_FILES", "0").is_err());
        assert!(validate_setting("QR_BORDER", "0").is_ok());
        assert!(validate_setting("QR_BORDER", "21").is_err());
        assert!(validate_setting("BARCODE_HEIGHT", "tall").is_err());
    }

    #[test]
    fn test_webhook_url() {
        assert!(validate_setting("TELEX_WEBHOOK_URL", "https://api.telex.im/webhook").is_ok());
        assert!(validate_setting("TELEX_WEBHOOK_URL", "ftp://example.com").is_err());
        assert!(validate_setting("TELEX_WEBHOOK_URL", "https://").is_err());
    }

    #[test]
    fn test_unknown_keys_pass() {
        assert!(validate_setting("OUTPUT_DIR", "/tmp/anything").is_ok());
    }
}
