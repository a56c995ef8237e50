//! Agent description sent when registering with Telex.

use serde::Serialize;

use command_parser::BarcodeFormat;

use crate::config::AppConfig;

#[derive(Debug, Clone, Serialize)]
pub struct Skill {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub examples: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCard {
    pub name: String,
    pub description: &'static str,
    pub version: &'static str,
    pub default_input_modes: Vec<&'static str>,
    pub default_output_modes: Vec<&'static str>,
    pub barcode_formats: Vec<&'static str>,
    pub skills: Vec<Skill>,
}

pub fn agent_card(config: &AppConfig) -> AgentCard {
    AgentCard {
        name: config.agent_name.clone(),
        description: "Generate QR codes and barcodes for any text or data",
        version: env!("CARGO_PKG_VERSION"),
        default_input_modes: vec!["text/plain"],
        default_output_modes: vec!["text/plain", image_engine::PNG_MIME],
        barcode_formats: BarcodeFormat::ALL.iter().map(|f| f.as_str()).collect(),
        skills: vec![
            Skill {
                id: "qr",
                name: "QR code",
                description: "Encode text or a URL as a QR code (size:1-40)",
                examples: vec!["qr https://example.com", "qr size:20 Hello World"],
            },
            Skill {
                id: "barcode",
                name: "Barcode",
                description: "Encode text as a code128, ean13, ean8 or upc barcode",
                examples: vec!["barcode 1234567890", "barcode format:ean13 123456789012"],
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_uses_configured_name_and_lists_formats() {
        let config = AppConfig {
            agent_name: "CodesBot".into(),
            ..AppConfig::default()
        };
        let value = serde_json::to_value(agent_card(&config)).unwrap();
        assert_eq!(value["name"], "CodesBot");
        assert_eq!(value["version"], "1.0.0");
        assert_eq!(value["barcodeFormats"].as_array().unwrap().len(), 4);
        assert_eq!(value["skills"][0]["id"], "qr");
        assert_eq!(value["defaultOutputModes"][1], "image/png");
    }
}
