use crate::config::AppConfig;

/// Load .env from multiple candidate paths.
fn load_dotenv() {
    let candidates = [".env", "../.env", "../../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}

/// Load .env and configuration, and prepare the output directory.
pub fn init_foundation() -> Result<AppConfig, anyhow::Error> {
    load_dotenv();
    let config = AppConfig::from_env();
    prepare_dirs(&config)?;

    tracing::info!(
        agent = %config.agent_name,
        data_dir = %config.data_dir.display(),
        max_stored_files = config.max_stored_files,
        "Settings loaded"
    );
    Ok(config)
}

/// Create the data and output directories when images are kept.
pub fn prepare_dirs(config: &AppConfig) -> Result<(), anyhow::Error> {
    if !config.save_images {
        return Ok(());
    }
    for dir in [&config.data_dir, &config.output_dir] {
        std::fs::create_dir_all(dir)?;
    }
    tracing::info!("Saving generated images to {}", config.output_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directories_created_when_saving() {
        let tmp = tempfile::tempdir().unwrap();
        let config = AppConfig {
            data_dir: tmp.path().join("data"),
            output_dir: tmp.path().join("out/images"),
            ..AppConfig::default()
        };
        prepare_dirs(&config).unwrap();
        assert!(config.data_dir.is_dir());
        assert!(config.output_dir.is_dir());
    }

    #[test]
    fn nothing_created_when_saving_is_off() {
        let tmp = tempfile::tempdir().unwrap();
        let config = AppConfig {
            data_dir: tmp.path().join("data"),
            output_dir: tmp.path().join("images"),
            save_images: false,
            ..AppConfig::default()
        };
        prepare_dirs(&config).unwrap();
        assert!(!config.data_dir.exists());
        assert!(!config.output_dir.exists());
    }
}
