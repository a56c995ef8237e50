use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::{ArtifactStore, BarcodeService, QrService};

/// Application shared state handed to every request handler.
#[derive(Clone)]
pub struct SharedState {
    inner: Arc<SharedStateInner>,
}

struct SharedStateInner {
    config: AppConfig,
    qr: QrService,
    barcode: BarcodeService,
    /// `None` when image persistence is disabled
    artifacts: Option<ArtifactStore>,
}

impl SharedState {
    /// Build every service from an already-loaded config.
    pub fn new(config: AppConfig) -> Self {
        let qr = QrService::new(config.qr_border);
        let barcode = BarcodeService::new(config.barcode_style());
        let artifacts = config
            .save_images
            .then(|| ArtifactStore::new(config.output_dir.clone(), config.max_stored_files));

        Self {
            inner: Arc::new(SharedStateInner {
                config,
                qr,
                barcode,
                artifacts,
            }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn qr(&self) -> &QrService {
        &self.inner.qr
    }

    pub fn barcode(&self) -> &BarcodeService {
        &self.inner.barcode
    }

    pub fn artifacts(&self) -> Option<&ArtifactStore> {
        self.inner.artifacts.as_ref()
    }
}
