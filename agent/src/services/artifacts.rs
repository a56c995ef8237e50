//! Generated image storage with bounded retention.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of a cleanup pass. Failures are collected, never swallowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub scanned: usize,
    pub kept: usize,
    pub removed: Vec<PathBuf>,
    pub failures: Vec<(PathBuf, String)>,
}

impl CleanupReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Writes `<prefix>_<id>.png` files into one directory and keeps at most
/// `max_files` of them per prefix.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
    max_files: usize,
}

impl ArtifactStore {
    pub fn new(dir: PathBuf, max_files: usize) -> Self {
        Self { dir, max_files }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Save PNG bytes under a fresh name and return the written path.
    pub fn save(&self, prefix: &str, png: &[u8]) -> Result<PathBuf, ArtifactError> {
        std::fs::create_dir_all(&self.dir)?;

        let id = uuid::Uuid::new_v4().simple().to_string();
        let path = self.dir.join(format!("{prefix}_{}.png", &id[..8]));
        std::fs::write(&path, png)?;

        tracing::debug!(path = %path.display(), bytes = png.len(), "Artifact saved");
        Ok(path)
    }

    /// Remove the oldest files with `prefix` until at most `max_files` remain.
    pub fn cleanup(&self, prefix: &str) -> CleanupReport {
        let mut report = CleanupReport::default();
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                report.failures.push((self.dir.clone(), e.to_string()));
                return report;
            }
        };

        let marker = format!("{prefix}_");
        let mut files: Vec<(SystemTime, PathBuf)> = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    report.failures.push((self.dir.clone(), e.to_string()));
                    continue;
                }
            };
            if !entry.file_name().to_string_lossy().starts_with(&marker) {
                continue;
            }
            let path = entry.path();
            match entry.metadata().and_then(|m| m.modified()) {
                Ok(modified) => files.push((modified, path)),
                // Removed by a concurrent cleanup
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => report.failures.push((path, e.to_string())),
            }
        }

        report.scanned = files.len();
        if files.len() <= self.max_files {
            report.kept = files.len();
            return report;
        }

        // Oldest first
        files.sort();
        let excess = files.len() - self.max_files;
        for (_, path) in files.drain(..excess) {
            match remove_artifact(&path) {
                Ok(()) => report.removed.push(path),
                Err(e) => report.failures.push((path, e.to_string())),
            }
        }
        report.kept = files.len();

        tracing::info!(
            prefix,
            removed = report.removed.len(),
            failures = report.failures.len(),
            "Old artifacts cleaned up"
        );
        report
    }
}

/// Delete one file. A file that is already gone counts as removed, since
/// cleanups for the same prefix may overlap.
fn remove_artifact(path: &Path) -> std::io::Result<()> {
    match std::fs::remove_file(path) {
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn backdate(path: &Path, secs_ago: u64) {
        let file = std::fs::File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::now() - Duration::from_secs(secs_ago))
            .unwrap();
    }

    #[test]
    fn save_writes_prefixed_png() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(tmp.path().join("images"), 10);
        let path = store.save("qr", b"png-bytes").unwrap();

        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("qr_"));
        assert!(name.ends_with(".png"));
        assert_eq!(name.len(), "qr_".len() + 8 + ".png".len());
        assert_eq!(std::fs::read(&path).unwrap(), b"png-bytes");
    }

    #[test]
    fn cleanup_keeps_newest_files() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(tmp.path().to_path_buf(), 2);

        let oldest = store.save("qr", b"1").unwrap();
        let middle = store.save("qr", b"2").unwrap();
        let newest = store.save("qr", b"3").unwrap();
        backdate(&oldest, 300);
        backdate(&middle, 200);
        backdate(&newest, 100);

        let report = store.cleanup("qr");
        assert!(report.is_clean());
        assert_eq!(report.scanned, 3);
        assert_eq!(report.kept, 2);
        assert_eq!(report.removed, vec![oldest.clone()]);
        assert!(!oldest.exists());
        assert!(middle.exists());
        assert!(newest.exists());
    }

    #[test]
    fn cleanup_only_touches_matching_prefix() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(tmp.path().to_path_buf(), 1);

        let qr_a = store.save("qr", b"a").unwrap();
        let qr_b = store.save("qr", b"b").unwrap();
        let barcode = store.save("barcode", b"c").unwrap();
        backdate(&qr_a, 100);

        let report = store.cleanup("barcode");
        assert_eq!(report.scanned, 1);
        assert!(report.removed.is_empty());

        let report = store.cleanup("qr");
        assert_eq!(report.removed, vec![qr_a]);
        assert!(qr_b.exists());
        assert!(barcode.exists());
    }

    #[test]
    fn missing_directory_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(tmp.path().join("nope"), 1);
        let report = store.cleanup("qr");
        assert!(!report.is_clean());
        assert_eq!(report.scanned, 0);
    }

    #[test]
    fn already_removed_file_is_not_a_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(tmp.path().to_path_buf(), 1);
        let path = store.save("qr", b"x").unwrap();

        std::fs::remove_file(&path).unwrap();
        assert!(remove_artifact(&path).is_ok());
        assert!(remove_artifact(&tmp.path().join("qr_missing.png")).is_ok());
    }

    #[test]
    fn overlapping_cleanups_report_clean() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(tmp.path().to_path_buf(), 1);
        for (i, age) in [300u64, 200, 100].into_iter().enumerate() {
            let path = store.save("qr", &[i as u8]).unwrap();
            backdate(&path, age);
        }

        let first = store.cleanup("qr");
        let second = store.cleanup("qr");
        assert!(first.is_clean());
        assert!(second.is_clean());
        assert_eq!(first.removed.len(), 2);
        assert!(second.removed.is_empty());
        assert_eq!(second.kept, 1);
    }
}
