//! Backup pipeline orchestration
//!
//! Runs the full sequence: snapshot, archive, deliver. Each step blocks
//! until complete and feeds the next. The staging directory is always
//! removed once archiving has been attempted; the archive file is removed
//! only after a successful remote delivery, so a failed upload always
//! leaves the archive on disk for manual recovery.

use std::fs;
use std::path::PathBuf;

use log::{info, warn};

use super::archive;
use super::snapshot::{BackupContext, SnapshotBuilder};
use crate::config::{Settings, VaultPaths};
use crate::error::VaultResult;
use crate::transport::{Delivery, TransportChannel};

/// Outcome of a backup run
#[derive(Debug)]
pub struct BackupReport {
    /// Name of the snapshot that was staged
    pub snapshot_name: String,
    /// Where the archive still lives, if it was kept
    pub archive_path: Option<PathBuf>,
    /// Archive size in bytes
    pub archive_size: u64,
    /// Channel label used for this run
    pub channel: &'static str,
    /// Successful delivery details
    pub delivery: Option<Delivery>,
    /// Delivery failure, reported but non-fatal
    pub delivery_error: Option<String>,
}

impl BackupReport {
    /// True when the archive reached its configured destination
    pub fn delivered(&self) -> bool {
        self.delivery.is_some()
    }
}

/// Drives the snapshot/archive/deliver pipeline
pub struct BackupRunner {
    paths: VaultPaths,
    settings: Settings,
}

impl BackupRunner {
    /// Create a new BackupRunner
    pub fn new(paths: VaultPaths, settings: Settings) -> Self {
        Self { paths, settings }
    }

    /// Run a full backup.
    ///
    /// Snapshot or archive failures abort the run. A delivery failure does
    /// not: it is recorded in the report and the archive is preserved.
    pub fn run(&self, ctx: &BackupContext) -> VaultResult<BackupReport> {
        let builder = SnapshotBuilder::new(self.paths.clone(), self.settings.environment.clone());
        let snapshot = builder.build(ctx, self.paths.root())?;

        let archive_path = self.paths.root().join(format!("{}.zip", snapshot.name()));
        let packed = archive::pack(&snapshot.dir, &archive_path);

        // The snapshot is ephemeral: gone as soon as archiving has run.
        if let Err(e) = snapshot.remove() {
            warn!("Failed to clean up snapshot directory: {}", e);
        }
        packed?;

        let archive_size = fs::metadata(&archive_path).map(|m| m.len()).unwrap_or(0);
        let channel = TransportChannel::select(&self.settings);

        match channel.deliver(&archive_path) {
            Ok(delivery) => {
                // Delivered one way or another: the working copy at the
                // root is no longer needed. Local-file delivery keeps the
                // archive at its configured destination instead.
                if let Err(e) = fs::remove_file(&archive_path) {
                    warn!("Failed to remove delivered archive: {}", e);
                }
                let final_path = match &delivery {
                    Delivery::Stored { path } => Some(path.clone()),
                    _ => None,
                };
                info!("Backup delivered via {} channel", channel.label());
                Ok(BackupReport {
                    snapshot_name: snapshot.name(),
                    archive_path: final_path,
                    archive_size,
                    channel: channel.label(),
                    delivery: Some(delivery),
                    delivery_error: None,
                })
            }
            Err(e) => {
                warn!("Delivery failed, archive kept at {}: {}", archive_path.display(), e);
                Ok(BackupReport {
                    snapshot_name: snapshot.name(),
                    archive_path: Some(archive_path),
                    archive_size,
                    channel: channel.label(),
                    delivery: None,
                    delivery_error: Some(e.to_string()),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn seeded_root() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("cache")).unwrap();
        fs::write(
            temp.path().join("cache/custom_symbols.json"),
            r#"{"symbols":["BTCUSDT"]}"#,
        )
        .unwrap();
        temp
    }

    #[test]
    fn test_local_run_keeps_archive_and_removes_staging() {
        let root = seeded_root();
        let out = root.path().join("archives");
        let paths = VaultPaths::with_root(root.path().to_path_buf());
        let settings = Settings {
            output_dir: Some(out.clone()),
            ..Settings::default()
        };

        let report = BackupRunner::new(paths, settings)
            .run(&BackupContext::now())
            .unwrap();

        assert!(report.delivered());
        assert_eq!(report.channel, "local");
        let stored = report.archive_path.clone().unwrap();
        assert!(stored.starts_with(&out));
        assert!(stored.exists());
        // Staging directory and working archive are gone.
        assert!(!root.path().join(&report.snapshot_name).exists());
        assert!(!root
            .path()
            .join(format!("{}.zip", report.snapshot_name))
            .exists());
    }

    #[test]
    fn test_text_run_removes_local_archive_after_emission() {
        let root = seeded_root();
        let paths = VaultPaths::with_root(root.path().to_path_buf());

        let report = BackupRunner::new(paths, Settings::default())
            .run(&BackupContext::now())
            .unwrap();

        assert_eq!(report.channel, "text");
        assert!(report.delivered());
        assert!(report.archive_path.is_none());
        assert!(!root
            .path()
            .join(format!("{}.zip", report.snapshot_name))
            .exists());
    }

    #[test]
    fn test_failed_upload_is_nonfatal_and_preserves_archive() {
        let root = seeded_root();
        let paths = VaultPaths::with_root(root.path().to_path_buf());
        let settings = Settings {
            // Nothing listens here; the request fails outright.
            webhook_url: Some("http://127.0.0.1:1/upload".into()),
            upload_timeout_secs: 2,
            ..Settings::default()
        };

        let report = BackupRunner::new(paths, settings)
            .run(&BackupContext::now())
            .unwrap();

        assert!(!report.delivered());
        assert!(report.delivery_error.is_some());
        let archive = report.archive_path.unwrap();
        assert!(archive.exists());
        assert_eq!(fs::metadata(&archive).unwrap().len(), report.archive_size);
    }
}
