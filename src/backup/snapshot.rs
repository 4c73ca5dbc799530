//! Snapshot building for SignalVault
//!
//! A snapshot is an ephemeral staging directory holding copies of the
//! protected user-data paths plus a manifest describing what actually made
//! it in. Paths missing at the source are skipped with a warning; any copy
//! failure for a path that does exist abandons the whole build.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::config::VaultPaths;
use crate::error::{VaultError, VaultResult};
use crate::fsutil;

/// Manifest filename written inside every snapshot
pub const MANIFEST_FILE: &str = "backup_info.json";

/// Prefix for user-data snapshot names
pub const SNAPSHOT_PREFIX: &str = "user_data_backup";

/// Per-run context carrying the timestamp every generated name derives from.
///
/// Constructed once at the start of a run so that all names within the run
/// agree, and so tests can pin the timestamp.
#[derive(Debug, Clone)]
pub struct BackupContext {
    timestamp: DateTime<Utc>,
}

impl BackupContext {
    /// Create a context stamped with the current time
    pub fn now() -> Self {
        Self {
            timestamp: Utc::now(),
        }
    }

    /// Create a context with a fixed timestamp (useful for testing)
    pub fn at(timestamp: DateTime<Utc>) -> Self {
        Self { timestamp }
    }

    /// The run's timestamp
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Compact name stamp, e.g. `20250829_143022`
    pub fn stamp(&self) -> String {
        self.timestamp.format("%Y%m%d_%H%M%S").to_string()
    }

    /// Snapshot directory name: `<prefix>_<YYYYMMDD_HHMMSS>`
    pub fn snapshot_name(&self) -> String {
        format!("{}_{}", SNAPSHOT_PREFIX, self.stamp())
    }
}

/// Manifest record written inside a snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// When the backup was created
    pub backup_time: DateTime<Utc>,
    /// Optional source-environment identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    /// Top-level entries actually present in the snapshot
    pub files: Vec<String>,
}

/// A built snapshot: staging directory plus its manifest
#[derive(Debug)]
pub struct Snapshot {
    /// The staging directory
    pub dir: PathBuf,
    /// Manifest describing the staged contents
    pub manifest: Manifest,
}

impl Snapshot {
    /// Snapshot directory name
    pub fn name(&self) -> String {
        self.dir
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// Remove the staging directory
    pub fn remove(&self) -> VaultResult<()> {
        if self.dir.exists() {
            fs::remove_dir_all(&self.dir).map_err(|e| {
                VaultError::Io(format!(
                    "Failed to remove snapshot {}: {}",
                    self.dir.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }
}

/// Builds snapshots of the protected user-data paths
pub struct SnapshotBuilder {
    paths: VaultPaths,
    environment: Option<String>,
}

impl SnapshotBuilder {
    /// Create a new SnapshotBuilder
    pub fn new(paths: VaultPaths, environment: Option<String>) -> Self {
        Self { paths, environment }
    }

    /// Build a snapshot under `staging_root`.
    ///
    /// Copies every protected user-data path that exists into a fresh
    /// directory named from the context, then writes the manifest from the
    /// directory's actual contents. On any failure the staging directory is
    /// removed before the error is returned.
    pub fn build(&self, ctx: &BackupContext, staging_root: &Path) -> VaultResult<Snapshot> {
        let snapshot_dir = staging_root.join(ctx.snapshot_name());

        fs::create_dir_all(&snapshot_dir).map_err(|e| {
            VaultError::Io(format!(
                "Failed to create snapshot directory {}: {}",
                snapshot_dir.display(),
                e
            ))
        })?;
        info!("Created snapshot directory: {}", snapshot_dir.display());

        match self.copy_protected_paths(&snapshot_dir) {
            Ok(()) => {}
            Err(e) => {
                // Never leave a partially staged snapshot behind.
                let _ = fs::remove_dir_all(&snapshot_dir);
                return Err(e);
            }
        }

        let manifest = Manifest {
            backup_time: ctx.timestamp(),
            environment: self.environment.clone(),
            files: list_top_level(&snapshot_dir)?,
        };

        let manifest_json = serde_json::to_string_pretty(&manifest)
            .map_err(|e| VaultError::Json(format!("Failed to serialize manifest: {}", e)))?;

        if let Err(e) = fs::write(snapshot_dir.join(MANIFEST_FILE), manifest_json) {
            let _ = fs::remove_dir_all(&snapshot_dir);
            return Err(VaultError::Io(format!("Failed to write manifest: {}", e)));
        }

        info!("Snapshot complete: {}", snapshot_dir.display());
        Ok(Snapshot {
            dir: snapshot_dir,
            manifest,
        })
    }

    fn copy_protected_paths(&self, snapshot_dir: &Path) -> VaultResult<()> {
        for (relative, source) in self.paths.user_data_entries() {
            if !source.exists() {
                warn!("Skipping missing path: {}", relative);
                continue;
            }

            // Entries are staged flat under their base name, so the symbol
            // cache file sits next to the cache/ tree it also lives in.
            let dest = snapshot_dir.join(staged_name(&relative));

            fsutil::copy_entry(&source, &dest)?;
            info!("Backed up: {}", relative);
        }
        Ok(())
    }
}

/// Base name a protected path is staged under inside a snapshot
pub fn staged_name(relative: &str) -> String {
    Path::new(relative)
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| relative.to_string())
}

/// List the top-level entry names of a directory, sorted
fn list_top_level(dir: &Path) -> VaultResult<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)
        .map_err(|e| VaultError::Io(format!("Failed to read {}: {}", dir.display(), e)))?
    {
        let entry =
            entry.map_err(|e| VaultError::Io(format!("Failed to read directory entry: {}", e)))?;
        names.push(entry.file_name().to_string_lossy().to_string());
    }
    names.sort();
    Ok(names)
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
        fs::write(temp.path().join("bollinger_strategy.db"), b"sqlite-bytes").unwrap();
        temp
    }

    #[test]
    fn test_build_copies_existing_paths() {
        let root = seeded_root();
        let staging = TempDir::new().unwrap();
        let builder = SnapshotBuilder::new(VaultPaths::with_root(root.path().to_path_buf()), None);

        let snapshot = builder
            .build(&BackupContext::now(), staging.path())
            .unwrap();

        assert!(snapshot.dir.join("custom_symbols.json").exists());
        assert!(snapshot.dir.join("bollinger_strategy.db").exists());
        assert!(snapshot.dir.join("cache/custom_symbols.json").exists());
        assert!(snapshot.dir.join(MANIFEST_FILE).exists());
    }

    #[test]
    fn test_missing_paths_are_skipped() {
        let root = TempDir::new().unwrap(); // nothing protected exists
        let staging = TempDir::new().unwrap();
        let builder = SnapshotBuilder::new(VaultPaths::with_root(root.path().to_path_buf()), None);

        let snapshot = builder
            .build(&BackupContext::now(), staging.path())
            .unwrap();

        // Only the manifest is present.
        assert_eq!(snapshot.manifest.files, Vec::<String>::new());
        assert!(snapshot.dir.join(MANIFEST_FILE).exists());
    }

    #[test]
    fn test_manifest_reflects_actual_contents() {
        let root = seeded_root();
        let staging = TempDir::new().unwrap();
        let builder = SnapshotBuilder::new(
            VaultPaths::with_root(root.path().to_path_buf()),
            Some("railway".into()),
        );

        let snapshot = builder
            .build(&BackupContext::now(), staging.path())
            .unwrap();

        assert_eq!(
            snapshot.manifest.files,
            vec!["bollinger_strategy.db", "cache", "custom_symbols.json"]
        );
        assert_eq!(snapshot.manifest.environment.as_deref(), Some("railway"));
    }

    #[test]
    fn test_snapshot_name_format() {
        let ctx = BackupContext::at(
            chrono::DateTime::parse_from_rfc3339("2025-08-27T20:21:00Z")
                .unwrap()
                .with_timezone(&Utc),
        );
        assert_eq!(ctx.snapshot_name(), "user_data_backup_20250827_202100");
    }

    #[test]
    fn test_snapshot_remove() {
        let root = seeded_root();
        let staging = TempDir::new().unwrap();
        let builder = SnapshotBuilder::new(VaultPaths::with_root(root.path().to_path_buf()), None);

        let snapshot = builder
            .build(&BackupContext::now(), staging.path())
            .unwrap();
        assert!(snapshot.dir.exists());

        snapshot.remove().unwrap();
        assert!(!snapshot.dir.exists());
    }
}
