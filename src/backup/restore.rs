//! User-data restoration for SignalVault
//!
//! Inverse of the snapshot/archive pipeline. Accepts either an archive file
//! or base64 text, unpacks into a scoped temporary directory, then copies
//! each protected path back to its live location. Restoration is
//! best-effort per path: a path absent from the extraction is a warning, a
//! failed copy is recorded but does not stop the remaining paths.

use std::path::Path;

use log::{debug, info, warn};

use super::archive;
use super::snapshot::staged_name;
use crate::config::VaultPaths;
use crate::error::{VaultError, VaultResult};
use crate::fsutil;
use crate::transport::encoding;

/// Per-path restore outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathOutcome {
    /// Copied back to its live location
    Restored,
    /// Not present in the extraction; skipped
    Missing,
    /// Copy attempted and failed
    Failed(String),
}

/// Result of a restore operation
#[derive(Debug, Default)]
pub struct RestoreReport {
    /// Outcome for each protected path, in fixed path-set order
    pub outcomes: Vec<(String, PathOutcome)>,
}

impl RestoreReport {
    /// True only if no per-path copy failed
    pub fn success(&self) -> bool {
        !self
            .outcomes
            .iter()
            .any(|(_, o)| matches!(o, PathOutcome::Failed(_)))
    }

    /// Paths that were actually restored
    pub fn restored(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|(_, o)| *o == PathOutcome::Restored)
            .map(|(p, _)| p.as_str())
            .collect()
    }

    /// Human-readable summary
    pub fn summary(&self) -> String {
        let restored = self.restored().len();
        let missing = self
            .outcomes
            .iter()
            .filter(|(_, o)| *o == PathOutcome::Missing)
            .count();
        let failed = self.outcomes.len() - restored - missing;
        format!(
            "Restored {} path(s), {} missing, {} failed",
            restored, missing, failed
        )
    }
}

/// Restores protected user data from archives or encoded text
pub struct Restorer {
    paths: VaultPaths,
}

impl Restorer {
    /// Create a new Restorer
    pub fn new(paths: VaultPaths) -> Self {
        Self { paths }
    }

    /// Restore from an archive file.
    ///
    /// An unreadable or malformed archive fails before any live path is
    /// touched. The extraction directory is removed on every exit path.
    pub fn restore_from_archive(&self, archive_path: &Path) -> VaultResult<RestoreReport> {
        let extraction = tempfile::tempdir()
            .map_err(|e| VaultError::Io(format!("Failed to create extraction directory: {}", e)))?;

        archive::unpack(archive_path, extraction.path())?;
        info!("Restoring from archive: {}", archive_path.display());

        Ok(self.restore_extracted(extraction.path()))
    }

    /// Restore from base64 text.
    ///
    /// The decoded bytes are staged as a temporary archive that is removed
    /// regardless of outcome.
    pub fn restore_from_encoded(&self, text: &str) -> VaultResult<RestoreReport> {
        let bytes = encoding::decode(text)?;

        let staging = tempfile::tempdir()
            .map_err(|e| VaultError::Io(format!("Failed to create staging directory: {}", e)))?;
        let temp_archive = staging.path().join("temp_backup.zip");
        archive::write_bytes(&temp_archive, &bytes)?;

        self.restore_from_archive(&temp_archive)
    }

    /// Copy each protected path from the extraction into its live location.
    fn restore_extracted(&self, extracted: &Path) -> RestoreReport {
        let mut report = RestoreReport::default();

        for (relative, live) in self.paths.user_data_entries() {
            let staged = extracted.join(staged_name(&relative));

            if !staged.exists() {
                warn!("Not present in backup, skipping: {}", relative);
                report.outcomes.push((relative, PathOutcome::Missing));
                continue;
            }

            let result = if staged.is_dir() {
                // Directories are replaced wholesale.
                fsutil::replace_dir(&staged, &live)
            } else {
                fsutil::copy_file(&staged, &live)
            };

            match result {
                Ok(()) => {
                    info!("Restored: {}", relative);
                    if relative.ends_with("custom_symbols.json") {
                        log_restored_symbols(&live);
                    }
                    report.outcomes.push((relative, PathOutcome::Restored));
                }
                Err(e) => {
                    warn!("Failed to restore {}: {}", relative, e);
                    report
                        .outcomes
                        .push((relative, PathOutcome::Failed(e.to_string())));
                }
            }
        }

        report
    }
}

/// Log the symbol list of a restored symbol-cache file. Content is opaque
/// to the subsystem, so parse failures are ignored.
fn log_restored_symbols(path: &Path) {
    let Ok(contents) = std::fs::read_to_string(path) else {
        return;
    };
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(&contents) {
        if let Some(symbols) = value.get("symbols") {
            debug!("Restored symbols: {}", symbols);
        }
    }
}
