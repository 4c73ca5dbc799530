//! Version catalog manager
//!
//! Named, persistent snapshots of the application's own source files, kept
//! under `<root>/versions/<name>/` with a JSON descriptor. Restore and
//! delete are destructive and pass through a confirmation gate; restore
//! additionally creates an automatic safety version of the pre-restore
//! state before overwriting anything.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::backup::BackupContext;
use crate::config::VaultPaths;
use crate::confirm::ConfirmationGate;
use crate::error::{VaultError, VaultResult};
use crate::fsutil;

/// Descriptor filename inside every catalog directory
pub const DESCRIPTOR_FILE: &str = "version_info.json";

/// Prefix for auto-derived version names
pub const VERSION_PREFIX: &str = "v1.0.0";

/// Prefix for the automatic pre-restore safety version
pub const SAFETY_PREFIX: &str = "backup_before_restore";

/// Catalog descriptor for one version
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionDescriptor {
    /// Version name (catalog directory name)
    #[serde(rename = "version")]
    pub name: String,
    /// When the version was created; absent for catalog directories with a
    /// missing descriptor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// Relative paths actually copied into the catalog
    #[serde(default)]
    pub files: Vec<String>,
}

/// Result of a confirmed version restore
#[derive(Debug)]
pub struct VersionRestore {
    /// Name of the automatic safety version created before overwriting
    pub safety_version: String,
    /// Catalog entries copied over the live paths
    pub restored: Vec<String>,
}

/// Lifecycle manager for the version catalog
pub struct VersionManager {
    paths: VaultPaths,
}

impl VersionManager {
    /// Create a new VersionManager, ensuring the catalog root exists
    pub fn new(paths: VaultPaths) -> VaultResult<Self> {
        let versions_dir = paths.versions_dir();
        fs::create_dir_all(&versions_dir).map_err(|e| {
            VaultError::Io(format!(
                "Failed to create versions directory {}: {}",
                versions_dir.display(),
                e
            ))
        })?;
        Ok(Self { paths })
    }

    fn version_dir(&self, name: &str) -> PathBuf {
        self.paths.versions_dir().join(name)
    }

    /// Create a version from the current application files.
    ///
    /// With no explicit name, one is derived from the fixed prefix and the
    /// current timestamp. Creating a name that already exists fails with
    /// `DuplicateVersion` and leaves the catalog untouched.
    pub fn create(
        &self,
        name: Option<&str>,
        description: &str,
    ) -> VaultResult<VersionDescriptor> {
        let name = match name {
            Some(n) => n.to_string(),
            None => format!("{}_{}", VERSION_PREFIX, BackupContext::now().stamp()),
        };

        let version_dir = self.version_dir(&name);
        if version_dir.exists() {
            return Err(VaultError::DuplicateVersion { name });
        }

        fs::create_dir_all(&version_dir).map_err(|e| {
            VaultError::Io(format!(
                "Failed to create version directory {}: {}",
                version_dir.display(),
                e
            ))
        })?;

        let copied = match self.copy_app_files(&version_dir) {
            Ok(copied) => copied,
            Err(e) => {
                // No partial catalog entries.
                let _ = fs::remove_dir_all(&version_dir);
                return Err(e);
            }
        };

        let descriptor = VersionDescriptor {
            name: name.clone(),
            created_at: Some(Utc::now()),
            description: description.to_string(),
            files: copied,
        };

        let json = serde_json::to_string_pretty(&descriptor)
            .map_err(|e| VaultError::Json(format!("Failed to serialize descriptor: {}", e)))?;
        if let Err(e) = fs::write(version_dir.join(DESCRIPTOR_FILE), json) {
            let _ = fs::remove_dir_all(&version_dir);
            return Err(VaultError::Io(format!("Failed to write descriptor: {}", e)));
        }

        info!("Version created: {}", name);
        Ok(descriptor)
    }

    fn copy_app_files(&self, version_dir: &std::path::Path) -> VaultResult<Vec<String>> {
        let mut copied = Vec::new();
        for (relative, source) in self.paths.app_file_entries() {
            if !source.exists() {
                warn!("Skipping missing application path: {}", relative);
                continue;
            }
            fsutil::copy_entry(&source, &version_dir.join(&relative))?;
            info!("Cataloged: {}", relative);
            copied.push(relative);
        }
        Ok(copied)
    }

    /// List all versions, most recently created first.
    ///
    /// Catalog directories without a descriptor still appear, with an empty
    /// description and no creation time, sorted after dated entries.
    pub fn list(&self) -> VaultResult<Vec<VersionDescriptor>> {
        let versions_dir = self.paths.versions_dir();
        let mut versions = Vec::new();

        for entry in fs::read_dir(&versions_dir).map_err(|e| {
            VaultError::Io(format!("Failed to read versions directory: {}", e))
        })? {
            let entry = entry
                .map_err(|e| VaultError::Io(format!("Failed to read directory entry: {}", e)))?;
            if !entry.path().is_dir() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().to_string();
            let descriptor_path = entry.path().join(DESCRIPTOR_FILE);

            if descriptor_path.exists() {
                let contents = fs::read_to_string(&descriptor_path)
                    .map_err(|e| VaultError::Io(format!("Failed to read descriptor: {}", e)))?;
                match serde_json::from_str::<VersionDescriptor>(&contents) {
                    Ok(descriptor) => versions.push(descriptor),
                    Err(e) => {
                        warn!("Unreadable descriptor for {}: {}", name, e);
                        versions.push(placeholder(name));
                    }
                }
            } else {
                versions.push(placeholder(name));
            }
        }

        // Newest first; undated entries sort last.
        versions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(versions)
    }

    /// Restore a version over the live application files.
    ///
    /// Requires confirmation from the gate; a declined gate aborts with no
    /// side effects and `Ok(None)`. On confirmation the current live state
    /// is first cataloged as an automatic safety version, then every entry
    /// of the version (except the descriptor) is copied over the live
    /// paths, directories replaced wholesale.
    pub fn restore(
        &self,
        name: &str,
        gate: &dyn ConfirmationGate,
    ) -> VaultResult<Option<VersionRestore>> {
        let version_dir = self.version_dir(name);
        if !version_dir.exists() {
            return Err(VaultError::VersionNotFound {
                name: name.to_string(),
            });
        }

        let prompt = format!(
            "About to restore version '{}'. This overwrites current application files.",
            name
        );
        if !gate.confirm(&prompt) {
            info!("Restore of '{}' cancelled", name);
            return Ok(None);
        }

        let safety_name = format!("{}_{}", SAFETY_PREFIX, BackupContext::now().stamp());
        self.create(Some(&safety_name), "Automatic backup before restore")?;

        let mut restored = Vec::new();
        for entry in fs::read_dir(&version_dir)
            .map_err(|e| VaultError::Io(format!("Failed to read version directory: {}", e)))?
        {
            let entry = entry
                .map_err(|e| VaultError::Io(format!("Failed to read directory entry: {}", e)))?;
            let item = entry.file_name().to_string_lossy().to_string();
            if item == DESCRIPTOR_FILE {
                continue;
            }

            let live = self.paths.resolve(&item);
            if entry.path().is_dir() {
                fsutil::replace_dir(&entry.path(), &live)?;
            } else {
                fsutil::copy_file(&entry.path(), &live)?;
            }
            info!("Restored: {}", item);
            restored.push(item);
        }

        info!("Version restore complete: {}", name);
        Ok(Some(VersionRestore {
            safety_version: safety_name,
            restored,
        }))
    }

    /// Delete a version from the catalog.
    ///
    /// Requires confirmation from the gate; declined returns `Ok(false)`
    /// with no side effects.
    pub fn delete(&self, name: &str, gate: &dyn ConfirmationGate) -> VaultResult<bool> {
        let version_dir = self.version_dir(name);
        if !version_dir.exists() {
            return Err(VaultError::VersionNotFound {
                name: name.to_string(),
            });
        }

        let prompt = format!(
            "About to delete version '{}'. This cannot be undone.",
            name
        );
        if !gate.confirm(&prompt) {
            info!("Deletion of '{}' cancelled", name);
            return Ok(false);
        }

        fs::remove_dir_all(&version_dir)
            .map_err(|e| VaultError::Io(format!("Failed to delete version: {}", e)))?;
        info!("Version deleted: {}", name);
        Ok(true)
    }
}

fn placeholder(name: String) -> VersionDescriptor {
    VersionDescriptor {
        name,
        created_at: None,
        description: String::new(),
        files: Vec::new(),
    }
}
