//! Path management for SignalVault
//!
//! All protected paths are resolved relative to the service's working root.
//! The two path sets are fixed: the subsystem treats their contents as
//! opaque bytes and only cares about existence.
//!
//! ## Root Resolution Order
//!
//! 1. `SIGNALVAULT_ROOT` environment variable (if set)
//! 2. The current working directory

use std::path::{Path, PathBuf};

use crate::error::VaultError;

/// User-data paths protected by backup/restore.
///
/// A missing entry is skipped, not an error: a fresh deployment has no
/// database file yet.
pub const USER_DATA_PATHS: &[&str] = &[
    "cache/custom_symbols.json",
    "bollinger_strategy.db",
    "cache",
];

/// Application files managed by the version catalog (distinct from user data).
pub const APP_FILE_PATHS: &[&str] = &[
    "app.py",
    "requirements.txt",
    "README.md",
    "DEPLOYMENT.md",
    "Procfile",
    "runtime.txt",
    "vercel.json",
    "templates",
];

/// Manages all paths used by SignalVault
#[derive(Debug, Clone)]
pub struct VaultPaths {
    /// Working root of the protected service
    root: PathBuf,
}

impl VaultPaths {
    /// Create a new VaultPaths instance
    ///
    /// Root resolution:
    /// 1. `SIGNALVAULT_ROOT` env var (explicit override)
    /// 2. Current working directory
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn new() -> Result<Self, VaultError> {
        let root = if let Ok(custom) = std::env::var("SIGNALVAULT_ROOT") {
            PathBuf::from(custom)
        } else {
            std::env::current_dir()
                .map_err(|e| VaultError::Config(format!("Could not determine working directory: {}", e)))?
        };

        Ok(Self { root })
    }

    /// Create VaultPaths with an explicit root (useful for testing)
    pub fn with_root(root: PathBuf) -> Self {
        Self { root }
    }

    /// Get the working root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a protected relative path against the root
    pub fn resolve(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.root.join("signalvault.json")
    }

    /// Get the versions catalog root (<root>/versions/)
    pub fn versions_dir(&self) -> PathBuf {
        self.root.join("versions")
    }

    /// User-data paths as absolute (root-joined) paths, paired with their
    /// relative names
    pub fn user_data_entries(&self) -> Vec<(String, PathBuf)> {
        USER_DATA_PATHS
            .iter()
            .map(|rel| (rel.to_string(), self.resolve(rel)))
            .collect()
    }

    /// Application-file paths as absolute (root-joined) paths, paired with
    /// their relative names
    pub fn app_file_entries(&self) -> Vec<(String, PathBuf)> {
        APP_FILE_PATHS
            .iter()
            .map(|rel| (rel.to_string(), self.resolve(rel)))
            .collect()
    }
}
