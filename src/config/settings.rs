//! Transport settings for SignalVault
//!
//! Controls where an archive goes after a backup run. Environment variables
//! override the settings file so a hosted deployment can configure delivery
//! without shipping a config file.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::VaultPaths;
use crate::error::VaultError;

/// Default HTTP upload timeout in seconds
fn default_upload_timeout() -> u64 {
    30
}

/// Transport and environment settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Webhook endpoint receiving the archive as a multipart POST
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,

    /// Directory for direct local archive output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    /// Bounded timeout for HTTP uploads
    #[serde(default = "default_upload_timeout")]
    pub upload_timeout_secs: u64,

    /// Optional deployment identifier recorded in backup manifests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            webhook_url: None,
            output_dir: None,
            upload_timeout_secs: default_upload_timeout(),
            environment: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist.
    ///
    /// Environment variables `BACKUP_WEBHOOK_URL`, `BACKUP_OUTPUT_DIR` and
    /// `BACKUP_ENVIRONMENT` override file values when set.
    pub fn load_or_create(paths: &VaultPaths) -> Result<Self, VaultError> {
        let settings_path = paths.settings_file();

        let mut settings = if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| VaultError::Io(format!("Failed to read settings file: {}", e)))?;

            serde_json::from_str(&contents)
                .map_err(|e| VaultError::Config(format!("Failed to parse settings file: {}", e)))?
        } else {
            Settings::default()
        };

        if let Ok(url) = std::env::var("BACKUP_WEBHOOK_URL") {
            if !url.is_empty() {
                settings.webhook_url = Some(url);
            }
        }
        if let Ok(dir) = std::env::var("BACKUP_OUTPUT_DIR") {
            if !dir.is_empty() {
                settings.output_dir = Some(PathBuf::from(dir));
            }
        }
        if let Ok(env) = std::env::var("BACKUP_ENVIRONMENT") {
            if !env.is_empty() {
                settings.environment = Some(env);
            }
        }

        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &VaultPaths) -> Result<(), VaultError> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| VaultError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| VaultError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(settings.webhook_url.is_none());
        assert!(settings.output_dir.is_none());
        assert_eq!(settings.upload_timeout_secs, 30);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = VaultPaths::with_root(temp_dir.path().to_path_buf());

        let settings = Settings {
            webhook_url: Some("https://example.com/hook".into()),
            upload_timeout_secs: 10,
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.webhook_url.as_deref(), Some("https://example.com/hook"));
        assert_eq!(loaded.upload_timeout_secs, 10);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = VaultPaths::with_root(temp_dir.path().to_path_buf());

        let settings = Settings::load_or_create(&paths).unwrap();
        assert!(settings.webhook_url.is_none());
    }

    #[test]
    fn test_serde_round_trip() {
        let settings = Settings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let deserialized: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings.upload_timeout_secs, deserialized.upload_timeout_secs);
    }
}
