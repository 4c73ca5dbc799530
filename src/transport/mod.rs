//! Archive transport for SignalVault
//!
//! Delivers a finished archive to an external destination. Exactly one
//! channel is selected at configuration time, in fixed priority order:
//! webhook upload, then direct local output, then text emission to the
//! operator log. There is no cascading on failure within a run: a failed
//! delivery is reported and the archive stays on local disk.

pub mod encoding;
pub mod upload;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::info;

use crate::config::Settings;
use crate::error::{VaultError, VaultResult};

/// A configured delivery mechanism
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportChannel {
    /// Multipart POST to a webhook endpoint
    HttpUpload { endpoint: String, timeout: Duration },
    /// Copy the archive into a local output directory
    LocalFile { dir: PathBuf },
    /// Base64-encode the archive into the operator log for manual retrieval
    TextEmission,
}

/// Outcome of a successful delivery
#[derive(Debug)]
pub enum Delivery {
    /// Uploaded to a webhook; carries the HTTP status
    Uploaded { endpoint: String, status: u16 },
    /// Stored at a local path
    Stored { path: PathBuf },
    /// Emitted as text; carries the encoded payload and its size
    Emitted {
        file_name: String,
        size_bytes: u64,
        encoded: String,
    },
}

impl TransportChannel {
    /// Pick the channel for this run from settings.
    ///
    /// Priority: webhook, then local output directory, then text emission.
    /// The choice is made once; a failing channel does not fall through to
    /// the next one.
    pub fn select(settings: &Settings) -> Self {
        if let Some(endpoint) = &settings.webhook_url {
            return Self::HttpUpload {
                endpoint: endpoint.clone(),
                timeout: Duration::from_secs(settings.upload_timeout_secs),
            };
        }
        if let Some(dir) = &settings.output_dir {
            return Self::LocalFile { dir: dir.clone() };
        }
        Self::TextEmission
    }

    /// Deliver the archive at `archive_path`.
    ///
    /// A `Delivery` failure is non-fatal to the overall backup: the caller
    /// keeps the archive on disk and reports the error.
    pub fn deliver(&self, archive_path: &Path) -> VaultResult<Delivery> {
        match self {
            Self::HttpUpload { endpoint, timeout } => {
                let status = upload::upload(endpoint, archive_path, *timeout)?;
                Ok(Delivery::Uploaded {
                    endpoint: endpoint.clone(),
                    status,
                })
            }
            Self::LocalFile { dir } => {
                fs::create_dir_all(dir).map_err(|e| {
                    VaultError::Io(format!("Failed to create {}: {}", dir.display(), e))
                })?;
                let file_name = archive_path
                    .file_name()
                    .ok_or_else(|| VaultError::Io("Archive has no file name".into()))?;
                let dest = dir.join(file_name);
                fs::copy(archive_path, &dest).map_err(|e| {
                    VaultError::Io(format!("Failed to store archive at {}: {}", dest.display(), e))
                })?;
                info!("Archive stored at {}", dest.display());
                Ok(Delivery::Stored { path: dest })
            }
            Self::TextEmission => {
                let bytes = fs::read(archive_path).map_err(|e| {
                    VaultError::Io(format!("Failed to read archive for emission: {}", e))
                })?;
                let file_name = archive_path
                    .file_name()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_else(|| "backup.zip".to_string());
                let encoded = encoding::encode(&bytes);

                info!("{}", "=".repeat(80));
                info!("Backup archive ready for manual retrieval:");
                info!("File: {}", file_name);
                info!("Size: {} bytes", bytes.len());
                info!("Base64 payload (decode with `signalvault decode`):");
                info!("{}", encoded);
                info!("{}", "=".repeat(80));

                Ok(Delivery::Emitted {
                    file_name,
                    size_bytes: bytes.len() as u64,
                    encoded,
                })
            }
        }
    }

    /// Short channel label for reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::HttpUpload { .. } => "webhook",
            Self::LocalFile { .. } => "local",
            Self::TextEmission => "text",
        }
    }
}
