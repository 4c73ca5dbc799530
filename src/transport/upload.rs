//! HTTP multipart upload for SignalVault
//!
//! A single blocking POST with the archive attached as a `file` part.
//! Success is any 2xx response; anything else is a delivery failure and the
//! archive stays on local disk. No retries.

use std::fs;
use std::path::Path;
use std::time::Duration;

use log::info;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;

use crate::error::{VaultError, VaultResult};

/// POST the archive to `endpoint`, returning the HTTP status on success.
pub fn upload(endpoint: &str, archive_path: &Path, timeout: Duration) -> VaultResult<u16> {
    let file_name = archive_path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "backup.zip".to_string());

    let bytes = fs::read(archive_path)
        .map_err(|e| VaultError::Io(format!("Failed to read archive for upload: {}", e)))?;

    let part = Part::bytes(bytes)
        .file_name(file_name.clone())
        .mime_str("application/zip")
        .map_err(|e| VaultError::Delivery(format!("Failed to build upload body: {}", e)))?;
    let form = Form::new().part("file", part);

    let client = Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| VaultError::Delivery(format!("Failed to build HTTP client: {}", e)))?;

    let response = client
        .post(endpoint)
        .multipart(form)
        .send()
        .map_err(|e| VaultError::Delivery(format!("Upload request failed: {}", e)))?;

    let status = response.status();
    if status.is_success() {
        info!("Uploaded {} to {} (HTTP {})", file_name, endpoint, status.as_u16());
        Ok(status.as_u16())
    } else {
        Err(VaultError::Delivery(format!(
            "Endpoint returned HTTP {}",
            status.as_u16()
        )))
    }
}
