//! Custom error types for SignalVault
//!
//! This module defines the error hierarchy for the backup subsystem using
//! thiserror for ergonomic error definitions.

use thiserror::Error;

/// The main error type for SignalVault operations
#[derive(Error, Debug)]
pub enum VaultError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Archive packing/unpacking errors
    #[error("Archive error: {0}")]
    Archive(String),

    /// Input that is not valid under the transport encoding
    #[error("Malformed encoding: {0}")]
    MalformedEncoding(String),

    /// Archive delivery failures (upload rejected, timeout, ...)
    #[error("Delivery failed: {0}")]
    Delivery(String),

    /// Requested version has no catalog entry
    #[error("Version not found: {name}")]
    VersionNotFound { name: String },

    /// A version with this name already exists in the catalog
    #[error("Version already exists: {name}")]
    DuplicateVersion { name: String },
}

impl VaultError {
    /// Check if this is a "version not found" error
    pub fn is_version_not_found(&self) -> bool {
        matches!(self, Self::VersionNotFound { .. })
    }

    /// Check if this is a delivery failure
    pub fn is_delivery(&self) -> bool {
        matches!(self, Self::Delivery(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for VaultError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for VaultError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<zip::result::ZipError> for VaultError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::Archive(err.to_string())
    }
}

/// Result type alias for SignalVault operations
pub type VaultResult<T> = Result<T, VaultError>;
