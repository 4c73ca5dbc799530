//! Configuration module for SignalVault
//!
//! This module provides configuration management including:
//! - Working-root and protected path resolution
//! - Transport settings persistence with environment overrides

pub mod paths;
pub mod settings;

pub use paths::VaultPaths;
pub use settings::Settings;
