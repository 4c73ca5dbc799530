//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the backup subsystem.

pub mod backup;
pub mod version;

pub use backup::{handle_backup, handle_decode, handle_restore};
pub use version::{handle_version_command, VersionCommands};
