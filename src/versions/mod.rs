//! Version catalog for SignalVault
//!
//! Persistent, named snapshots of the application's own files (entry
//! point, dependency manifest, docs, templates), distinct from user-data
//! backups. Destructive operations go through a confirmation gate.

pub mod manager;

pub use manager::{VersionDescriptor, VersionManager, VersionRestore};
