//! Backup subsystem for SignalVault
//!
//! Covers the full protection pipeline for user data:
//!
//! - `snapshot`: stage protected paths into an ephemeral directory with a
//!   manifest
//! - `archive`: pack a snapshot into a single compressed file, and unpack
//! - `runner`: orchestrate snapshot, archive and delivery
//! - `restore`: bring an archive (or encoded text) back into the live tree
//!
//! The pipeline is strictly sequential and single-threaded; callers are
//! responsible for not running two instances over the same protected paths
//! at once.

pub mod archive;
pub mod restore;
pub mod runner;
pub mod snapshot;

pub use restore::{PathOutcome, RestoreReport, Restorer};
pub use runner::{BackupReport, BackupRunner};
pub use snapshot::{BackupContext, Manifest, Snapshot, SnapshotBuilder};
