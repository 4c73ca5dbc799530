//! SignalVault - data protection for trading-signal service state
//!
//! This library backs up, transports and restores the persisted state of a
//! trading-signal web service (a small database file and a JSON symbol
//! cache), and manages named versions of the service's application files.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: working-root path sets and transport settings
//! - `error`: custom error types
//! - `backup`: snapshot, archive, pipeline runner and restorer
//! - `transport`: delivery channels and the text transport encoding
//! - `versions`: named version catalog with confirmation-gated operations
//! - `confirm`: operator confirmation gates
//! - `cli`: command handlers
//!
//! All operations are synchronous and single-threaded; concurrent runs over
//! the same protected paths must be serialized by the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use signalvault::backup::{BackupContext, BackupRunner};
//! use signalvault::config::{Settings, VaultPaths};
//!
//! let paths = VaultPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let report = BackupRunner::new(paths, settings).run(&BackupContext::now())?;
//! println!("delivered: {}", report.delivered());
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod confirm;
pub mod error;
pub mod fsutil;
pub mod transport;
pub mod versions;

pub use error::{VaultError, VaultResult};
