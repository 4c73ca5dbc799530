//! Backup, restore and decode CLI handlers
//!
//! Bridges clap argument parsing with the backup pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use log::warn;

use crate::backup::{archive, BackupContext, BackupRunner, PathOutcome, Restorer};
use crate::config::{Settings, VaultPaths};
use crate::error::{VaultError, VaultResult};
use crate::transport::{encoding, Delivery};

/// Run the user-data backup pipeline
pub fn handle_backup(paths: &VaultPaths, settings: &Settings) -> VaultResult<()> {
    println!("Starting backup...");

    let runner = BackupRunner::new(paths.clone(), settings.clone());
    let report = runner.run(&BackupContext::now())?;

    println!("Snapshot: {}", report.snapshot_name);
    println!("Archive size: {} bytes", report.archive_size);

    match (&report.delivery, &report.delivery_error) {
        (Some(Delivery::Uploaded { endpoint, status }), _) => {
            println!("Uploaded to {} (HTTP {})", endpoint, status);
        }
        (Some(Delivery::Stored { path }), _) => {
            println!("Archive stored at: {}", path.display());
        }
        (Some(Delivery::Emitted { size_bytes, .. }), _) => {
            println!(
                "Archive emitted to the log as base64 ({} bytes raw).",
                size_bytes
            );
            println!("Recover it with: signalvault decode <saved-text-file>");
        }
        (None, Some(err)) => {
            println!("Delivery failed: {}", err);
            if let Some(path) = &report.archive_path {
                println!("Archive preserved locally at: {}", path.display());
            }
        }
        (None, None) => {}
    }

    println!("Backup complete.");
    Ok(())
}

/// Restore user data from an archive file or a base64 text file
pub fn handle_restore(
    paths: &VaultPaths,
    archive_path: Option<&Path>,
    encoded_file: Option<&Path>,
) -> VaultResult<()> {
    let restorer = Restorer::new(paths.clone());

    let report = match (archive_path, encoded_file) {
        (Some(archive), None) => {
            if !archive.exists() {
                return Err(VaultError::Io(format!(
                    "Archive does not exist: {}",
                    archive.display()
                )));
            }
            restorer.restore_from_archive(archive)?
        }
        (None, Some(text_file)) => {
            let text = fs::read_to_string(text_file)
                .map_err(|e| VaultError::Io(format!("Failed to read encoded file: {}", e)))?;
            restorer.restore_from_encoded(&text)?
        }
        _ => {
            return Err(VaultError::Config(
                "Provide either an archive path or --encoded <file>".into(),
            ))
        }
    };

    for (path, outcome) in &report.outcomes {
        match outcome {
            PathOutcome::Restored => println!("Restored: {}", path),
            PathOutcome::Missing => println!("Not in backup, skipped: {}", path),
            PathOutcome::Failed(reason) => println!("FAILED {}: {}", path, reason),
        }
    }
    println!("{}", report.summary());

    if report.success() {
        println!("Restore complete. You can restart the application now.");
        Ok(())
    } else {
        Err(VaultError::Io(
            "One or more paths failed to restore".into(),
        ))
    }
}

/// Decode a base64 text file into an archive on disk
pub fn handle_decode(input: &Path, output: Option<&Path>) -> VaultResult<()> {
    let text = fs::read_to_string(input)
        .map_err(|e| VaultError::Io(format!("Failed to read {}: {}", input.display(), e)))?;
    if text.trim().is_empty() {
        return Err(VaultError::MalformedEncoding("input file is empty".into()));
    }

    let bytes = encoding::decode(&text)?;
    if !encoding::looks_like_archive(&bytes) {
        println!("Warning: decoded data does not look like a backup archive.");
    }

    let output = match output {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(format!("backup_{}.zip", BackupContext::now().stamp())),
    };
    archive::write_bytes(&output, &bytes)?;

    println!("Decoded {} bytes to {}", bytes.len(), output.display());

    match archive::list_entries(&output) {
        Ok(entries) => {
            println!("Archive contains {} entries:", entries.len());
            for name in entries {
                println!("  {}", name);
            }
        }
        Err(e) => warn!("Could not list archive contents: {}", e),
    }

    Ok(())
}
