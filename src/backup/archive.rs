//! Archive packing and unpacking for SignalVault
//!
//! Packs a snapshot directory into a single deflate-compressed zip whose
//! entry names are relative to the snapshot root (the root directory name
//! never appears as a prefix). An empty snapshot produces a valid archive
//! with zero entries. A partially written archive is removed on failure.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use log::info;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

use crate::error::{VaultError, VaultResult};

/// Pack `snapshot_dir` into a zip archive at `archive_path`.
pub fn pack(snapshot_dir: &Path, archive_path: &Path) -> VaultResult<()> {
    if !snapshot_dir.is_dir() {
        return Err(VaultError::Io(format!(
            "Snapshot directory does not exist: {}",
            snapshot_dir.display()
        )));
    }

    let result = write_zip(snapshot_dir, archive_path);
    if result.is_err() {
        // No half-written archives.
        let _ = fs::remove_file(archive_path);
    }
    result?;

    info!("Created archive: {}", archive_path.display());
    Ok(())
}

fn write_zip(snapshot_dir: &Path, archive_path: &Path) -> VaultResult<()> {
    let file = File::create(archive_path).map_err(|e| {
        VaultError::Io(format!(
            "Failed to create archive {}: {}",
            archive_path.display(),
            e
        ))
    })?;

    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    for entry in WalkDir::new(snapshot_dir) {
        let entry = entry.map_err(|e| {
            VaultError::Io(format!("Failed to walk {}: {}", snapshot_dir.display(), e))
        })?;
        let path = entry.path();
        if path == snapshot_dir {
            continue;
        }

        let relative = path
            .strip_prefix(snapshot_dir)
            .map_err(|e| VaultError::Archive(format!("Path outside snapshot root: {}", e)))?;
        // Zip entry names always use forward slashes.
        let name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        if entry.file_type().is_dir() {
            // Only record directories that would otherwise vanish.
            if fs::read_dir(path)
                .map(|mut it| it.next().is_none())
                .unwrap_or(false)
            {
                writer.add_directory(name.as_str(), options)?;
            }
        } else {
            writer.start_file(name.as_str(), options)?;
            let mut src = File::open(path)
                .map_err(|e| VaultError::Io(format!("Failed to open {}: {}", path.display(), e)))?;
            std::io::copy(&mut src, &mut writer)
                .map_err(|e| VaultError::Io(format!("Failed to write {}: {}", name, e)))?;
        }
    }

    writer.finish()?;
    Ok(())
}

/// Unpack the archive at `archive_path` into `dest_dir`.
///
/// The archive is validated on open: an unreadable or malformed file fails
/// before anything is written to the destination.
pub fn unpack(archive_path: &Path, dest_dir: &Path) -> VaultResult<()> {
    let file = File::open(archive_path).map_err(|e| {
        VaultError::Io(format!(
            "Failed to open archive {}: {}",
            archive_path.display(),
            e
        ))
    })?;

    let mut archive = ZipArchive::new(file)
        .map_err(|e| VaultError::Archive(format!("Not a valid archive: {}", e)))?;

    archive.extract(dest_dir)?;
    info!(
        "Extracted {} entries to {}",
        archive.len(),
        dest_dir.display()
    );
    Ok(())
}

/// List the entry names of an archive.
pub fn list_entries(archive_path: &Path) -> VaultResult<Vec<String>> {
    let file = File::open(archive_path).map_err(|e| {
        VaultError::Io(format!(
            "Failed to open archive {}: {}",
            archive_path.display(),
            e
        ))
    })?;

    let mut archive = ZipArchive::new(file)
        .map_err(|e| VaultError::Archive(format!("Not a valid archive: {}", e)))?;

    let mut names = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        names.push(archive.by_index(i)?.name().to_string());
    }
    Ok(names)
}

/// Read a single entry's bytes.
pub fn read_entry(archive_path: &Path, name: &str) -> VaultResult<Vec<u8>> {
    let file = File::open(archive_path)
        .map_err(|e| VaultError::Io(format!("Failed to open archive: {}", e)))?;
    let mut archive = ZipArchive::new(file)
        .map_err(|e| VaultError::Archive(format!("Not a valid archive: {}", e)))?;

    let mut entry = archive.by_name(name)?;
    let mut buf = Vec::new();
    entry
        .read_to_end(&mut buf)
        .map_err(|e| VaultError::Io(format!("Failed to read entry {}: {}", name, e)))?;
    Ok(buf)
}

/// Write raw bytes to a file, used when staging a decoded archive.
pub fn write_bytes(path: &Path, bytes: &[u8]) -> VaultResult<()> {
    let mut file = File::create(path)
        .map_err(|e| VaultError::Io(format!("Failed to create {}: {}", path.display(), e)))?;
    file.write_all(bytes)
        .map_err(|e| VaultError::Io(format!("Failed to write {}: {}", path.display(), e)))?;
    Ok(())
}
