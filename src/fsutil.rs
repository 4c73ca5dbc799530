//! Shared file-system helpers
//!
//! Copy primitives used by the snapshot builder, restorer and version
//! manager. Directory replacement is wholesale: the existing destination
//! tree is removed before the source tree is copied in.

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{VaultError, VaultResult};

/// Copy a single file, preserving its modification time.
///
/// The parent directory of `dst` is created if needed.
pub fn copy_file(src: &Path, dst: &Path) -> VaultResult<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| VaultError::Io(format!("Failed to create {}: {}", parent.display(), e)))?;
    }

    fs::copy(src, dst).map_err(|e| {
        VaultError::Io(format!(
            "Failed to copy {} to {}: {}",
            src.display(),
            dst.display(),
            e
        ))
    })?;

    // Carry the source mtime over so snapshots keep original timestamps.
    if let Ok(meta) = fs::metadata(src) {
        if let Ok(mtime) = meta.modified() {
            if let Ok(file) = fs::File::options().write(true).open(dst) {
                let _ = file.set_modified(mtime);
            }
        }
    }

    Ok(())
}

/// Recursively copy a directory tree.
///
/// Fails if `src` is not a directory. Empty directories are preserved.
pub fn copy_dir(src: &Path, dst: &Path) -> VaultResult<()> {
    if !src.is_dir() {
        return Err(VaultError::Io(format!(
            "Not a directory: {}",
            src.display()
        )));
    }

    for entry in WalkDir::new(src) {
        let entry =
            entry.map_err(|e| VaultError::Io(format!("Failed to walk {}: {}", src.display(), e)))?;

        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| VaultError::Io(format!("Path outside copy root: {}", e)))?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| {
                VaultError::Io(format!("Failed to create {}: {}", target.display(), e))
            })?;
        } else {
            copy_file(entry.path(), &target)?;
        }
    }

    Ok(())
}

/// Replace `dst` with the directory tree at `src`.
///
/// An existing destination directory is removed first.
pub fn replace_dir(src: &Path, dst: &Path) -> VaultResult<()> {
    if dst.exists() {
        fs::remove_dir_all(dst)
            .map_err(|e| VaultError::Io(format!("Failed to remove {}: {}", dst.display(), e)))?;
    }
    copy_dir(src, dst)
}

/// Copy a path into a destination, dispatching on file vs directory.
pub fn copy_entry(src: &Path, dst: &Path) -> VaultResult<()> {
    if src.is_dir() {
        copy_dir(src, dst)
    } else {
        copy_file(src, dst)
    }
}
