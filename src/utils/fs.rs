//! File system utilities.

use crate::utils::hash;
use crate::Result;
use std::path::Path;

/// Check if a path exists and is a directory.
pub fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(crate::Error::PathNotFound(path.display().to_string()));
    }
    if !path.is_dir() {
        return Err(crate::Error::NotADirectory(path.display().to_string()));
    }
    Ok(())
}

/// Create a directory and all parent directories.
pub fn create_dir_all(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)?;
    Ok(())
}

/// Move a file from one location to another.
///
/// Tries an atomic rename first. A cross-filesystem move falls back to
/// copy + delete, verifying a checksum before the source is removed.
pub fn move_file(from: &Path, to: &Path) -> Result<()> {
    match std::fs::rename(from, to) {
        Ok(()) => {
            tracing::debug!("Moved (rename): {:?} -> {:?}", from, to);
            return Ok(());
        }
        Err(e) if e.kind() == std::io::ErrorKind::CrossesDevices => {
            tracing::debug!("Cross-filesystem move detected, using copy+delete");
        }
        Err(e) => return Err(e.into()),
    }

    let checksum = hash::sha256_file(from)?;
    std::fs::copy(from, to)?;

    if hash::sha256_file(to)? != checksum {
        // Remove the incomplete copy and keep the source.
        let _ = std::fs::remove_file(to);
        return Err(crate::Error::other(format!(
            "Checksum mismatch after copying {:?}",
            to
        )));
    }

    std::fs::remove_file(from)?;
    tracing::debug!("Moved (copy+delete): {:?} -> {:?}", from, to);
    Ok(())
}

/// Get file extension in lowercase.
pub fn get_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

/// Get the extension with its leading dot, case preserved, or an empty
/// string when there is none. Used to carry a media file's suffix into
/// its proposed name byte-for-byte.
pub fn suffix(path: &Path) -> String {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default()
}
