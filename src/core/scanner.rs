//! Directory listing.
//!
//! The organizer only looks at a folder's immediate children: episode
//! files live flat in the release folder, and subdirectories (existing
//! `Season N` folders included) are left alone.

use crate::utils::fs as fs_utils;
use crate::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A file entry from the folder being organized.
#[derive(Debug, Clone)]
pub struct FolderEntry {
    /// Full path to the file.
    pub path: PathBuf,
    /// File name without path.
    pub filename: String,
    /// Lowercased extension, if any.
    pub extension: Option<String>,
}

/// List the immediate file children of `root`, sorted by filename.
pub fn list_files(root: &Path) -> Result<Vec<FolderEntry>> {
    if !root.exists() {
        return Err(crate::Error::PathNotFound(root.display().to_string()));
    }
    if !root.is_dir() {
        return Err(crate::Error::NotADirectory(root.display().to_string()));
    }

    let mut entries = Vec::new();

    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path().to_path_buf();
        let filename = entry.file_name().to_string_lossy().to_string();
        let extension = fs_utils::get_extension(&path);
        entries.push(FolderEntry {
            path,
            filename,
            extension,
        });
    }

    // Sort for deterministic plan ordering.
    entries.sort_by(|a, b| a.filename.cmp(&b.filename));

    tracing::debug!("Listed {} files in {:?}", entries.len(), root);

    Ok(entries)
}
