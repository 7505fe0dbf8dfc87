//! Directory traversal shared by every backend.

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::{io_err, DetectError};

/// Directory names never descended into.
pub const SKIPPED_DIRS: &[&str] = &["node_modules", "target", "vendor"];

/// `target` itself plus every directory beneath it, as absolute paths.
///
/// Symlinks are not followed; hidden directories and [`SKIPPED_DIRS`] are
/// pruned (the target itself is always included). Entries come back in
/// file-name order so every backend sees the same sequence.
pub fn project_dirs(target: &Path) -> Result<Vec<PathBuf>, DetectError> {
    let root = target.canonicalize().map_err(|e| io_err(target, e))?;
    if !root.is_dir() {
        return Err(io_err(&root, std::io::Error::other("not a directory")));
    }

    let mut dirs = Vec::new();
    let walker = WalkDir::new(&root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_pruned(e));
    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone());
            let source = e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("filesystem loop"));
            io_err(path, source)
        })?;
        if entry.file_type().is_dir() {
            dirs.push(entry.into_path());
        }
    }
    Ok(dirs)
}

/// Plain files directly inside `dir`, sorted by name.
pub fn files_in(dir: &Path) -> Result<Vec<PathBuf>, DetectError> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(|e| io_err(dir, e))?
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|e| e.path())
        .collect();
    files.sort();
    Ok(files)
}

fn is_pruned(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || SKIPPED_DIRS.contains(&name.as_ref())
}
