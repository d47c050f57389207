//! Disk inventory for category roots.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use tracing::warn;

use crate::error::{FsOpsError, FsOpsResult};

/// Names of the subdirectories directly under `root`, sorted.
///
/// Non-directory entries are ignored; symlinks to directories count, matching
/// what the torrent client itself would treat as a content directory. Names
/// that are not valid UTF-8 are skipped with a warning: they can never match
/// a torrent-derived name, and the audit trail must be able to report every
/// path it touches faithfully.
///
/// # Errors
///
/// Returns [`FsOpsError::NotADirectory`] when `root` does not exist or is not
/// a directory, and [`FsOpsError::Io`] when the listing itself fails.
pub fn list_dir_names(root: &Path) -> FsOpsResult<BTreeSet<String>> {
    if !root.is_dir() {
        return Err(FsOpsError::not_a_directory(root));
    }

    let entries = fs::read_dir(root).map_err(|source| FsOpsError::io("read_dir", root, source))?;
    let mut names = BTreeSet::new();
    for entry in entries {
        let entry = entry.map_err(|source| FsOpsError::io("read_dir", root, source))?;
        if !entry.path().is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => {
                names.insert(name);
            }
            Err(name) => {
                warn!(
                    root = %root.display(),
                    name = %name.to_string_lossy(),
                    "skipping non-utf8 directory name"
                );
            }
        }
    }
    Ok(names)
}
