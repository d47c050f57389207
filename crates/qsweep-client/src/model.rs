//! Typed payloads for the qBittorrent Web API.
//!
//! # Design
//! - Pure data carriers kept separate from the HTTP plumbing in `client.rs`.
//! - Decoding is tolerant at the collection level: one malformed torrent
//!   record must not poison the rest of its category.

use std::path::Path;

use serde::Deserialize;

/// A download category registered with the client.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Category {
    /// Category name; also the subdirectory name under the check root.
    pub name: String,
}

/// One active torrent in a category, as reported by `/torrents/info`.
///
/// The wire objects carry dozens of fields; only the two that determine the
/// torrent's on-disk directory are decoded.
#[derive(Debug, Clone, Deserialize)]
pub struct Torrent {
    /// Display name of the torrent.
    pub name: String,
    /// Directory the torrent's content is saved under.
    pub save_path: String,
}

impl Torrent {
    /// Final component of `save_path` joined with `name`: the directory this
    /// torrent claims under its category root.
    ///
    /// Returns `None` when no final component can be derived (empty name),
    /// in which case the record claims no directory at all.
    #[must_use]
    pub fn canonical_dir_name(&self) -> Option<String> {
        if self.name.is_empty() {
            return None;
        }
        Path::new(&self.save_path)
            .join(&self.name)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
    }
}
