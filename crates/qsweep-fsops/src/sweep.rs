//! Orphan computation and the deletion policy.
//!
//! # Design
//! - `reconcile` is pure: inventory in, orphan set out, no IO.
//! - Deletion never propagates an error; each orphan resolves to a
//!   [`SweepOutcome`] the caller reports before moving on.
//! - A first attempt denied by permissions gets exactly one retry, after the
//!   orphan tree has been broadened to `0o777`. Any other failure is final.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::Path;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use tracing::{debug, warn};

#[cfg(unix)]
use walkdir::WalkDir;

/// Mode applied across a stubborn orphan tree before the retry.
#[cfg(unix)]
const BROADENED_MODE: u32 = 0o777;

/// Disk entries that no active torrent accounts for.
///
/// Pure set difference: an entry is orphaned exactly when its name is absent
/// from `protected`. An empty `protected` set protects nothing and yields
/// `disk` unchanged.
#[must_use]
pub fn reconcile(disk: &BTreeSet<String>, protected: &BTreeSet<String>) -> BTreeSet<String> {
    disk.difference(protected).cloned().collect()
}

/// Terminal outcome of one orphan deletion.
#[derive(Debug)]
pub enum SweepOutcome {
    /// The directory and its contents were removed.
    Deleted {
        /// Whether removal needed the permission-broadening retry.
        retried: bool,
    },
    /// The directory could not be removed.
    Failed {
        /// Whether the permission-broadening retry was attempted.
        retried: bool,
        /// Error from the final removal attempt.
        source: io::Error,
    },
}

impl SweepOutcome {
    /// Whether the orphan was removed.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted { .. })
    }

    /// Whether the permission-broadening retry ran.
    #[must_use]
    pub const fn retried(&self) -> bool {
        match self {
            Self::Deleted { retried } | Self::Failed { retried, .. } => *retried,
        }
    }
}

/// Remove the orphan directory at `path` together with its contents.
///
/// A first attempt that fails with [`io::ErrorKind::PermissionDenied`] is
/// retried exactly once after [`broaden_permissions`]; any other failure is
/// terminal with no retry and no permission change.
#[must_use]
pub fn delete_orphan(path: &Path) -> SweepOutcome {
    run_policy(path, |target| fs::remove_dir_all(target), broaden_permissions)
}

/// The deletion state machine, generic over the filesystem operations so the
/// permission paths stay testable without contriving real `EACCES` failures.
fn run_policy<D, B>(path: &Path, mut delete: D, broaden: B) -> SweepOutcome
where
    D: FnMut(&Path) -> io::Result<()>,
    B: FnOnce(&Path),
{
    match delete(path) {
        Ok(()) => SweepOutcome::Deleted { retried: false },
        Err(err) if err.kind() == io::ErrorKind::PermissionDenied => {
            debug!(path = %path.display(), "removal denied, broadening permissions");
            broaden(path);
            match delete(path) {
                Ok(()) => SweepOutcome::Deleted { retried: true },
                Err(source) => SweepOutcome::Failed {
                    retried: true,
                    source,
                },
            }
        }
        Err(source) => SweepOutcome::Failed {
            retried: false,
            source,
        },
    }
}

/// Best-effort chmod of the whole tree under `path` to [`BROADENED_MODE`].
///
/// Failures are logged and skipped: the retry runs regardless, and its result
/// is what the caller reports. The walk broadens each directory before
/// descending into it, so an unreadable directory becomes listable in the
/// same pass.
#[cfg(unix)]
fn broaden_permissions(path: &Path) {
    for entry in WalkDir::new(path) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "skipping unreadable entry while broadening permissions"
                );
                continue;
            }
        };
        let perms = fs::Permissions::from_mode(BROADENED_MODE);
        if let Err(err) = fs::set_permissions(entry.path(), perms) {
            warn!(
                path = %entry.path().display(),
                error = %err,
                "failed to broaden permissions"
            );
        }
    }
}

/// Permission modes cannot be broadened on this platform; the retry proceeds
/// against the unchanged tree.
#[cfg(not(unix))]
fn broaden_permissions(path: &Path) {
    warn!(
        path = %path.display(),
        "permission broadening is not supported on this platform"
    );
}
