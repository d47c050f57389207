//! Command-line surface for the reconciliation pass.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use url::Url;

/// Default per-request timeout for upstream API calls, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Remove on-disk directories that no active qBittorrent torrent claims.
///
/// One pass per invocation: categories are fetched from the Web API, each
/// category's directory inventory under the check root is reconciled against
/// its active torrents, and every unclaimed directory is deleted.
#[derive(Debug, Parser)]
#[command(name = "qsweep", version)]
pub struct Cli {
    /// Base URL of the qBittorrent Web API, e.g. `http://127.0.0.1:8080`.
    pub api_url: Url,

    /// Root directory holding one subdirectory per category.
    pub check_root: PathBuf,

    /// Per-request timeout for upstream API calls, in seconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Report orphan directories without deleting anything.
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// Convert parsed arguments into the pass configuration.
    #[must_use]
    pub fn into_config(self) -> RunConfig {
        RunConfig {
            api_url: self.api_url,
            check_root: self.check_root,
            timeout: Duration::from_secs(self.timeout),
            dry_run: self.dry_run,
        }
    }
}

/// Explicit configuration for one reconciliation pass, threaded through every
/// component instead of living in ambient state.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Base URL of the qBittorrent Web API.
    pub api_url: Url,
    /// Root directory holding one subdirectory per category.
    pub check_root: PathBuf,
    /// Per-request timeout for upstream API calls.
    pub timeout: Duration,
    /// When set, orphans are reported but never deleted.
    pub dry_run: bool,
}
