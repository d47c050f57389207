#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions, clippy::multiple_crate_versions)]

//! qsweep application wiring.
//!
//! Layout: `cli.rs` (argument surface and pass configuration), `pass.rs`
//! (per-category reconciliation), `error.rs` (bootstrap errors).

use clap::Parser;
use tracing::info;

use qsweep_client::QbClient;
use qsweep_telemetry::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, init_logging};

pub mod cli;
pub mod error;
pub mod pass;

pub use cli::{Cli, RunConfig};
pub use error::{AppError, AppResult};
pub use pass::{CategoryReport, PassSummary, run_pass};

/// Parse the process arguments and run one reconciliation pass.
///
/// The process exits zero when the pass completes, regardless of how many
/// categories or orphans failed along the way; those failures are logged.
///
/// # Errors
///
/// Returns an error when logging cannot be installed or the HTTP client
/// cannot be built. Argument errors exit earlier, inside clap.
pub async fn run_app() -> AppResult<()> {
    let config = Cli::parse().into_config();

    init_logging(&LoggingConfig {
        level: DEFAULT_LOG_LEVEL,
        format: LogFormat::infer(),
        build_sha: env!("CARGO_PKG_VERSION"),
    })
    .map_err(|source| AppError::telemetry("init_logging", source))?;

    info!(
        version = qsweep_telemetry::build_sha(),
        api_url = %config.api_url,
        check_root = %config.check_root.display(),
        dry_run = config.dry_run,
        "starting reconciliation pass"
    );

    let client = QbClient::new(config.api_url.clone(), config.timeout)
        .map_err(|source| AppError::client("client.new", source))?;

    run_pass(&config, &client).await;
    Ok(())
}
