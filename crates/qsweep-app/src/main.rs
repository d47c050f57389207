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
#![allow(clippy::multiple_crate_versions)]

//! Binary entrypoint that parses the CLI surface and runs one
//! reconciliation pass.

use qsweep_app::{AppResult, run_app};

/// Parses arguments, installs logging, and runs one reconciliation pass.
#[tokio::main]
async fn main() -> AppResult<()> {
    run_app().await
}
