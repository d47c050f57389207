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

//! Disk-side reconciliation primitives for qsweep.
//!
//! Layout: `inventory.rs` (category root listing), `sweep.rs` (orphan
//! computation and the deletion policy), `error.rs` (structured errors).

pub mod error;
pub mod inventory;
pub mod sweep;

pub use error::{FsOpsError, FsOpsResult};
pub use inventory::list_dir_names;
pub use sweep::{SweepOutcome, delete_orphan, reconcile};
