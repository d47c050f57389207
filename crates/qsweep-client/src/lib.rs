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

//! Client for the subset of the qBittorrent Web API that the reconciliation
//! pass consumes.
//!
//! Layout: `model.rs` (typed payloads), `client.rs` (HTTP plumbing),
//! `error.rs` (structured errors).

pub mod client;
pub mod error;
pub mod model;

pub use client::QbClient;
pub use error::{ClientError, ClientResult};
pub use model::{Category, Torrent};
