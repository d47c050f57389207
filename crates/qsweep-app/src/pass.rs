//! A single reconciliation pass over every category.
//!
//! # Design
//! - Sequential on purpose: one category at a time, one orphan at a time.
//!   Deletions are irreversible, so the pass favors a fully-ordered,
//!   attributable audit trail over parallel speed-up.
//! - A category's full orphan set is computed before its first deletion.
//! - Every failure below the categories fetch is local: a category that
//!   cannot be listed is skipped, an orphan that cannot be deleted is
//!   reported, and the pass always runs to completion.

use std::collections::BTreeSet;

use tracing::{error, info, warn};

use qsweep_client::{QbClient, Torrent};
use qsweep_fsops::{SweepOutcome, delete_orphan, list_dir_names, reconcile};

use crate::cli::RunConfig;

/// Aggregated result of one reconciliation pass.
#[derive(Debug, Default)]
pub struct PassSummary {
    /// Per-category reports, in processing order.
    pub categories: Vec<CategoryReport>,
}

impl PassSummary {
    /// Total orphans deleted across all categories.
    #[must_use]
    pub fn deleted(&self) -> usize {
        self.categories.iter().map(|report| report.deleted).sum()
    }

    /// Total deletion failures across all categories.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.categories.iter().map(|report| report.failed).sum()
    }
}

/// Outcome of reconciling one category.
#[derive(Debug)]
pub struct CategoryReport {
    /// Category name.
    pub category: String,
    /// Active torrents fetched for the category.
    pub jobs: usize,
    /// Orphan directory names, in deletion order.
    pub orphans: Vec<String>,
    /// Orphans removed from disk.
    pub deleted: usize,
    /// Orphans that could not be removed.
    pub failed: usize,
    /// Whether the category was skipped before reconciliation.
    pub skipped: bool,
}

impl CategoryReport {
    fn skipped(category: &str) -> Self {
        Self {
            category: category.to_owned(),
            jobs: 0,
            orphans: Vec::new(),
            deleted: 0,
            failed: 0,
            skipped: true,
        }
    }
}

/// Run one reconciliation pass with `config` against `client`.
///
/// Never fails: a failed categories fetch yields an empty summary with no
/// filesystem activity, and every error below that is logged and absorbed.
pub async fn run_pass(config: &RunConfig, client: &QbClient) -> PassSummary {
    let categories = match client.list_categories().await {
        Ok(categories) => categories,
        Err(err) => {
            error!(error = %err, "failed to fetch categories, nothing to reconcile");
            return PassSummary::default();
        }
    };
    info!(count = categories.len(), "fetched categories");

    let mut summary = PassSummary::default();
    for category in &categories {
        summary
            .categories
            .push(reconcile_category(config, client, &category.name).await);
    }
    info!(
        categories = summary.categories.len(),
        deleted = summary.deleted(),
        failed = summary.failed(),
        "reconciliation pass complete"
    );
    summary
}

async fn reconcile_category(
    config: &RunConfig,
    client: &QbClient,
    category: &str,
) -> CategoryReport {
    let mut report = CategoryReport::skipped(category);

    let torrents = match client.list_torrents(category).await {
        Ok(torrents) => torrents,
        Err(err) => {
            error!(category, error = %err, "failed to fetch torrents, skipping category");
            return report;
        }
    };
    info!(category, jobs = torrents.len(), "fetched active torrents");

    let category_root = config.check_root.join(category);
    let disk = match list_dir_names(&category_root) {
        Ok(disk) => disk,
        Err(err) => {
            warn!(
                category,
                path = %category_root.display(),
                error = %err,
                "cannot inventory category root, skipping category"
            );
            return report;
        }
    };

    let protected = protected_names(category, &torrents);
    let orphans = reconcile(&disk, &protected);

    report.skipped = false;
    report.jobs = torrents.len();
    report.orphans = orphans.iter().cloned().collect();

    for orphan in &orphans {
        let path = category_root.join(orphan);
        info!(category, path = %path.display(), "orphan directory");

        if config.dry_run {
            info!(category, path = %path.display(), "dry run, leaving orphan in place");
            continue;
        }

        match delete_orphan(&path) {
            SweepOutcome::Deleted { retried } => {
                report.deleted += 1;
                info!(category, path = %path.display(), retried, "orphan deleted");
            }
            SweepOutcome::Failed { retried, source } => {
                report.failed += 1;
                error!(
                    category,
                    path = %path.display(),
                    retried,
                    error = %source,
                    "failed to delete orphan"
                );
            }
        }
    }
    report
}

/// Canonical directory names claimed by the category's active torrents.
fn protected_names(category: &str, torrents: &[Torrent]) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    for torrent in torrents {
        match torrent.canonical_dir_name() {
            Some(name) => {
                names.insert(name);
            }
            None => {
                warn!(
                    category,
                    save_path = %torrent.save_path,
                    "torrent has no derivable directory name, it protects nothing"
                );
            }
        }
    }
    names
}
