//! End-to-end reconciliation pass tests against a mocked Web API and a
//! temporary check root.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use httpmock::prelude::*;
use tempfile::TempDir;

use qsweep_app::{RunConfig, run_pass};
use qsweep_client::QbClient;

const TIMEOUT: Duration = Duration::from_secs(2);

fn config_for(server: &MockServer, check_root: &Path, dry_run: bool) -> Result<RunConfig> {
    Ok(RunConfig {
        api_url: server.base_url().parse()?,
        check_root: check_root.to_path_buf(),
        timeout: TIMEOUT,
        dry_run,
    })
}

fn client_for(config: &RunConfig) -> Result<QbClient> {
    Ok(QbClient::new(config.api_url.clone(), config.timeout)?)
}

fn make_dir_with_payload(path: &PathBuf) -> Result<()> {
    fs::create_dir_all(path)?;
    File::create(path.join("payload.bin"))?;
    Ok(())
}

fn mock_categories(server: &MockServer, names: &[&str]) {
    let mut body = serde_json::Map::new();
    for &name in names {
        body.insert(
            name.to_owned(),
            serde_json::json!({"name": name, "savePath": ""}),
        );
    }
    server.mock(|when, then| {
        when.method(GET).path("/api/v2/torrents/categories");
        then.status(200).json_body(serde_json::Value::Object(body));
    });
}

fn mock_torrents(server: &MockServer, category: &str, records: serde_json::Value) {
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/v2/torrents/info")
            .query_param("category", category);
        then.status(200).json_body(records);
    });
}

#[tokio::test]
async fn pass_deletes_orphans_and_spares_claimed_directories() -> Result<()> {
    let server = MockServer::start_async().await;
    let temp = TempDir::new()?;

    mock_categories(&server, &["movies", "tv"]);
    mock_torrents(
        &server,
        "movies",
        serde_json::json!([{"name": "X", "save_path": "/downloads/movies"}]),
    );
    mock_torrents(&server, "tv", serde_json::json!([]));

    make_dir_with_payload(&temp.path().join("movies").join("X"))?;
    make_dir_with_payload(&temp.path().join("movies").join("Y"))?;
    make_dir_with_payload(&temp.path().join("tv").join("A"))?;
    make_dir_with_payload(&temp.path().join("tv").join("B"))?;

    let config = config_for(&server, temp.path(), false)?;
    let summary = run_pass(&config, &client_for(&config)?).await;

    assert_eq!(summary.categories.len(), 2);
    let movies = &summary.categories[0];
    assert_eq!(movies.category, "movies");
    assert_eq!(movies.jobs, 1);
    assert_eq!(movies.orphans, ["Y"]);
    let tv = &summary.categories[1];
    assert_eq!(tv.category, "tv");
    assert_eq!(tv.jobs, 0);
    assert_eq!(tv.orphans, ["A", "B"]);

    assert_eq!(summary.deleted(), 3);
    assert_eq!(summary.failed(), 0);
    assert!(temp.path().join("movies").join("X").is_dir());
    assert!(!temp.path().join("movies").join("Y").exists());
    assert!(!temp.path().join("tv").join("A").exists());
    assert!(!temp.path().join("tv").join("B").exists());
    Ok(())
}

#[tokio::test]
async fn missing_category_root_is_skipped_and_pass_continues() -> Result<()> {
    let server = MockServer::start_async().await;
    let temp = TempDir::new()?;

    // Sorted order puts `music` between the two categories that do exist on
    // disk, so the later `tv` deletion proves the pass kept going.
    mock_categories(&server, &["movies", "music", "tv"]);
    mock_torrents(&server, "movies", serde_json::json!([]));
    mock_torrents(&server, "music", serde_json::json!([]));
    mock_torrents(&server, "tv", serde_json::json!([]));

    make_dir_with_payload(&temp.path().join("movies").join("Y"))?;
    make_dir_with_payload(&temp.path().join("tv").join("A"))?;

    let config = config_for(&server, temp.path(), false)?;
    let summary = run_pass(&config, &client_for(&config)?).await;

    assert_eq!(summary.categories.len(), 3);
    assert!(summary.categories[1].skipped);
    assert!(summary.categories[1].orphans.is_empty());
    assert!(!summary.categories[0].skipped);
    assert!(!summary.categories[2].skipped);
    assert_eq!(summary.deleted(), 2);
    assert!(!temp.path().join("movies").join("Y").exists());
    assert!(!temp.path().join("tv").join("A").exists());
    Ok(())
}

#[tokio::test]
async fn failed_torrent_fetch_skips_category_but_not_the_pass() -> Result<()> {
    let server = MockServer::start_async().await;
    let temp = TempDir::new()?;

    mock_categories(&server, &["movies", "tv"]);
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/v2/torrents/info")
            .query_param("category", "movies");
        then.status(500);
    });
    mock_torrents(&server, "tv", serde_json::json!([]));

    make_dir_with_payload(&temp.path().join("movies").join("Y"))?;
    make_dir_with_payload(&temp.path().join("tv").join("A"))?;

    let config = config_for(&server, temp.path(), false)?;
    let summary = run_pass(&config, &client_for(&config)?).await;

    assert!(summary.categories[0].skipped);
    assert!(!summary.categories[1].skipped);
    // The skipped category's disk entries are untouched.
    assert!(temp.path().join("movies").join("Y").is_dir());
    assert!(!temp.path().join("tv").join("A").exists());
    Ok(())
}

#[tokio::test]
async fn failed_categories_fetch_touches_nothing() -> Result<()> {
    let server = MockServer::start_async().await;
    let temp = TempDir::new()?;

    server.mock(|when, then| {
        when.method(GET).path("/api/v2/torrents/categories");
        then.status(502);
    });

    make_dir_with_payload(&temp.path().join("movies").join("Y"))?;

    let config = config_for(&server, temp.path(), false)?;
    let summary = run_pass(&config, &client_for(&config)?).await;

    assert!(summary.categories.is_empty());
    assert_eq!(summary.deleted(), 0);
    assert!(temp.path().join("movies").join("Y").is_dir());
    Ok(())
}

#[tokio::test]
async fn dry_run_reports_orphans_without_deleting() -> Result<()> {
    let server = MockServer::start_async().await;
    let temp = TempDir::new()?;

    mock_categories(&server, &["movies"]);
    mock_torrents(&server, "movies", serde_json::json!([]));

    make_dir_with_payload(&temp.path().join("movies").join("Y"))?;

    let config = config_for(&server, temp.path(), true)?;
    let summary = run_pass(&config, &client_for(&config)?).await;

    assert_eq!(summary.categories[0].orphans, ["Y"]);
    assert_eq!(summary.deleted(), 0);
    assert_eq!(summary.failed(), 0);
    assert!(temp.path().join("movies").join("Y").is_dir());
    Ok(())
}

#[tokio::test]
async fn malformed_torrent_record_does_not_unprotect_the_rest() -> Result<()> {
    let server = MockServer::start_async().await;
    let temp = TempDir::new()?;

    mock_categories(&server, &["movies"]);
    mock_torrents(
        &server,
        "movies",
        serde_json::json!([
            {"name": "X", "save_path": "/downloads/movies"},
            {"unexpected": true},
        ]),
    );

    make_dir_with_payload(&temp.path().join("movies").join("X"))?;
    make_dir_with_payload(&temp.path().join("movies").join("Y"))?;

    let config = config_for(&server, temp.path(), false)?;
    let summary = run_pass(&config, &client_for(&config)?).await;

    assert_eq!(summary.categories[0].jobs, 1);
    assert_eq!(summary.categories[0].orphans, ["Y"]);
    assert!(temp.path().join("movies").join("X").is_dir());
    assert!(!temp.path().join("movies").join("Y").exists());
    Ok(())
}
