//! End-to-end tests for the harvester binary.

#![allow(deprecated)]

mod support;
use support::socket_guard::start_mock_server_or_skip;

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

/// Binary with an isolated config home and no inherited credential.
fn harvester(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("harvester").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env_remove("NARA_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

fn write_csv(path: &Path, body: &str) {
    std::fs::write(path, format!("naId,title,objectUrl,objectFileSize\n{body}")).unwrap();
}

#[test]
fn test_binary_help_lists_subcommands() {
    let temp = TempDir::new().unwrap();
    harvester(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("harvest"))
        .stdout(predicate::str::contains("download"))
        .stdout(predicate::str::contains("split"));
}

#[test]
fn test_binary_version() {
    let temp = TempDir::new().unwrap();
    harvester(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("harvester"));
}

#[test]
fn test_harvest_without_credential_exits_one() {
    let temp = TempDir::new().unwrap();
    harvester(temp.path())
        .args(["harvest", "--parent-naid", "720246"])
        .arg("--outdir")
        .arg(temp.path().join("results"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("[ERROR]"))
        .stderr(predicate::str::contains("NARA_API_KEY"));
    assert!(!temp.path().join("results").exists());
}

#[test]
fn test_harvest_blank_credential_exits_one() {
    let temp = TempDir::new().unwrap();
    harvester(temp.path())
        .env("NARA_API_KEY", "   ")
        .args(["harvest", "--naid", "1"])
        .assert()
        .code(1);
}

#[test]
fn test_download_missing_csv_exits_one() {
    let temp = TempDir::new().unwrap();
    harvester(temp.path())
        .arg("download")
        .arg("--csv")
        .arg(temp.path().join("missing.csv"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing.csv"));
}

#[test]
fn test_download_dry_run_touches_nothing() {
    let temp = TempDir::new().unwrap();
    let csv = temp.path().join("rows.csv");
    write_csv(
        &csv,
        "1,A,https://s3.example/a/scan.tif,1536\n2,B,,0\n",
    );
    let downloads = temp.path().join("downloads");

    harvester(temp.path())
        .arg("download")
        .arg("--csv")
        .arg(&csv)
        .arg("--download-path")
        .arg(&downloads)
        .arg("--test")
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 total binaries in CSV."))
        .stdout(predicate::str::contains("Sum of file sizes: 1.5K"))
        .stdout(predicate::str::contains("[TEST MODE]"))
        .stdout(predicate::str::contains("1_scan.tif"));

    assert!(!downloads.exists());
}

#[test]
fn test_download_empty_csv_exits_zero() {
    let temp = TempDir::new().unwrap();
    let csv = temp.path().join("rows.csv");
    write_csv(&csv, "");
    let downloads = temp.path().join("downloads");

    harvester(temp.path())
        .arg("download")
        .arg("--csv")
        .arg(&csv)
        .arg("--download-path")
        .arg(&downloads)
        .assert()
        .success()
        .stdout(predicate::str::contains("No items to process."));

    assert!(!downloads.exists());
}

#[test]
fn test_split_writes_parts_beside_input() {
    let temp = TempDir::new().unwrap();
    let csv = temp.path().join("rows.csv");
    write_csv(
        &csv,
        "1,A,https://x/1,1\n2,B,https://x/2,1\n3,C,https://x/3,1\n4,D,https://x/4,1\n5,E,https://x/5,1\n",
    );

    harvester(temp.path())
        .args(["split", "--parts", "2", "--input"])
        .arg(&csv)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Total data rows found (excluding header): 5",
        ));

    let first = std::fs::read_to_string(temp.path().join("rows_part1.csv")).unwrap();
    let second = std::fs::read_to_string(temp.path().join("rows_part2.csv")).unwrap();
    assert_eq!(first.lines().count(), 4);
    assert_eq!(second.lines().count(), 3);
    assert!(second.starts_with("naId,title,objectUrl,objectFileSize"));
}

#[test]
fn test_invalid_config_file_exits_one() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("bad.toml");
    std::fs::write(&config, "page_limit = 0\n").unwrap();

    harvester(temp.path())
        .arg("--config")
        .arg(&config)
        .args(["split", "--input", "whatever.csv"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("[ERROR]"));
}

#[tokio::test]
async fn test_harvest_then_download_against_mock_api() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };

    let page = json!({"body": {"hits": {"total": {"value": 2}, "hits": [
        {"_source": {"record": {"naId": 501, "title": "Plan", "digitalObjects": [
            {"objectUrl": format!("{}/files/plan.pdf", server.uri()), "objectFileSize": 3}
        ]}}},
        {"_source": {"record": {"naId": 502, "title": "No assets"}}}
    ]}}});
    Mock::given(method("GET"))
        .and(path("/api/v2/records/parentNaId/77"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/files/plan.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PDF".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let results = temp.path().join("results");
    let downloads = temp.path().join("downloads");

    harvester(temp.path())
        .env("NARA_API_KEY", "e2e-key-0001")
        .args(["harvest", "--parent-naid", "77", "--download", "-q"])
        .arg("--api-base-url")
        .arg(format!("{}/api/v2", server.uri()))
        .arg("--outdir")
        .arg(&results)
        .arg("--download-path")
        .arg(&downloads)
        .assert()
        .success()
        .stdout(predicate::str::contains("parentNaId=77: complete"))
        .stdout(predicate::str::contains("Found 1 total binaries in harvested rows."))
        .stdout(predicate::str::contains("in CSV").not())
        .stdout(predicate::str::contains("e2e-…"))
        .stdout(predicate::str::contains("e2e-key-0001").not());

    let csv_files: Vec<_> = std::fs::read_dir(&results)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("77-binaries-"))
        .collect();
    assert_eq!(csv_files.len(), 1);

    let run_dirs: Vec<_> = std::fs::read_dir(&downloads)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(run_dirs.len(), 1);
    assert!(run_dirs[0].file_name().unwrap().to_string_lossy().ends_with("-1"));
    assert_eq!(std::fs::read(run_dirs[0].join("501_plan.pdf")).unwrap(), b"PDF");
}

#[tokio::test]
async fn test_download_with_failed_item_exits_two() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/ok.bin"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ok".to_vec()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/gone.bin"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let csv = temp.path().join("rows.csv");
    write_csv(
        &csv,
        &format!(
            "1,A,{0}/ok.bin,2\n2,B,{0}/gone.bin,2\n3,C,,0\n",
            server.uri()
        ),
    );

    harvester(temp.path())
        .arg("download")
        .arg("--csv")
        .arg(&csv)
        .arg("--download-path")
        .arg(temp.path().join("downloads"))
        .assert()
        .code(2)
        .stdout(predicate::str::contains("===== DOWNLOAD SUMMARY ====="))
        .stdout(predicate::str::contains("Failed downloads: 1"))
        .stdout(predicate::str::contains("Item 3 has no objectUrl, skipping."))
        .stdout(predicate::str::contains("Skipped (no URL): 1"))
        .stderr(predicate::str::contains("Download error for"))
        .stderr(predicate::str::contains("Item 3 has no objectUrl").not());
}
