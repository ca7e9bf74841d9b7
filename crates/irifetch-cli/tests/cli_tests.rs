//! Integration tests for irifetch-cli.
//!
//! Note: Tests use `unwrap`/`expect` which is acceptable in test code.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use irifetch_core::test_utils::TarTestBuilder;
use mockito::Server;
use predicates::prelude::*;
use tempfile::TempDir;

fn irifetch_cmd() -> Command {
    cargo_bin_cmd!("irifetch")
}

#[test]
fn test_version_flag() {
    irifetch_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("irifetch"));
}

#[test]
fn test_help_flag() {
    irifetch_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("retrieve"))
        .stdout(predicate::str::contains("sync"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_retrieve_help() {
    irifetch_cmd()
        .arg("retrieve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("unpack it if it is a tar archive"));
}

#[test]
fn test_retrieve_extracts_archive() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/IRI-2016/00_iri.tar")
        .with_status(200)
        .with_body(
            TarTestBuilder::new()
                .add_directory("source/")
                .add_file("source/irisub.for", &[b'C'; 1024])
                .build(),
        )
        .create();
    let temp = TempDir::new().expect("failed to create temp dir");

    irifetch_cmd()
        .arg("retrieve")
        .arg(format!("{}/IRI-2016", server.url()))
        .arg("00_iri.tar")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Extracted"))
        .stdout(predicate::str::contains("Files extracted: 1"));

    assert_eq!(
        std::fs::read(temp.path().join("source/irisub.for"))
            .unwrap()
            .len(),
        1024
    );
    assert!(!temp.path().join("00_iri.tar").exists());
}

#[test]
fn test_retrieve_stores_plain_file() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/apf107.dat")
        .with_status(200)
        .with_body("1958 apf107")
        .create();
    let temp = TempDir::new().unwrap();

    irifetch_cmd()
        .arg("retrieve")
        .arg(server.url())
        .arg("apf107.dat")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Stored"));

    assert_eq!(
        std::fs::read_to_string(temp.path().join("apf107.dat")).unwrap(),
        "1958 apf107"
    );
}

#[test]
fn test_retrieve_json_output() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/ig_rz.dat")
        .with_status(200)
        .with_body("ig_rz")
        .create();
    let temp = TempDir::new().unwrap();

    let output = irifetch_cmd()
        .arg("--json")
        .arg("retrieve")
        .arg(server.url())
        .arg("ig_rz.dat")
        .arg(temp.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["operation"], "retrieve");
    assert_eq!(json["status"], "success");
    assert_eq!(json["data"]["status"], "stored");
    assert_eq!(json["data"]["bytes_fetched"], 5);
}

#[test]
fn test_retrieve_rejects_malicious_archive() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/evil.tar")
        .with_status(200)
        .with_body(
            TarTestBuilder::new()
                .add_file("benign.dat", b"ok")
                .add_raw_file("../../evil.txt", b"pwned")
                .build(),
        )
        .create();
    let outer = TempDir::new().unwrap();
    let dest = outer.path().join("a").join("b");

    irifetch_cmd()
        .arg("retrieve")
        .arg(server.url())
        .arg("evil.tar")
        .arg(&dest)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Security violation"))
        .stderr(predicate::str::contains("../../evil.txt"));

    assert!(!dest.join("benign.dat").exists());
    assert!(!outer.path().join("evil.txt").exists());
    assert!(dest.join("evil.tar").exists());
}

#[test]
fn test_retrieve_not_found() {
    let mut server = Server::new();
    let _mock = server.mock("GET", "/00_iri.tar").with_status(404).create();
    let temp = TempDir::new().unwrap();

    irifetch_cmd()
        .arg("retrieve")
        .arg(server.url())
        .arg("00_iri.tar")
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("404"));

    assert!(!temp.path().join("00_iri.tar").exists());
}

#[test]
fn test_retrieve_rejects_nested_filename() {
    let temp = TempDir::new().unwrap();

    irifetch_cmd()
        .arg("retrieve")
        .arg("https://irimodel.org")
        .arg("IRI-2016/00_iri.tar")
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid file name"));
}

#[test]
fn test_retrieve_rejects_bad_timeout() {
    irifetch_cmd()
        .arg("retrieve")
        .arg("--timeout")
        .arg("soon")
        .arg("https://irimodel.org/IRI-2016")
        .arg("00_iri.tar")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid duration"));
}

#[test]
fn test_check_safe_archive() {
    let temp = TempDir::new().unwrap();
    let archive = temp.path().join("00_ccir-ursi.tar");
    TarTestBuilder::new()
        .add_directory("ccir/")
        .add_file("ccir/ccir11.asc", b"coeffs")
        .write_to(&archive);
    let dest = TempDir::new().unwrap();

    irifetch_cmd()
        .arg("check")
        .arg(&archive)
        .arg(dest.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("ccir/ccir11.asc"))
        .stdout(predicate::str::contains("SAFE"));

    assert_eq!(std::fs::read_dir(dest.path()).unwrap().count(), 0);
}

#[test]
fn test_check_rejects_symlink() {
    let temp = TempDir::new().unwrap();
    let archive = temp.path().join("links.tar");
    TarTestBuilder::new()
        .add_symlink("latest", "/etc/passwd")
        .write_to(&archive);

    irifetch_cmd()
        .arg("check")
        .arg(&archive)
        .arg(temp.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("REJECTED"))
        .stderr(predicate::str::contains("failed validation"));
}

#[test]
fn test_check_json_output() {
    let temp = TempDir::new().unwrap();
    let archive = temp.path().join("evil.tar");
    TarTestBuilder::new()
        .add_raw_file("/etc/passwd", b"x")
        .write_to(&archive);

    let output = irifetch_cmd()
        .arg("--json")
        .arg("check")
        .arg(&archive)
        .arg(temp.path())
        .output()
        .unwrap();

    assert!(!output.status.success());
    // First document is the check result, the error follows
    let mut stream =
        serde_json::Deserializer::from_slice(&output.stdout).into_iter::<serde_json::Value>();
    let json = stream.next().unwrap().unwrap();
    assert_eq!(json["operation"], "check");
    assert_eq!(json["status"], "error");
    assert_eq!(json["data"]["safe"], false);
    assert_eq!(json["data"]["members"][0]["name"], "/etc/passwd");
}

#[test]
fn test_check_plain_file() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("ig_rz.dat");
    std::fs::write(&file, "plain index data").unwrap();

    irifetch_cmd()
        .arg("check")
        .arg(&file)
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("not a tar archive"));
}

#[test]
fn test_sync_list() {
    let temp = TempDir::new().unwrap();

    irifetch_cmd()
        .arg("sync")
        .arg("--list")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("iri2016-source"))
        .stdout(predicate::str::contains("https://irimodel.org/IRI-2016/00_iri.tar"))
        .stdout(predicate::str::contains("data/index"));
}

#[test]
fn test_sync_unknown_dataset() {
    irifetch_cmd()
        .arg("sync")
        .arg("--only")
        .arg("igrf")
        .arg("--list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown data set 'igrf'"));
}

#[test]
fn test_quiet_and_verbose_conflict() {
    irifetch_cmd()
        .arg("--quiet")
        .arg("--verbose")
        .arg("sync")
        .arg("--list")
        .assert()
        .failure();
}

#[test]
fn test_completion_bash() {
    irifetch_cmd()
        .arg("completion")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("irifetch"));
}
