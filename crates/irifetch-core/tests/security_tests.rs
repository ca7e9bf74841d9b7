//! Archive attack scenarios run through inspection, validation and
//! extraction without the network.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use irifetch_core::RetrieveError;
use irifetch_core::SecurityRule;
use irifetch_core::TargetDir;
use irifetch_core::extraction::Extractor;
use irifetch_core::formats::ArchiveFormat;
use irifetch_core::formats::TarArchive;
use irifetch_core::inspect;
use irifetch_core::security::MemberValidator;
use irifetch_core::test_utils::TarTestBuilder;
use std::path::Path;
use tempfile::TempDir;

fn create_test_dest() -> (TempDir, TargetDir) {
    let temp = TempDir::new().expect("failed to create temp dir");
    let target = TargetDir::open(temp.path()).expect("failed to open target");
    (temp, target)
}

fn validate_archive(builder: TarTestBuilder, target: &TargetDir) -> irifetch_core::Result<()> {
    let staging = TempDir::new().unwrap();
    let path = staging.path().join("archive.tar");
    builder.write_to(&path);
    let archive = TarArchive::open(&path);
    let validated = MemberValidator::new(target).validate(&archive.members()?)?;
    Extractor::new(target).extract(&archive, &validated)?;
    Ok(())
}

#[test]
fn test_classic_tar_traversal_names() {
    let malicious_paths = [
        "../etc/passwd",
        "../../etc/passwd",
        "foo/../../etc/passwd",
        "foo/../../../etc/passwd",
        "./../sibling",
    ];

    for name in malicious_paths {
        let (temp, target) = create_test_dest();
        let result = validate_archive(
            TarTestBuilder::new()
                .add_file("benign.dat", b"ok")
                .add_raw_file(name, b"pwned"),
            &target,
        );

        assert!(
            matches!(
                result,
                Err(RetrieveError::PathSecurity {
                    rule: SecurityRule::Traversal,
                    ..
                })
            ),
            "path should be rejected: {name}"
        );
        assert!(!temp.path().join("benign.dat").exists());
    }
}

#[test]
fn test_absolute_path_attack() {
    #[cfg(unix)]
    let paths = ["/etc/passwd", "/tmp/malicious"];

    #[cfg(windows)]
    let paths = ["C:\\Windows\\System32", "\\\\server\\share"];

    for name in paths {
        let (_temp, target) = create_test_dest();
        let err = validate_archive(TarTestBuilder::new().add_raw_file(name, b"x"), &target)
            .unwrap_err();
        assert_eq!(err.rule(), Some(SecurityRule::AbsolutePath), "{name}");
    }
}

#[test]
fn test_inner_dot_dot_that_stays_inside_is_allowed() {
    let (temp, target) = create_test_dest();
    validate_archive(
        TarTestBuilder::new().add_raw_file("source/../ccir/ccir11.asc", b"coeffs"),
        &target,
    )
    .unwrap();
    assert!(temp.path().join("ccir/ccir11.asc").is_file());
}

#[test]
fn test_prefix_sibling_is_not_inside() {
    let outer = TempDir::new().unwrap();
    let dest = outer.path().join("out");
    std::fs::create_dir(&dest).unwrap();
    let target = TargetDir::open(&dest).unwrap();

    let err = validate_archive(
        TarTestBuilder::new().add_raw_file("../outside/evil.txt", b"x"),
        &target,
    )
    .unwrap_err();
    assert_eq!(err.rule(), Some(SecurityRule::Traversal));
    assert!(!outer.path().join("outside").exists());
}

#[cfg(unix)]
#[test]
fn test_preexisting_symlink_cannot_redirect_writes() {
    let outside = TempDir::new().unwrap();
    let (temp, target) = create_test_dest();
    std::os::unix::fs::symlink(outside.path(), temp.path().join("data")).unwrap();

    let err = validate_archive(
        TarTestBuilder::new().add_file("data/igrf12.dat", b"coeffs"),
        &target,
    )
    .unwrap_err();

    assert_eq!(err.rule(), Some(SecurityRule::Traversal));
    assert!(!outside.path().join("igrf12.dat").exists());
}

#[test]
fn test_symlink_then_write_through_it() {
    // Classic two-step: plant a link, then write a file through it.
    let (temp, target) = create_test_dest();
    let err = validate_archive(
        TarTestBuilder::new()
            .add_symlink("escape", "/tmp")
            .add_file("escape/evil.txt", b"pwned"),
        &target,
    )
    .unwrap_err();

    assert!(err.is_security_violation());
    assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[test]
fn test_hardlink_to_sensitive_file() {
    let (_temp, target) = create_test_dest();
    let err = validate_archive(
        TarTestBuilder::new().add_hardlink("passwd", "/etc/passwd"),
        &target,
    )
    .unwrap_err();
    assert!(matches!(
        err.rule(),
        Some(SecurityRule::ForbiddenKind(_))
    ));
}

#[test]
fn test_inspect_never_writes() {
    let (temp, _target) = create_test_dest();
    let staging = TempDir::new().unwrap();
    let path = staging.path().join("00_iri.tar");
    TarTestBuilder::new()
        .add_directory("source/")
        .add_file("source/irisub.for", b"C IRI")
        .write_to(&path);

    let inspection = inspect(&path, temp.path()).unwrap();
    assert!(inspection.is_archive);
    assert!(inspection.is_safe());
    assert_eq!(inspection.members.len(), 2);
    assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
    assert!(Path::new(&path).is_file());
}
