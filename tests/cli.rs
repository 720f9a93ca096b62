//! End-to-end tests for the `kodegen_bundler_assets` binary.

use assert_cmd::Command;
use kodegen_bundler_assets::bundler::Manifest;
use predicates::prelude::*;
use std::fs;

fn bin() -> Command {
    let mut cmd = Command::cargo_bin("kodegen_bundler_assets").unwrap();
    cmd.env_remove("KODEGEN_ASSETS_WORKERS");
    cmd
}

#[test]
fn missing_directory_argument_prints_usage() {
    bin()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Missing required argument"))
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn empty_directory_produces_empty_bundle() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("static");
    fs::create_dir(&root).unwrap();
    let out = dir.path().join("files/assets.json");

    bin().arg("-o").arg(&out).arg(&root).assert().success();

    let manifest = Manifest::from_slice(&fs::read(&out).unwrap()).unwrap();
    assert_eq!(manifest.package, "files");
    assert!(manifest.assets.is_empty());
}

#[test]
fn bad_exclude_pattern_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("static");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("a.txt"), "a").unwrap();
    let out = dir.path().join("assets.json");

    bin()
        .arg("-o")
        .arg(&out)
        .args(["--exclude", "[broken"])
        .arg(&root)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid exclude pattern"));
    assert!(!out.exists());
}

#[test]
fn missing_root_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("assets.json");

    bin()
        .arg("-o")
        .arg(&out)
        .arg(dir.path().join("nope"))
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error:"));
    assert!(!out.exists());
}

#[test]
fn compiles_tree_with_exclusions_and_hidden_files() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("static");
    fs::create_dir_all(root.join("templates")).unwrap();
    fs::create_dir_all(root.join("assets/.sass-cache")).unwrap();
    fs::write(root.join("templates/foo.html"), "<p>{{x}}</p>").unwrap();
    fs::write(root.join("assets/foo.scss"), "$x: 1;").unwrap();
    fs::write(root.join("assets/foo.css"), "p { color: red; }\n".repeat(50)).unwrap();
    fs::write(root.join("assets/.sass-cache/x"), "cache").unwrap();
    fs::write(root.join(".htaccess"), "deny").unwrap();
    let out = dir.path().join("assets.json");

    bin()
        .arg("-o")
        .arg(&out)
        .args(["--package", "web", "--exclude", "*.scss,templates/*", "-j", "3"])
        .arg(&root)
        .assert()
        .success();

    let manifest = Manifest::from_slice(&fs::read(&out).unwrap()).unwrap();
    assert_eq!(manifest.package, "web");
    let names: Vec<_> = manifest.assets.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["assets/foo.css"]);
    assert!(manifest.assets[0].is_compressed());
}
