use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

#[allow(deprecated)]
fn get_otafetch_bin() -> PathBuf {
    assert_cmd::cargo::cargo_bin("otafetch")
}

fn write_fixture(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("devices.yaml");
    let yaml = "devices:\n  - codename: cheetah\n    name: Pixel 7 Pro\n  - codename: panther\n    name: Pixel 7\n  - codename: oriole\n";
    std::fs::write(&path, yaml).unwrap();
    path
}

#[test]
fn test_devices_command_help() {
    let mut cmd = Command::new(get_otafetch_bin());
    cmd.arg("devices").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "Print device records from the configuration file",
        ))
        .stdout(predicate::str::contains("--file"))
        .stdout(predicate::str::contains("--field"));
}

#[test]
fn test_devices_prints_one_line_per_record() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_fixture(&dir);

    let mut cmd = Command::new(get_otafetch_bin());
    cmd.arg("devices").arg("--file").arg(&file);

    let output = cmd.assert().success().get_output().stdout.clone();
    let stdout = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("cheetah"));
    assert!(lines[1].contains("panther"));
    assert!(lines[2].contains("oriole"));
}

#[test]
fn test_devices_field_projection_preserves_order() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_fixture(&dir);

    let mut cmd = Command::new(get_otafetch_bin());
    cmd.arg("devices")
        .arg("--file")
        .arg(&file)
        .arg("--field")
        .arg("codename");

    cmd.assert()
        .success()
        .stdout(predicate::eq("cheetah\npanther\noriole\n"));
}

#[test]
fn test_devices_missing_field_prints_empty_line() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_fixture(&dir);

    let mut cmd = Command::new(get_otafetch_bin());
    cmd.arg("devices")
        .arg("--file")
        .arg(&file)
        .arg("--field")
        .arg("name");

    // Third record has no `name`; its line is empty but still present.
    cmd.assert()
        .success()
        .stdout(predicate::eq("Pixel 7 Pro\nPixel 7\n\n"));
}

#[test]
fn test_devices_missing_file_fails() {
    let mut cmd = Command::new(get_otafetch_bin());
    cmd.arg("devices").arg("--file").arg("/nonexistent/devices.yaml");

    cmd.assert().failure();
}

#[test]
fn test_devices_malformed_yaml_fails() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("devices.yaml");
    std::fs::write(&file, "devices: [codename: {").unwrap();

    let mut cmd = Command::new(get_otafetch_bin());
    cmd.arg("devices").arg("--file").arg(&file);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("parse"));
}
