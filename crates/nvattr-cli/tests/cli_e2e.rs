#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Runs against an empty config file so the user's settings never leak in.
fn nvattr_cmd(temp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("nvattr"));
    cmd.env_remove("DISPLAY")
        .env_remove("NVATTR_FORMAT")
        .env_remove("NVATTR_LOG")
        .arg("--config")
        .arg(temp.path().join("nvattr.toml"));
    cmd
}

#[test]
fn test_assign_prints_record() {
    let temp = TempDir::new().unwrap();
    nvattr_cmd(&temp)
        .args(["assign", "localhost:0.1/Brightness[DFP-0]=50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Brightness = 50"))
        .stdout(predicate::str::contains("localhost:0.1"))
        .stdout(predicate::str::contains("[x-screen:1]"));
}

#[test]
fn test_parse_failure_exits_with_one() {
    let temp = TempDir::new().unwrap();
    nvattr_cmd(&temp)
        .args(["assign", "/Brightness=50", "/Brightness=50extra"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Brightness = 50"))
        .stdout(predicate::str::contains("Trailing garbage"))
        .stderr(predicate::str::contains("1 of 2 attribute strings failed"));
}

#[test]
fn test_query_rejects_values() {
    let temp = TempDir::new().unwrap();
    nvattr_cmd(&temp)
        .args(["query", "/Brightness=5"])
        .assert()
        .code(1);

    nvattr_cmd(&temp)
        .args(["query", "[gpu:0]/GPUCoreTemp"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[gpu:0]"));
}

#[test]
fn test_json_output() {
    let temp = TempDir::new().unwrap();
    let output = nvattr_cmd(&temp)
        .args(["--format", "json", "assign", "/GPU3DClockFreqs=500,900"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value[0]["status"], "success");
    assert_eq!(value[0]["record"]["attribute"], "GPU3DClockFreqs");
    assert_eq!(value[0]["record"]["value"]["value"], (500 << 16) | 900);
}

#[test]
fn test_default_display_from_config_file() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("nvattr.toml"), "display = \"myhost:0.2\"\n").unwrap();

    nvattr_cmd(&temp)
        .args(["query", "/Contrast"])
        .assert()
        .success()
        .stdout(predicate::str::contains("myhost:0.2"))
        .stdout(predicate::str::contains("[x-screen:2]"));

    // An explicit display in the string wins.
    nvattr_cmd(&temp)
        .args(["query", ":1/Contrast"])
        .assert()
        .success()
        .stdout(predicate::str::contains("myhost").not());
}

#[test]
fn test_option_overrides() {
    let temp = TempDir::new().unwrap();
    nvattr_cmd(&temp)
        .args(["-o", "format=json", "status", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"description\": \"No error\""));

    nvattr_cmd(&temp)
        .args(["-o", "colour=red", "status"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown config key 'colour'"));
}

#[test]
fn test_mask_conversions() {
    let temp = TempDir::new().unwrap();
    nvattr_cmd(&temp)
        .args(["mask", "dfp-1,crt-0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0x00020001"))
        .stdout(predicate::str::contains("CRT-0,DFP-1"));

    nvattr_cmd(&temp)
        .args(["mask", "--from-mask", "0x01000000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CRT"))
        .stdout(predicate::str::contains("0x000000ff"));

    nvattr_cmd(&temp).args(["mask", "LCD-0"]).assert().code(1);
}

#[test]
fn test_list_hides_no_query_all_entries() {
    let temp = TempDir::new().unwrap();
    nvattr_cmd(&temp)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Brightness"))
        .stdout(predicate::str::contains("SwitchToDisplays").not());

    nvattr_cmd(&temp)
        .args(["list", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SwitchToDisplays"));
}

#[test]
fn test_status_codes() {
    let temp = TempDir::new().unwrap();
    nvattr_cmd(&temp)
        .args(["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(" 0  No error"))
        .stdout(predicate::str::contains("16  "));

    nvattr_cmd(&temp)
        .args(["status", "42"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown status code 42"));
}
