use std::io::Write;

use assert_cmd::Command;

const BIN: &str = "conectactl";

fn stdout_of(args: &[&str]) -> String {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    let out = cmd.args(args).assert().success();
    String::from_utf8_lossy(&out.get_output().stdout).to_string()
}

#[test]
fn test_empty_args() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.assert().failure();
}

#[test]
fn test_help() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("-h").assert().success();
}

#[test]
fn test_version_opt() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("-V").assert().failure();
}

#[test]
fn test_version_keyword() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("version").assert().success();
}

#[test]
fn test_bad_keyword() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("bouh").assert().failure();
}

#[test]
fn test_list_empty() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("list").assert().failure();
}

#[test]
fn test_list_facilities() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"version = 1\n").unwrap();
    let path = file.path().to_string_lossy().to_string();

    let out = stdout_of(&["-c", &path, "list", "facilities"]);
    assert!(out.contains("List all facilities (30)"));
    assert!(out.contains("USAFA Aloha"));
}

#[test]
fn test_missing_explicit_config() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.args(["-c", "/nonexistent/conecta.hcl", "list", "facilities"])
        .assert()
        .failure();
}

#[test]
fn test_distance() {
    let out = stdout_of(&["distance", "0", "0", "0", "1"]);
    assert_eq!("111.195 km", out.trim());

    let out = stdout_of(&["distance", "-24.0195538", "-46.5147097", "-24.0195538", "-46.5147097"]);
    assert_eq!("0.000 km", out.trim());
}

#[test]
fn test_check_cpf() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.args(["check", "cpf", "529.982.247-25"]).assert().success();

    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.args(["check", "cpf", "111.111.111-11"]).assert().failure();
}

#[test]
fn test_check_bad_kind() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.args(["check", "rg", "12345"]).assert().failure();
}

#[test]
fn test_find_needs_cep() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("find").assert().failure();
}
