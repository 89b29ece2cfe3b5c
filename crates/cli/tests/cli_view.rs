//! CLI integration tests for `vaultkey-view`.

#![allow(deprecated)] // Command::cargo_bin is deprecated but still works

mod common;

use assert_cmd::Command;
use common::{fixture, password_file, ADDRESS, PASSWORD, PRIVATE_KEY};
use predicates::prelude::*;
use tempfile::TempDir;

fn view() -> Command {
    let mut cmd = Command::cargo_bin("vaultkey-view").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("VAULTKEY_PATH")
        .env_remove("VAULTKEY_PASSWORD_FILE");
    cmd
}

#[test]
fn test_view_scrypt_keystore() {
    let temp_dir = TempDir::new().unwrap();
    let input = fixture(temp_dir.path(), "scrypt-light.json");
    let password = password_file(temp_dir.path(), "pw", PASSWORD);

    view()
        .arg(&input)
        .arg("--password-file")
        .arg(&password)
        .assert()
        .success()
        .stdout(predicate::str::contains("m/44'/60'/0'/0/0"))
        .stdout(predicate::str::contains(PRIVATE_KEY))
        .stdout(predicate::str::contains(ADDRESS))
        .stdout(predicate::str::contains("9612d7a727c9d0a22e185a1c768478df"));
}

#[test]
fn test_view_pbkdf2_keystore() {
    let temp_dir = TempDir::new().unwrap();
    let input = fixture(temp_dir.path(), "pbkdf2-light.json");
    let password = password_file(temp_dir.path(), "pw", PASSWORD);

    view()
        .arg(&input)
        .arg("--password-file")
        .arg(&password)
        .assert()
        .success()
        .stdout(predicate::str::contains(ADDRESS));
}

#[test]
fn test_view_custom_path() {
    let temp_dir = TempDir::new().unwrap();
    let input = fixture(temp_dir.path(), "scrypt-light.json");
    let password = password_file(temp_dir.path(), "pw", PASSWORD);

    view()
        .arg(&input)
        .arg("--password-file")
        .arg(&password)
        .args(["--path", "m/1/2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Path:            m/1/2"))
        .stdout(predicate::str::contains(
            "74c19812ecc9011eacbcb3478399c1aa20b14343ad888416233b7b83b24c61a8",
        ));
}

#[test]
fn test_view_wrong_password() {
    let temp_dir = TempDir::new().unwrap();
    let input = fixture(temp_dir.path(), "scrypt-light.json");
    let password = password_file(temp_dir.path(), "pw", "not the password");

    view()
        .arg(&input)
        .arg("--password-file")
        .arg(&password)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error: wrong password"));
}

#[test]
fn test_view_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let password = password_file(temp_dir.path(), "pw", PASSWORD);

    view()
        .arg(temp_dir.path().join("absent.json"))
        .arg("--password-file")
        .arg(&password)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_view_directory_input() {
    let temp_dir = TempDir::new().unwrap();
    let password = password_file(temp_dir.path(), "pw", PASSWORD);

    view()
        .arg(temp_dir.path())
        .arg("--password-file")
        .arg(&password)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input path is a directory"));
}

#[test]
fn test_view_missing_kdf_function() {
    let temp_dir = TempDir::new().unwrap();
    let input = fixture(temp_dir.path(), "scrypt-light.json");
    let password = password_file(temp_dir.path(), "pw", PASSWORD);

    let mut json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&input).unwrap()).unwrap();
    json["crypto"]["kdf"]
        .as_object_mut()
        .unwrap()
        .remove("function");
    std::fs::write(&input, json.to_string()).unwrap();

    view()
        .arg(&input)
        .arg("--password-file")
        .arg(&password)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing field: crypto.kdf.function"));
}

#[test]
fn test_view_invalid_path_argument() {
    let temp_dir = TempDir::new().unwrap();
    let input = fixture(temp_dir.path(), "scrypt-light.json");

    view()
        .arg(&input)
        .args(["--path", "44'/60'"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--path"));
}

#[test]
fn test_view_requires_input() {
    view()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
