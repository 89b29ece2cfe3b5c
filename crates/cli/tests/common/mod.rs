//! Shared helpers for the CLI integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub const PASSWORD: &str = "testpassword🔑";
pub const SEED: &str = "000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f";
pub const PRIVATE_KEY: &str = "317d3412f3190c7fa0c58c1a6578948cf8cc494e0da5bc99d6c5b211c58b5a5e";
pub const ADDRESS: &str = "0xc60750231dDccd5a787116A182FD3398f3a5dd61";

/// Copy a fixture from `tests/fixtures` into `dir`
pub fn fixture(dir: &Path, name: &str) -> PathBuf {
    let source = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    let target = dir.join(name);
    fs::copy(&source, &target).unwrap();
    target
}

/// Write `password` plus a newline to `dir/name`
pub fn password_file(dir: &Path, name: &str, password: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("{}\n", password)).unwrap();
    path
}
